pub mod api_client;
pub mod poller;
pub mod sender;

pub use api_client::ApiClient;
pub use poller::MessagePoller;
pub use sender::MessageSender;

use std::time::Duration;

use tokio::sync::mpsc;

use crate::common::{ClientEvent, RefreshRequest, SendRequest};

pub const LOAD_FAILED: &str = "Failed to load messages. Please try again later.";
pub const SEND_FAILED: &str = "Failed to send message";

/// UI-side ends of the client channels
pub struct ClientChannels {
    pub send_requests: mpsc::Sender<SendRequest>,
    pub refresh_requests: mpsc::Sender<RefreshRequest>,
    pub events: mpsc::Receiver<ClientEvent>,
}

/// Spawn the read and write paths on the current runtime.
pub fn spawn_client(api: ApiClient, poll_interval: Duration) -> ClientChannels {
    // UI -> write path
    let (send_tx, send_rx) = mpsc::channel(100);
    // UI / write path -> read path
    let (refresh_tx, refresh_rx) = mpsc::channel(16);
    // network -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let poller = MessagePoller::new(api.clone(), event_tx.clone(), refresh_rx, poll_interval);
    let sender = MessageSender::new(api, send_rx, event_tx, refresh_tx.clone());

    tokio::spawn(poller.run());
    tokio::spawn(sender.run());

    ClientChannels {
        send_requests: send_tx,
        refresh_requests: refresh_tx,
        events: event_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiState;
    use crate::api::test_support::{break_store, spawn_server};
    use crate::common::{Message, NewMessage, SessionIdentity};
    use crate::storage::MessageStore;

    const LONG_PERIOD: Duration = Duration::from_secs(3600);

    async fn next_event(events: &mut mpsc::Receiver<ClientEvent>) -> ClientEvent {
        tokio::time::timeout(Duration::from_secs(10), events.recv())
            .await
            .expect("timed out waiting for client event")
            .expect("event channel closed")
    }

    async fn expect_loaded(events: &mut mpsc::Receiver<ClientEvent>) -> Vec<Message> {
        match next_event(events).await {
            ClientEvent::MessagesLoaded(messages) => messages,
            other => panic!("expected MessagesLoaded, got {other:?}"),
        }
    }

    async fn expect_mount(events: &mut mpsc::Receiver<ClientEvent>) -> Vec<Message> {
        assert!(matches!(next_event(events).await, ClientEvent::Loading));
        expect_loaded(events).await
    }

    async fn server() -> (ApiState, String) {
        let state = ApiState::new(MessageStore::in_memory().unwrap());
        let url = spawn_server(state.clone()).await;
        (state, url)
    }

    #[tokio::test]
    async fn poller_mounts_then_refreshes_on_request() {
        let (_state, url) = server().await;
        let api = ApiClient::new(&url);
        let (event_tx, mut events) = mpsc::channel(16);
        let (refresh_tx, refresh_rx) = mpsc::channel(4);
        tokio::spawn(MessagePoller::new(api.clone(), event_tx, refresh_rx, LONG_PERIOD).run());

        assert!(matches!(
            next_event(&mut events).await,
            ClientEvent::Connectivity(true)
        ));
        assert!(expect_mount(&mut events).await.is_empty());

        api.send_message(&NewMessage {
            content: "hello".to_string(),
            sender: "eve".to_string(),
        })
        .await
        .unwrap();
        refresh_tx.send(RefreshRequest::Retry).await.unwrap();

        let messages = expect_mount(&mut events).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");
    }

    #[tokio::test]
    async fn poller_refetches_on_timer_without_loading() {
        let (_state, url) = server().await;
        let (event_tx, mut events) = mpsc::channel(16);
        let (_refresh_tx, refresh_rx) = mpsc::channel(4);
        let period = Duration::from_millis(200);
        tokio::spawn(MessagePoller::new(ApiClient::new(&url), event_tx, refresh_rx, period).run());

        assert!(matches!(
            next_event(&mut events).await,
            ClientEvent::Connectivity(true)
        ));
        expect_mount(&mut events).await;

        assert!(expect_loaded(&mut events).await.is_empty());
        assert!(expect_loaded(&mut events).await.is_empty());
    }

    #[tokio::test]
    async fn poller_reports_load_failure_and_recovers_on_retry() {
        let (state, url) = server().await;
        break_store(&state).await;
        let (event_tx, mut events) = mpsc::channel(16);
        let (refresh_tx, refresh_rx) = mpsc::channel(4);
        tokio::spawn(MessagePoller::new(ApiClient::new(&url), event_tx, refresh_rx, LONG_PERIOD).run());

        assert!(matches!(
            next_event(&mut events).await,
            ClientEvent::Connectivity(false)
        ));
        assert!(matches!(next_event(&mut events).await, ClientEvent::Loading));
        match next_event(&mut events).await {
            ClientEvent::LoadFailed(message) => assert_eq!(message, LOAD_FAILED),
            other => panic!("expected LoadFailed, got {other:?}"),
        }

        state
            .with_store(|store| {
                store.database().connection().execute(
                    "CREATE TABLE messages (
                        seq INTEGER PRIMARY KEY AUTOINCREMENT,
                        id TEXT NOT NULL UNIQUE,
                        content TEXT NOT NULL,
                        sender TEXT NOT NULL,
                        created_at INTEGER NOT NULL
                    )",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        refresh_tx.send(RefreshRequest::Reconnect).await.unwrap();
        assert!(matches!(
            next_event(&mut events).await,
            ClientEvent::Connectivity(true)
        ));
        assert!(expect_mount(&mut events).await.is_empty());
    }

    #[tokio::test]
    async fn sender_reports_success_and_requests_refresh() {
        let (_state, url) = server().await;
        let (send_tx, send_rx) = mpsc::channel(4);
        let (event_tx, mut events) = mpsc::channel(16);
        let (refresh_tx, mut refresh_rx) = mpsc::channel(4);
        tokio::spawn(MessageSender::new(ApiClient::new(&url), send_rx, event_tx, refresh_tx).run());

        send_tx
            .send(SendRequest {
                content: " raw text ".to_string(),
                sender: SessionIdentity::from_input("frank"),
            })
            .await
            .unwrap();

        match next_event(&mut events).await {
            ClientEvent::MessageSent(message) => {
                assert_eq!(message.content, " raw text ");
                assert_eq!(message.sender, "frank");
            }
            other => panic!("expected MessageSent, got {other:?}"),
        }
        assert_eq!(refresh_rx.recv().await, Some(RefreshRequest::AfterSend));
    }

    #[tokio::test]
    async fn sender_failure_carries_server_reason_and_skips_refresh() {
        let (_state, url) = server().await;
        let (send_tx, send_rx) = mpsc::channel(4);
        let (event_tx, mut events) = mpsc::channel(16);
        let (refresh_tx, mut refresh_rx) = mpsc::channel(4);
        tokio::spawn(MessageSender::new(ApiClient::new(&url), send_rx, event_tx, refresh_tx).run());

        send_tx
            .send(SendRequest {
                content: String::new(),
                sender: SessionIdentity::anonymous(),
            })
            .await
            .unwrap();

        match next_event(&mut events).await {
            ClientEvent::SendFailed(reason) => {
                assert_eq!(reason, "Content and sender are required")
            }
            other => panic!("expected SendFailed, got {other:?}"),
        }
        assert!(refresh_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn spawned_client_refreshes_after_send() {
        let (_state, url) = server().await;
        let mut channels = spawn_client(ApiClient::new(&url), LONG_PERIOD);

        assert!(matches!(
            next_event(&mut channels.events).await,
            ClientEvent::Connectivity(true)
        ));
        expect_mount(&mut channels.events).await;

        channels
            .send_requests
            .send(SendRequest {
                content: "hi".to_string(),
                sender: SessionIdentity::from_input("alice"),
            })
            .await
            .unwrap();

        assert!(matches!(
            next_event(&mut channels.events).await,
            ClientEvent::MessageSent(_)
        ));
        let messages = expect_mount(&mut channels.events).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, "alice");
    }
}
