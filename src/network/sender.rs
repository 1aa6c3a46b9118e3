use tokio::sync::mpsc;

use crate::common::{ClientEvent, NewMessage, RefreshRequest, SendRequest};

use super::api_client::ApiClient;

/// Write path: posts composed messages and asks the read path to refresh
/// after each success.
pub struct MessageSender {
    api: ApiClient,
    request_receiver: mpsc::Receiver<SendRequest>,
    event_sender: mpsc::Sender<ClientEvent>,
    refresh_sender: mpsc::Sender<RefreshRequest>,
}

impl MessageSender {
    pub fn new(
        api: ApiClient,
        request_receiver: mpsc::Receiver<SendRequest>,
        event_sender: mpsc::Sender<ClientEvent>,
        refresh_sender: mpsc::Sender<RefreshRequest>,
    ) -> Self {
        Self {
            api,
            request_receiver,
            event_sender,
            refresh_sender,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.request_receiver.recv().await {
            if !self.handle_request(request).await {
                break;
            }
        }
        log::info!("Message sender stopped");
    }

    async fn handle_request(&self, request: SendRequest) -> bool {
        let message = NewMessage {
            content: request.content,
            sender: request.sender.as_str().to_string(),
        };

        match self.api.send_message(&message).await {
            Ok(created) => {
                log::debug!("Sent message {}", created.id);
                if self
                    .event_sender
                    .send(ClientEvent::MessageSent(created))
                    .await
                    .is_err()
                {
                    return false;
                }
                if let Err(err) = self.refresh_sender.send(RefreshRequest::AfterSend).await {
                    log::warn!("Failed to request refresh after send: {err}");
                }
                true
            }
            Err(err) => {
                log::error!("Error sending message: {err}");
                self.event_sender
                    .send(ClientEvent::SendFailed(err.send_failure_message()))
                    .await
                    .is_ok()
            }
        }
    }
}
