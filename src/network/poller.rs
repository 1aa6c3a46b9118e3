use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::common::{ClientEvent, RefreshRequest};

use super::api_client::ApiClient;

/// Read path: fetches the full list on start, on every tick, and whenever a
/// refresh request arrives.
pub struct MessagePoller {
    api: ApiClient,
    event_sender: mpsc::Sender<ClientEvent>,
    refresh_receiver: mpsc::Receiver<RefreshRequest>,
    period: Duration,
}

impl MessagePoller {
    pub fn new(
        api: ApiClient,
        event_sender: mpsc::Sender<ClientEvent>,
        refresh_receiver: mpsc::Receiver<RefreshRequest>,
        period: Duration,
    ) -> Self {
        Self {
            api,
            event_sender,
            refresh_receiver,
            period,
        }
    }

    /// Runs until the UI drops its event receiver or every refresh sender is gone.
    pub async fn run(mut self) {
        if !self.probe_connection().await || !self.remount().await {
            return;
        }

        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::info!(
            "Polling {} every {}s",
            self.api.messages_url(),
            self.period.as_secs()
        );

        loop {
            let alive = tokio::select! {
                request = self.refresh_receiver.recv() => {
                    let Some(request) = request else { break };
                    log::debug!("Refresh requested: {request:?}");
                    let probed = request != RefreshRequest::Reconnect
                        || self.probe_connection().await;
                    // A re-mount restarts the polling cadence
                    ticker.reset();
                    probed && self.remount().await
                }
                _ = ticker.tick() => self.fetch().await,
            };

            if !alive {
                break;
            }
        }

        log::info!("Message poller stopped");
    }

    async fn probe_connection(&self) -> bool {
        let connected = self.api.check_connection().await;
        self.emit(ClientEvent::Connectivity(connected)).await
    }

    /// Loading, then a fresh fetch
    async fn remount(&self) -> bool {
        self.emit(ClientEvent::Loading).await && self.fetch().await
    }

    async fn fetch(&self) -> bool {
        let event = match self.api.list_messages().await {
            Ok(messages) => {
                log::debug!("Fetched {} messages", messages.len());
                ClientEvent::MessagesLoaded(messages)
            }
            Err(err) => {
                log::error!("Error fetching messages: {err}");
                ClientEvent::LoadFailed(err.load_failure_message())
            }
        };
        self.emit(event).await
    }

    async fn emit(&self, event: ClientEvent) -> bool {
        self.event_sender.send(event).await.is_ok()
    }
}
