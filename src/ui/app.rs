use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ClientEvent, RefreshRequest, SendRequest, SessionIdentity};
use crate::network::ClientChannels;
use crate::storage::ClientDatabase;

use super::components::identity_prompt::PromptOutcome;
use super::components::input_bar::InputAction;
use super::components::{connection_panel, identity_prompt, input_bar, message_list};
use super::state::{AppState, Connectivity};

pub struct ChatApp {
    state: AppState,
    client_db: ClientDatabase,
    send_requests: mpsc::Sender<SendRequest>,
    refresh_requests: mpsc::Sender<RefreshRequest>,
    event_receiver: mpsc::Receiver<ClientEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        client_db: ClientDatabase,
        channels: ClientChannels,
    ) -> Self {
        let identity = client_db.load_identity().unwrap_or_else(|err| {
            log::warn!("Failed to read stored username: {err}");
            None
        });

        Self {
            state: AppState::new(identity),
            client_db,
            send_requests: channels.send_requests,
            refresh_requests: channels.refresh_requests,
            event_receiver: channels.events,
        }
    }

    fn handle_client_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.apply_event(event);
        }
    }

    fn submit(&mut self) {
        let Some(request) = self.state.submit() else {
            return;
        };
        if let Err(err) = self.send_requests.try_send(request) {
            log::warn!("Failed to hand message to sender: {err}");
            self.state
                .composer
                .apply_failed(crate::network::SEND_FAILED.to_string());
        }
    }

    fn request_refresh(&mut self, request: RefreshRequest) {
        if let Err(err) = self.refresh_requests.try_send(request) {
            log::warn!("Failed to request refresh: {err}");
        }
    }

    fn persist_identity(&self, identity: &SessionIdentity) {
        match self.client_db.save_identity(identity) {
            Ok(()) => log::info!("Posting as {identity}"),
            Err(err) => log::error!("Failed to store username: {err}"),
        }
    }

    fn show_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.state.prompt.as_mut() else {
            return;
        };
        let identity = match identity_prompt::render(ctx, prompt) {
            Some(PromptOutcome::Confirmed) => self.state.confirm_prompt(),
            Some(PromptOutcome::Dismissed) => self.state.dismiss_prompt(),
            None => None,
        };
        if let Some(identity) = identity {
            self.persist_identity(&identity);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_client_events();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Real-Time Chat");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    connection_panel::render_badge(ui, self.state.connectivity);
                });
            });
        });

        if self.state.connectivity == Connectivity::Offline {
            let retry = egui::CentralPanel::default()
                .show(ctx, connection_panel::render_offline)
                .inner;
            if retry {
                self.state.begin_reconnect();
                self.request_refresh(RefreshRequest::Reconnect);
            }
        } else {
            let action = egui::TopBottomPanel::bottom("compose")
                .show(ctx, |ui| {
                    ui.add_space(6.0);
                    let identity = self.state.identity().cloned();
                    input_bar::render(ui, &mut self.state.composer, identity.as_ref())
                })
                .inner;
            match action {
                Some(InputAction::Submit) => self.submit(),
                Some(InputAction::ChangeIdentity) => self.state.begin_identity_change(),
                None => {}
            }

            let retry = egui::CentralPanel::default()
                .show(ctx, |ui| {
                    // Ownership is judged against the identity held right now
                    let identity = self.state.identity().cloned();
                    message_list::render(ui, &mut self.state.feed, identity.as_ref())
                })
                .inner;
            if retry {
                self.state.feed.begin_loading();
                self.request_refresh(RefreshRequest::Retry);
            }
        }

        self.show_prompt(ctx);

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}
