use eframe::egui;

use crate::common::{Message, SessionIdentity};
use crate::ui::state::{FeedStatus, MessageFeed, is_own};

const OWN_FILL: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
const OTHER_FILL: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);

/// Returns true when "Try Again" was clicked.
pub fn render(
    ui: &mut egui::Ui,
    feed: &mut MessageFeed,
    identity: Option<&SessionIdentity>,
) -> bool {
    match feed.status().clone() {
        FeedStatus::Loading => {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Spinner::new().size(32.0));
            });
            false
        }
        FeedStatus::Error(reason) => {
            let mut retry = false;
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.colored_label(egui::Color32::RED, reason);
                retry = ui.button("Try Again").clicked();
            });
            retry
        }
        FeedStatus::Ready => {
            render_messages(ui, feed, identity);
            false
        }
    }
}

fn render_messages(ui: &mut egui::Ui, feed: &mut MessageFeed, identity: Option<&SessionIdentity>) {
    let scroll_to_bottom = feed.take_scroll_request();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if feed.messages().is_empty() {
                ui.vertical_centered(|ui| {
                    ui.weak("No messages yet. Be the first to say hello!");
                });
            }

            for message in feed.messages() {
                let own = is_own(message, identity);
                let layout = if own {
                    egui::Layout::right_to_left(egui::Align::TOP)
                } else {
                    egui::Layout::left_to_right(egui::Align::TOP)
                };
                ui.with_layout(layout, |ui| bubble(ui, message, own));
                ui.add_space(6.0);
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}

fn bubble(ui: &mut egui::Ui, message: &Message, own: bool) {
    let (fill, text) = if own {
        (OWN_FILL, egui::Color32::WHITE)
    } else {
        (OTHER_FILL, egui::Color32::BLACK)
    };

    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_max_width(260.0);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(&message.sender)
                        .small()
                        .strong()
                        .color(text),
                );
                ui.label(egui::RichText::new(&message.content).color(text));
                ui.label(
                    egui::RichText::new(message.local_time())
                        .small()
                        .color(text.gamma_multiply(0.7)),
                );
            });
        });
}
