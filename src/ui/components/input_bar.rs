use eframe::egui;

use crate::common::SessionIdentity;
use crate::ui::state::Composer;

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    ChangeIdentity,
}

pub fn render(
    ui: &mut egui::Ui,
    composer: &mut Composer,
    identity: Option<&SessionIdentity>,
) -> Option<InputAction> {
    let mut action = None;

    if let Some(error) = composer.error() {
        ui.colored_label(egui::Color32::from_rgb(185, 28, 28), error);
        ui.add_space(4.0);
    }

    ui.horizontal(|ui| {
        ui.label("Posting as:");
        ui.strong(identity.map(SessionIdentity::as_str).unwrap_or_default());
        if ui.small_button("Change").clicked() {
            action = Some(InputAction::ChangeIdentity);
        }
    });

    let sending = composer.is_sending();
    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            !sending,
            egui::TextEdit::singleline(&mut composer.text).hint_text("Type a message..."),
        );
        let label = if sending { "Sending..." } else { "Send" };
        if ui
            .add_enabled(composer.can_submit(), egui::Button::new(label))
            .clicked()
        {
            action = Some(InputAction::Submit);
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            action = Some(InputAction::Submit);
        }
    });

    action
}
