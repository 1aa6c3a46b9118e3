use eframe::egui;

use crate::ui::state::IdentityPrompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Confirmed,
    Dismissed,
}

pub fn render(ctx: &egui::Context, prompt: &mut IdentityPrompt) -> Option<PromptOutcome> {
    let mut outcome = None;

    egui::Window::new("Username")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(prompt.title());
            let response = ui.text_edit_singleline(&mut prompt.input);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                outcome = Some(PromptOutcome::Confirmed);
            }

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    outcome = Some(PromptOutcome::Confirmed);
                }
                if ui.button("Cancel").clicked() {
                    outcome = Some(PromptOutcome::Dismissed);
                }
            });
        });

    outcome
}
