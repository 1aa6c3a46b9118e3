use eframe::egui;

use crate::ui::state::Connectivity;

/// Header badge; nothing while the probe is still running.
pub fn render_badge(ui: &mut egui::Ui, connectivity: Connectivity) {
    let (text, color) = match connectivity {
        Connectivity::Checking => return,
        Connectivity::Online => ("Connected", egui::Color32::from_rgb(74, 222, 128)),
        Connectivity::Offline => ("Offline", egui::Color32::from_rgb(248, 113, 113)),
    };
    ui.label(egui::RichText::new(text).small().background_color(color));
}

/// Full-panel error shown while offline; true when "Retry Connection" is clicked.
pub fn render_offline(ui: &mut egui::Ui) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.colored_label(egui::Color32::RED, "⚠ Connection Error");
        ui.add_space(8.0);
        ui.label("Cannot connect to the chat server. This could be due to:");
        ui.label("• Database connection issues");
        ui.label("• API route configuration problems");
        ui.label("• Network connectivity problems");
        ui.add_space(8.0);
        retry = ui.button("Retry Connection").clicked();
    });
    retry
}
