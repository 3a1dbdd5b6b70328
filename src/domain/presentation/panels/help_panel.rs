use bevy_egui::egui;

use crate::domain::simulation::RushSettings;

pub fn show_help_panel(ctx: &mut egui::Context, settings: &RushSettings) {
    if settings.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            ui.label("WASD/Arrows: Move");
            ui.label("Left Mouse / Space / Enter: Start, Play Again");
            ui.label("H: Toggle Help");
            ui.separator();
            ui.label("Touch a patient to heal them before their health runs out.");
        });
    }
}
