use bevy_egui::egui::{self, Align2, FontId, RichText};

use crate::domain::simulation::{Severity, Ward};

use super::egui_color;

pub fn show_welcome_panel(ctx: &mut egui::Context, ward: &Ward) {
    egui::Window::new("Vaccine Rush!")
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Your mission is to save patients before the virus kills them!")
                        .font(FontId::proportional(20.0)),
                );
                ui.add_space(16.0);
                for (severity, text) in [
                    (Severity::Critical, "Red - Critical Condition"),
                    (Severity::Moderate, "Yellow - Moderate Condition"),
                    (Severity::Stable, "Green - Stable Condition"),
                ] {
                    ui.label(
                        RichText::new(text)
                            .font(FontId::proportional(20.0))
                            .color(egui_color(severity.color())),
                    );
                }
                ui.add_space(16.0);
                if let Some(secs) = ward.settings().round_duration {
                    ui.label(format!("You have {secs:.0} seconds."));
                }
                ui.label("Use arrow keys to move");
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Click anywhere to start!")
                        .font(FontId::proportional(22.0))
                        .strong(),
                );
            });
        });
}
