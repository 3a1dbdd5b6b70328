use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::simulation::Ward;

const HUD_INK: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);

pub fn show_hud_panel(ctx: &mut egui::Context, ward: &Ward) {
    egui::Area::new("hud_panel".into())
        .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 8.0))
        .show(ctx, |ui| {
            egui::Frame::window(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(ward.score().to_string())
                            .font(FontId::proportional(24.0))
                            .color(HUD_INK)
                            .strong(),
                    );
                    ui.add_space(48.0);
                    ui.label(
                        RichText::new(ward.clock().label())
                            .font(FontId::proportional(24.0))
                            .color(timer_color(ward))
                            .strong(),
                    );
                });
            });
        });
}

fn timer_color(ward: &Ward) -> Color32 {
    if ward.clock().is_urgent() {
        Color32::RED
    } else {
        HUD_INK
    }
}
