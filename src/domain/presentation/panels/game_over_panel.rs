use bevy::prelude::*;
use bevy_egui::egui::{self, Align2, FontId, RichText};

use crate::domain::simulation::{format_clock, ActivateRound, RoundEnd, Ward};

use super::egui_color;

pub fn show_game_over_panel(
    ctx: &mut egui::Context,
    ward: &Ward,
    ev_activate: &mut EventWriter<ActivateRound>,
) {
    let tier = ward.performance();
    egui::Window::new("Game Over!")
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                if ward.ended_by() == Some(RoundEnd::TimeUp) {
                    ui.label(RichText::new("Time Up!").font(FontId::proportional(26.0)));
                }
                let played = ward.clock().elapsed().floor() as u32;
                for line in [
                    format!("Time: {}", format_clock(played)),
                    format!("Saved: {}", ward.score().saved()),
                    format!("Lost: {}", ward.score().lost()),
                    format!("Save Rate: {}%", ward.save_rate()),
                ] {
                    ui.label(RichText::new(line).font(FontId::proportional(24.0)));
                }
                ui.add_space(12.0);
                ui.label(
                    RichText::new(tier.label())
                        .font(FontId::proportional(32.0))
                        .color(egui_color(tier.color()))
                        .strong(),
                );
                ui.label(
                    RichText::new(stars(tier.stars()))
                        .font(FontId::proportional(32.0))
                        .color(egui_color(tier.color())),
                );
                ui.add_space(12.0);
                if ui.button("Play Again").clicked() {
                    ev_activate.send(ActivateRound);
                }
            });
        });
}

fn stars(count: u8) -> String {
    let filled = usize::from(count.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
