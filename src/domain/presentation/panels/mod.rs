pub mod game_over_panel;
pub mod help_panel;
pub mod hud_panel;
pub mod welcome_panel;

use bevy::prelude::*;
use bevy_egui::egui::Color32;

pub use game_over_panel::show_game_over_panel;
pub use help_panel::show_help_panel;
pub use hud_panel::show_hud_panel;
pub use welcome_panel::show_welcome_panel;

pub fn egui_color(color: Color) -> Color32 {
    let c = color.to_srgba();
    Color32::from_rgba_unmultiplied(
        (c.red * 255.0).round() as u8,
        (c.green * 255.0).round() as u8,
        (c.blue * 255.0).round() as u8,
        (c.alpha * 255.0).round() as u8,
    )
}
