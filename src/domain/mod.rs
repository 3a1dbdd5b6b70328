//! Domain modules split by discipline.
//! - `controls`: keyboard and mouse mapped onto doctor steering and round triggers.
//! - `presentation`: ward floor sprites, HUD, and welcome/game-over overlays.
//! - `simulation`: patients, scoring, round clock, and the authoritative phase machine.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::{Phase, RushSettings, SimPlugin, Variant};
