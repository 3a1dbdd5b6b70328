use std::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

pub const DEFAULT_TICK_HZ: f64 = 60.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum Variant {
    /// Countdown round with patients trickling in.
    #[default]
    Timed,
    /// Fixed batch of patients, no countdown.
    Untimed,
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("initial health range {min}..={max} is empty")]
    HealthRange { min: u32, max: u32 },
    #[error("decay per tick must be positive, got {0}")]
    DecayRate(f32),
    #[error("tick rate must be positive, got {0} Hz")]
    TickRate(f64),
    #[error("round duration must be positive, got {0}s")]
    RoundDuration(f32),
    #[error("spawn interval must be positive, got {0}s")]
    SpawnInterval(f32),
    #[error("spawn margins leave no room inside a {width}x{height} arena")]
    SpawnArea { width: f32, height: f32 },
    #[error("round has no initial patients and no periodic spawning")]
    NoPatients,
}

#[derive(Resource, Clone, Debug)]
pub struct RushSettings {
    pub variant: Variant,
    pub arena_half_extents: Vec2,
    /// Inset from the left, right and bottom walls for patient spawns.
    pub side_margin: f32,
    /// Inset from the top wall, keeps patients out from under the HUD.
    pub hud_margin: f32,
    pub initial_patients: usize,
    pub spawn_interval: Option<f32>,
    pub round_duration: Option<f32>,
    pub initial_health: (u32, u32),
    pub max_health: f32,
    pub decay_per_tick: f32,
    pub tick_hz: f64,
    pub player_speed: f32,
    pub player_half_size: Vec2,
    pub patient_half_size: Vec2,
    pub end_when_all_resolved: bool,
    pub seed: Option<u64>,
    pub show_help: bool,
}

impl Default for RushSettings {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl RushSettings {
    pub fn from_variant(variant: Variant) -> Self {
        let mut settings = Self {
            variant,
            arena_half_extents: Vec2::new(600.0, 400.0),
            side_margin: 50.0,
            hud_margin: 100.0,
            initial_patients: 5,
            spawn_interval: Some(2.0),
            round_duration: Some(30.0),
            initial_health: (30, 70),
            max_health: 100.0,
            decay_per_tick: 0.1,
            tick_hz: DEFAULT_TICK_HZ,
            player_speed: 300.0,
            // 40x60 doctor and 30x40 patients, scaled 1.2 and 1.1
            player_half_size: Vec2::new(24.0, 36.0),
            patient_half_size: Vec2::new(16.5, 22.0),
            end_when_all_resolved: false,
            seed: None,
            show_help: false,
        };
        match variant {
            Variant::Timed => {}
            Variant::Untimed => {
                settings.initial_patients = 10;
                settings.spawn_interval = None;
                settings.round_duration = None;
                settings.initial_health = (10, 50);
                settings.end_when_all_resolved = true;
            }
        }
        settings
    }

    pub fn arena(&self) -> Rect {
        Rect {
            min: -self.arena_half_extents,
            max: self.arena_half_extents,
        }
    }

    /// Region patients may spawn in. Not normalised, so an over-inset arena
    /// shows up as `min > max`.
    pub fn spawn_area(&self) -> Rect {
        let half = self.arena_half_extents;
        Rect {
            min: Vec2::new(-half.x + self.side_margin, -half.y + self.side_margin),
            max: Vec2::new(half.x - self.side_margin, half.y - self.hud_margin),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let (min, max) = self.initial_health;
        if min > max {
            return Err(SettingsError::HealthRange { min, max });
        }
        if !(self.decay_per_tick > 0.0) {
            return Err(SettingsError::DecayRate(self.decay_per_tick));
        }
        let timestep = Duration::try_from_secs_f64(self.tick_hz.recip());
        if !(self.tick_hz > 0.0 && timestep.is_ok_and(|step| !step.is_zero())) {
            return Err(SettingsError::TickRate(self.tick_hz));
        }
        if let Some(duration) = self.round_duration {
            if !is_timer_length(duration) {
                return Err(SettingsError::RoundDuration(duration));
            }
        }
        if let Some(interval) = self.spawn_interval {
            if !is_timer_length(interval) {
                return Err(SettingsError::SpawnInterval(interval));
            }
        }
        let area = self.spawn_area();
        if area.min.x > area.max.x || area.min.y > area.max.y {
            return Err(SettingsError::SpawnArea {
                width: self.arena_half_extents.x * 2.0,
                height: self.arena_half_extents.y * 2.0,
            });
        }
        if self.initial_patients == 0 && self.spawn_interval.is_none() {
            return Err(SettingsError::NoPatients);
        }
        Ok(())
    }
}

/// Positive and representable as a `Duration`, so `Timer::from_seconds` accepts it.
fn is_timer_length(secs: f32) -> bool {
    secs > 0.0 && Duration::try_from_secs_f32(secs).is_ok()
}
