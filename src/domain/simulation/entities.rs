use bevy::prelude::*;
use rand::Rng;

use super::settings::RushSettings;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatientId(pub u64);

/// The player-controlled doctor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Doctor {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Doctor {
    /// Sets velocity from a directional signal and integrates one tick,
    /// keeping the hit region inside `arena`.
    pub fn steer(&mut self, direction: Vec2, speed: f32, dt: f32, arena: Rect, half_size: Vec2) {
        self.velocity = direction.clamp(Vec2::NEG_ONE, Vec2::ONE) * speed;
        let min = arena.min + half_size;
        let max = (arena.max - half_size).max(min);
        self.position = (self.position + self.velocity * dt).clamp(min, max);
    }
}

/// A patient on the ward floor. Position is fixed at admission; `saved` and
/// `dead` are one-way latches, mutated only through the health engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Patient {
    pub id: PatientId,
    pub position: Vec2,
    pub health: f32,
    pub initial_health: f32,
    pub(super) saved: bool,
    pub(super) dead: bool,
}

impl Patient {
    pub fn new(id: PatientId, position: Vec2, health: f32) -> Self {
        Self {
            id,
            position,
            health,
            initial_health: health,
            saved: false,
            dead: false,
        }
    }

    /// Random position inside the spawn area, random whole-number health
    /// from the configured range.
    pub fn admit<R: Rng + ?Sized>(id: PatientId, rng: &mut R, settings: &RushSettings) -> Self {
        let area = settings.spawn_area();
        let position = Vec2::new(
            rng.gen_range(area.min.x..=area.max.x),
            rng.gen_range(area.min.y..=area.max.y),
        );
        let (min, max) = settings.initial_health;
        let health = rng.gen_range(min..=max) as f32;
        Self::new(id, position, health)
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_resolved(&self) -> bool {
        self.saved || self.dead
    }
}
