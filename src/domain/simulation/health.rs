//! Per-tick health decay and proximity-triggered healing.
//!
//! Every transition a patient goes through is reported back as a
//! [`Transition`] exactly once; callers count those and nothing else.

use bevy::prelude::*;

use super::entities::Patient;

pub const CRITICAL_THRESHOLD: f32 = 30.0;
pub const MODERATE_THRESHOLD: f32 = 60.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Severity {
    Critical,
    Moderate,
    Stable,
}

impl Severity {
    pub fn from_health(health: f32) -> Self {
        if health <= CRITICAL_THRESHOLD {
            Severity::Critical
        } else if health <= MODERATE_THRESHOLD {
            Severity::Moderate
        } else {
            Severity::Stable
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Severity::Critical => Color::srgb(1.0, 0.0, 0.0),
            Severity::Moderate => Color::srgb(1.0, 0.647, 0.0),
            Severity::Stable => Color::srgb(0.0, 1.0, 0.0),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    Saved,
    Lost,
}

impl Patient {
    pub fn severity(&self) -> Severity {
        Severity::from_health(self.health)
    }

    /// Health bar colour. Saved patients read as stable whatever their health.
    pub fn bar_color(&self) -> Color {
        if self.saved {
            Severity::Stable.color()
        } else {
            self.severity().color()
        }
    }

    /// Share of the health bar to fill, in `0.0..=1.0`.
    pub fn bar_fill(&self, max_health: f32) -> f32 {
        (self.health / max_health).clamp(0.0, 1.0)
    }

    /// Applies one tick of decay. Reports [`Transition::Lost`] on the tick
    /// health reaches zero; resolved patients are left untouched.
    pub fn decay(&mut self, rate: f32) -> Option<Transition> {
        if self.is_resolved() {
            return None;
        }
        self.health = (self.health - rate).max(0.0);
        if self.health <= 0.0 {
            self.dead = true;
            return Some(Transition::Lost);
        }
        None
    }

    /// Restores full health and latches `saved`. No-op once resolved.
    pub fn heal(&mut self, max_health: f32) -> Option<Transition> {
        if self.is_resolved() {
            return None;
        }
        self.health = max_health;
        self.saved = true;
        Some(Transition::Saved)
    }
}

/// Axis-aligned overlap between two hit regions given by centre and half size.
pub fn overlaps(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let gap = (a - b).abs();
    let reach = a_half + b_half;
    gap.x <= reach.x && gap.y <= reach.y
}
