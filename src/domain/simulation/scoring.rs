use std::fmt;

use bevy::prelude::*;

use super::health::Transition;

/// Saved/lost counters for one round. Counts only ever go up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    saved: u32,
    lost: u32,
}

impl Scoreboard {
    pub fn record(&mut self, transition: Transition) {
        match transition {
            Transition::Saved => self.saved += 1,
            Transition::Lost => self.lost += 1,
        }
    }

    pub fn saved(&self) -> u32 {
        self.saved
    }

    pub fn lost(&self) -> u32 {
        self.lost
    }

    pub fn resolved(&self) -> u32 {
        self.saved + self.lost
    }

    /// Percentage of `total` patients saved, rounded to the nearest whole
    /// percent. An empty round scores zero.
    pub fn save_rate(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        (100.0 * self.saved as f32 / total as f32).round() as u32
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Saved: {} | Lost: {}", self.saved, self.lost)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PerformanceTier {
    Outstanding,
    Excellent,
    GreatJob,
    KeepPracticing,
    TryAgain,
    KeepGoing,
}

impl PerformanceTier {
    pub fn from_save_rate(rate: u32) -> Self {
        match rate {
            90..=u32::MAX => PerformanceTier::Outstanding,
            80..=89 => PerformanceTier::Excellent,
            70..=79 => PerformanceTier::GreatJob,
            50..=69 => PerformanceTier::KeepPracticing,
            30..=49 => PerformanceTier::TryAgain,
            _ => PerformanceTier::KeepGoing,
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            PerformanceTier::Outstanding => "Outstanding!",
            PerformanceTier::Excellent => "Excellent!",
            PerformanceTier::GreatJob => "Great Job!",
            PerformanceTier::KeepPracticing => "Keep Practicing!",
            PerformanceTier::TryAgain => "Try Again!",
            PerformanceTier::KeepGoing => "Keep Going!",
        }
    }

    pub fn stars(&self) -> u8 {
        match *self {
            PerformanceTier::Outstanding => 5,
            PerformanceTier::Excellent => 4,
            PerformanceTier::GreatJob => 3,
            PerformanceTier::KeepPracticing => 2,
            PerformanceTier::TryAgain => 1,
            PerformanceTier::KeepGoing => 0,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            PerformanceTier::Outstanding => Color::srgb_u8(0xFF, 0xD7, 0x00),
            PerformanceTier::Excellent => Color::srgb_u8(0x00, 0xFF, 0x00),
            PerformanceTier::GreatJob => Color::srgb_u8(0x4C, 0xAF, 0x50),
            PerformanceTier::KeepPracticing => Color::srgb_u8(0xFF, 0xA5, 0x00),
            PerformanceTier::TryAgain => Color::srgb_u8(0xFF, 0x6B, 0x6B),
            PerformanceTier::KeepGoing => Color::srgb_u8(0xFF, 0x44, 0x44),
        }
    }
}
