use std::time::Duration;

use bevy::prelude::*;
use bevy::time::Stopwatch;

/// Seconds left at or below which the countdown is shown as urgent.
pub const URGENT_SECONDS: u32 = 10;

/// Round clock: a countdown that gates the active phase, or a plain
/// stopwatch for display when the round is untimed.
#[derive(Debug, Clone)]
pub enum RoundClock {
    Countdown(Timer),
    Elapsed(Stopwatch),
}

impl RoundClock {
    pub fn new(duration: Option<f32>) -> Self {
        match duration {
            Some(secs) => RoundClock::Countdown(Timer::from_seconds(secs, TimerMode::Once)),
            None => RoundClock::Elapsed(Stopwatch::new()),
        }
    }

    /// Advances by `dt` seconds. Returns true on the tick the countdown
    /// runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        let delta = Duration::from_secs_f32(dt.max(0.0));
        match self {
            RoundClock::Countdown(timer) => timer.tick(delta).just_finished(),
            RoundClock::Elapsed(watch) => {
                watch.tick(delta);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        match self {
            RoundClock::Countdown(timer) => timer.reset(),
            RoundClock::Elapsed(watch) => watch.reset(),
        }
    }

    pub fn is_countdown(&self) -> bool {
        matches!(self, RoundClock::Countdown(_))
    }

    pub fn expired(&self) -> bool {
        match self {
            RoundClock::Countdown(timer) => timer.finished(),
            RoundClock::Elapsed(_) => false,
        }
    }

    pub fn remaining(&self) -> Option<f32> {
        match self {
            RoundClock::Countdown(timer) => Some(timer.remaining_secs()),
            RoundClock::Elapsed(_) => None,
        }
    }

    pub fn elapsed(&self) -> f32 {
        match self {
            RoundClock::Countdown(timer) => timer.elapsed_secs(),
            RoundClock::Elapsed(watch) => watch.elapsed_secs(),
        }
    }

    /// Whole seconds to show: remaining rounded up for a countdown,
    /// elapsed rounded down otherwise.
    pub fn display_seconds(&self) -> u32 {
        match self.remaining() {
            Some(remaining) => remaining.ceil() as u32,
            None => self.elapsed().floor() as u32,
        }
    }

    pub fn is_urgent(&self) -> bool {
        self.is_countdown() && self.display_seconds() <= URGENT_SECONDS
    }

    pub fn label(&self) -> String {
        format!("Time: {}", format_clock(self.display_seconds()))
    }
}

/// `m:ss`
pub fn format_clock(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
