//! Authoritative round state and the phase machine that drives it.
//!
//! A [`Ward`] owns the doctor, the patient collection, the scoreboard and the
//! round clock. Nothing outside it mutates gameplay state: input arrives as a
//! [`TickInput`] or an [`Ward::activate`] call, and every externally visible
//! change is queued as a [`WardEvent`] for the presentation side to consume.

use bevy::prelude::*;
use rand::Rng;

use super::clock::RoundClock;
use super::entities::{Doctor, Patient, PatientId};
use super::health::{overlaps, Transition};
use super::scoring::{PerformanceTier, Scoreboard};
use super::settings::RushSettings;
use super::Phase;

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WardEvent {
    Admitted(PatientId),
    Saved(PatientId),
    Lost(PatientId),
    /// Every patient from the previous round was discarded.
    Cleared,
    PhaseChanged(Phase),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEnd {
    TimeUp,
    AllResolved,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    pub dt: f32,
    pub direction: Vec2,
}

#[derive(Resource, Debug)]
pub struct Ward {
    settings: RushSettings,
    phase: Phase,
    doctor: Doctor,
    patients: Vec<Patient>,
    score: Scoreboard,
    clock: RoundClock,
    spawner: Option<Timer>,
    ended_by: Option<RoundEnd>,
    next_id: u64,
    events: Vec<WardEvent>,
}

impl Ward {
    /// Opens the ward in [`Phase::Welcome`] with the initial batch admitted.
    pub fn new<R: Rng + ?Sized>(settings: RushSettings, rng: &mut R) -> Self {
        let mut ward = Self {
            clock: RoundClock::new(settings.round_duration),
            spawner: settings
                .spawn_interval
                .map(|secs| Timer::from_seconds(secs, TimerMode::Repeating)),
            settings,
            phase: Phase::Welcome,
            doctor: Doctor::default(),
            patients: Vec::new(),
            score: Scoreboard::default(),
            ended_by: None,
            next_id: 0,
            events: Vec::new(),
        };
        ward.admit_initial_batch(rng);
        ward
    }

    pub fn settings(&self) -> &RushSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn total_patients(&self) -> usize {
        self.patients.len()
    }

    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn ended_by(&self) -> Option<RoundEnd> {
        self.ended_by
    }

    pub fn save_rate(&self) -> u32 {
        self.score.save_rate(self.total_patients())
    }

    pub fn performance(&self) -> PerformanceTier {
        PerformanceTier::from_save_rate(self.save_rate())
    }

    /// Takes every notification queued since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, WardEvent> {
        self.events.drain(..)
    }

    /// The single "activation" signal: starts the round from the welcome
    /// screen, or resets and restarts it once ended. Ignored while active.
    /// Returns whether anything changed.
    pub fn activate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        match self.phase {
            Phase::Welcome => {
                info!("Round started with {} patients", self.total_patients());
                self.enter(Phase::Active);
                true
            }
            Phase::Active => false,
            Phase::Ended => {
                self.reset(rng);
                info!("Round restarted with {} patients", self.total_patients());
                self.enter(Phase::Active);
                true
            }
        }
    }

    /// One simulation tick. Order: clock, spawner, movement, patients, end
    /// check. Does nothing outside [`Phase::Active`].
    pub fn tick<R: Rng + ?Sized>(&mut self, input: TickInput, rng: &mut R) {
        if self.phase != Phase::Active {
            return;
        }

        if self.clock.tick(input.dt) {
            self.finish(RoundEnd::TimeUp);
            return;
        }

        let arrivals = match self.spawner.as_mut() {
            Some(timer) => timer
                .tick(std::time::Duration::from_secs_f32(input.dt.max(0.0)))
                .times_finished_this_tick(),
            None => 0,
        };
        for _ in 0..arrivals {
            self.admit(rng);
        }

        self.doctor.steer(
            input.direction,
            self.settings.player_speed,
            input.dt,
            self.settings.arena(),
            self.settings.player_half_size,
        );

        let doctor = self.doctor.position;
        for patient in self.patients.iter_mut() {
            if patient.is_resolved() {
                continue;
            }
            let touching = overlaps(
                doctor,
                self.settings.player_half_size,
                patient.position,
                self.settings.patient_half_size,
            );
            let transition = if touching {
                patient.heal(self.settings.max_health)
            } else {
                patient.decay(self.settings.decay_per_tick)
            };
            let Some(transition) = transition else {
                continue;
            };
            self.score.record(transition);
            let event = match transition {
                Transition::Saved => WardEvent::Saved(patient.id),
                Transition::Lost => WardEvent::Lost(patient.id),
            };
            debug!("{:?}", event);
            self.events.push(event);
        }

        let total = self.total_patients();
        if self.settings.end_when_all_resolved
            && total > 0
            && self.score.resolved() as usize >= total
        {
            self.finish(RoundEnd::AllResolved);
        }
    }

    fn finish(&mut self, reason: RoundEnd) {
        self.ended_by = Some(reason);
        info!(
            "Round over ({:?}): {}, save rate {}%",
            reason,
            self.score,
            self.save_rate()
        );
        self.enter(Phase::Ended);
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.events.push(WardEvent::PhaseChanged(phase));
    }

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.patients.clear();
        self.events.push(WardEvent::Cleared);
        self.score = Scoreboard::default();
        self.clock.reset();
        if let Some(timer) = self.spawner.as_mut() {
            timer.reset();
        }
        self.ended_by = None;
        self.doctor = Doctor::default();
        self.admit_initial_batch(rng);
    }

    fn admit_initial_batch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for _ in 0..self.settings.initial_patients {
            self.admit(rng);
        }
    }

    fn admit<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // ids keep counting across restarts so none is ever reused
        let id = PatientId(self.next_id);
        self.next_id += 1;
        let patient = Patient::admit(id, rng, &self.settings);
        debug!(
            "Patient {:?} admitted at {} with health {}",
            id, patient.position, patient.health
        );
        self.patients.push(patient);
        self.events.push(WardEvent::Admitted(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::settings::Variant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const DT: f32 = 1.0 / 60.0;

    fn still() -> TickInput {
        TickInput {
            dt: DT,
            direction: Vec2::ZERO,
        }
    }

    /// Untimed ward with no spawning and the doctor parked in a corner,
    /// well away from any spawn.
    fn untimed(patients: usize) -> (Ward, StdRng) {
        let settings = RushSettings {
            initial_patients: patients,
            ..RushSettings::from_variant(Variant::Untimed)
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut ward = Ward::new(settings, &mut rng);
        ward.doctor.position = Vec2::new(-600.0, 400.0);
        (ward, rng)
    }

    fn assert_latches_hold(ward: &Ward) {
        for p in ward.patients() {
            assert!(!(p.is_saved() && p.is_dead()), "{:?} both saved and dead", p.id);
        }
        assert!(ward.score().resolved() as usize <= ward.total_patients());
    }

    #[test]
    fn welcome_is_frozen_until_activated() {
        let (mut ward, mut rng) = untimed(3);
        let before: Vec<f32> = ward.patients().iter().map(|p| p.health).collect();
        for _ in 0..100 {
            ward.tick(still(), &mut rng);
        }
        let after: Vec<f32> = ward.patients().iter().map(|p| p.health).collect();
        assert_eq!(before, after);
        assert_eq!(ward.phase(), Phase::Welcome);
        assert_eq!(ward.clock().elapsed(), 0.0);
    }

    #[test]
    fn activation_is_ignored_while_active() {
        let (mut ward, mut rng) = untimed(3);
        assert!(ward.activate(&mut rng));
        let ids: Vec<PatientId> = ward.patients().iter().map(|p| p.id).collect();
        assert!(!ward.activate(&mut rng));
        assert_eq!(ward.phase(), Phase::Active);
        let again: Vec<PatientId> = ward.patients().iter().map(|p| p.id).collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn unattended_ward_loses_everyone_then_ends() {
        let (mut ward, mut rng) = untimed(10);
        ward.activate(&mut rng);
        let mut ticks = 0;
        while ward.phase() == Phase::Active {
            ward.tick(still(), &mut rng);
            assert_latches_hold(&ward);
            ticks += 1;
            assert!(ticks < 1000, "round never ended");
        }
        assert_eq!(ward.phase(), Phase::Ended);
        assert_eq!(ward.ended_by(), Some(RoundEnd::AllResolved));
        assert!(ward.patients().iter().all(Patient::is_dead));
        assert_eq!(ward.score().saved(), 0);
        assert_eq!(ward.score().lost(), 10);
        assert_eq!(ward.save_rate(), 0);
        assert_eq!(ward.performance(), PerformanceTier::KeepGoing);
    }

    #[test]
    fn healed_patient_stays_saved() {
        let (mut ward, mut rng) = untimed(2);
        ward.patients[0].position = Vec2::new(-300.0, 0.0);
        ward.patients[0].health = 50.0;
        ward.patients[1].position = Vec2::new(300.0, 0.0);
        ward.patients[1].health = 50.0;
        ward.activate(&mut rng);
        for _ in 0..9 {
            ward.tick(still(), &mut rng);
        }
        assert!(!ward.patients[0].is_resolved());

        ward.doctor.position = ward.patients[0].position;
        ward.tick(still(), &mut rng);
        assert!(ward.patients[0].is_saved());
        assert_eq!(ward.score().saved(), 1);

        for _ in 0..50 {
            ward.tick(still(), &mut rng);
        }
        let patient = &ward.patients()[0];
        assert!(patient.is_saved());
        assert!(!patient.is_dead());
        assert_eq!(patient.health, 100.0);
        assert_eq!(ward.score().saved(), 1);
        assert_eq!(ward.score().lost(), 0);
        assert_eq!(ward.phase(), Phase::Active);
    }

    #[test]
    fn repeated_overlap_counts_once() {
        let (mut ward, mut rng) = untimed(2);
        ward.patients[0].position = Vec2::new(-300.0, 0.0);
        ward.patients[1].position = Vec2::new(300.0, 0.0);
        let target = ward.patients[0].id;
        ward.activate(&mut rng);
        ward.doctor.position = Vec2::new(-300.0, 0.0);
        for _ in 0..20 {
            ward.tick(still(), &mut rng);
        }
        assert_eq!(ward.score().saved(), 1);
        assert_eq!(ward.patient(target).map(|p| p.health), Some(100.0));
        let saved: Vec<_> = ward
            .drain_events()
            .filter(|e| matches!(e, WardEvent::Saved(_)))
            .collect();
        assert_eq!(saved, vec![WardEvent::Saved(target)]);
    }

    #[test]
    fn resolution_latches_are_monotonic() {
        let (mut ward, mut rng) = untimed(6);
        for (i, patient) in ward.patients.iter_mut().enumerate() {
            patient.position = Vec2::new(-500.0 + 200.0 * i as f32, 0.0);
        }
        ward.activate(&mut rng);
        ward.doctor.position = ward.patients[2].position;
        let mut resolved: HashSet<(PatientId, bool)> = HashSet::new();
        while ward.phase() == Phase::Active {
            ward.tick(still(), &mut rng);
            for p in ward.patients() {
                for &(id, saved) in &resolved {
                    if id == p.id {
                        assert_eq!(p.is_saved(), saved);
                        assert_eq!(p.is_dead(), !saved);
                    }
                }
                if p.is_resolved() {
                    resolved.insert((p.id, p.is_saved()));
                }
            }
            assert_latches_hold(&ward);
        }
        assert_eq!(resolved.len(), 6);
        assert_eq!(ward.score().saved(), 1);
        assert_eq!(ward.score().lost(), 5);
    }

    #[test]
    fn countdown_ends_round_with_patients_outstanding() {
        let settings = RushSettings {
            seed: Some(5),
            ..RushSettings::from_variant(Variant::Timed)
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut ward = Ward::new(settings, &mut rng);
        ward.doctor.position = Vec2::new(-600.0, 400.0);
        ward.activate(&mut rng);
        let input = TickInput {
            dt: 0.5,
            direction: Vec2::ZERO,
        };
        for _ in 0..59 {
            ward.tick(input, &mut rng);
            assert_eq!(ward.phase(), Phase::Active);
        }
        ward.tick(input, &mut rng);
        assert_eq!(ward.phase(), Phase::Ended);
        assert_eq!(ward.ended_by(), Some(RoundEnd::TimeUp));
        assert!(ward.clock().expired());
        // 5 initial + one every 2s for 29.5s of play
        assert_eq!(ward.total_patients(), 5 + 14);
        assert!(ward.patients().iter().any(|p| !p.is_resolved()));
    }

    #[test]
    fn spawning_keeps_timed_round_open_after_everyone_resolves() {
        let settings = RushSettings {
            initial_patients: 1,
            initial_health: (1, 1),
            ..RushSettings::from_variant(Variant::Timed)
        };
        let mut rng = StdRng::seed_from_u64(9);
        let mut ward = Ward::new(settings, &mut rng);
        ward.doctor.position = Vec2::new(-600.0, 400.0);
        ward.activate(&mut rng);
        for _ in 0..20 {
            ward.tick(still(), &mut rng);
        }
        assert_eq!(ward.score().lost(), 1);
        assert_eq!(ward.total_patients(), 1);
        assert_eq!(ward.phase(), Phase::Active);
    }

    #[test]
    fn restart_resets_round_and_replaces_patients() {
        let settings = RushSettings::from_variant(Variant::Timed);
        let mut rng = StdRng::seed_from_u64(21);
        let mut ward = Ward::new(settings, &mut rng);
        ward.activate(&mut rng);
        let input = TickInput {
            dt: 0.25,
            direction: Vec2::new(1.0, 1.0),
        };
        while ward.phase() == Phase::Active {
            ward.tick(input, &mut rng);
        }
        let old_ids: HashSet<PatientId> = ward.patients().iter().map(|p| p.id).collect();
        ward.drain_events().for_each(drop);

        assert!(ward.activate(&mut rng));
        assert_eq!(ward.phase(), Phase::Active);
        assert_eq!(*ward.score(), Scoreboard::default());
        assert_eq!(ward.clock().remaining(), Some(30.0));
        assert_eq!(ward.ended_by(), None);
        assert_eq!(ward.doctor().position, Vec2::ZERO);
        assert_eq!(ward.total_patients(), 5);
        assert!(ward.patients().iter().all(|p| !old_ids.contains(&p.id)));

        let events: Vec<WardEvent> = ward.drain_events().collect();
        assert_eq!(events.first(), Some(&WardEvent::Cleared));
        assert_eq!(events.last(), Some(&WardEvent::PhaseChanged(Phase::Active)));
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, WardEvent::Admitted(_)))
                .count(),
            5
        );
    }

    #[test]
    fn death_tick_matches_decay_rate() {
        let (mut ward, mut rng) = untimed(1);
        ward.patients[0].health = 25.0;
        ward.activate(&mut rng);
        let mut ticks = 0;
        while !ward.patients[0].is_dead() {
            ward.tick(still(), &mut rng);
            ticks += 1;
        }
        assert!((250..=251).contains(&ticks), "died after {ticks} ticks");
    }
}
