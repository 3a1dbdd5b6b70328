//! Authoritative round state: patients, scoring, clock and the phase machine.
//!
//! The gameplay kernel lives in plain types ([`Ward`] and friends) so it can be
//! ticked without an `App`. [`SimPlugin`] wires it into Bevy: activation is
//! applied in `Update`, gameplay ticks run in `FixedUpdate`, and the ward's
//! phase is mirrored into `State<Phase>` for run conditions.

pub mod clock;
pub mod entities;
pub mod health;
pub mod scoring;
pub mod settings;
pub mod ward;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use clock::{format_clock, RoundClock};
pub use entities::{Doctor, Patient, PatientId};
pub use health::Severity;
pub use scoring::{PerformanceTier, Scoreboard};
pub use settings::{RushSettings, SettingsError, Variant, DEFAULT_TICK_HZ};
pub use ward::{RoundEnd, TickInput, Ward, WardEvent};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Welcome,
    Active,
    Ended,
}

/// Start / play-again trigger relayed from input or UI.
#[derive(Event, Default)]
pub struct ActivateRound;

/// Directional input for the doctor, each axis in `-1.0..=1.0`.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct MoveIntent(pub Vec2);

#[derive(Resource)]
pub struct RushRng(pub StdRng);

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        let tick_hz = app
            .world()
            .get_resource::<RushSettings>()
            .map_or(DEFAULT_TICK_HZ, |settings| settings.tick_hz);

        app.init_resource::<RushSettings>()
            .init_resource::<MoveIntent>()
            .init_state::<Phase>()
            .insert_resource(Time::<Fixed>::from_hz(tick_hz))
            .add_event::<ActivateRound>()
            .add_event::<WardEvent>()
            .add_systems(Startup, open_ward)
            .add_systems(FixedUpdate, advance_ward.run_if(in_state(Phase::Active)))
            .add_systems(
                Update,
                (handle_activation, publish_ward_events, sync_phase).chain(),
            );
    }
}

fn open_ward(mut commands: Commands, settings: Res<RushSettings>) {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let ward = Ward::new(settings.clone(), &mut rng);
    info!(
        "Ward open: {:?} variant, {} patients waiting",
        settings.variant,
        ward.total_patients()
    );
    commands.insert_resource(ward);
    commands.insert_resource(RushRng(rng));
}

fn advance_ward(
    time: Res<Time>,
    intent: Res<MoveIntent>,
    mut ward: ResMut<Ward>,
    mut rng: ResMut<RushRng>,
) {
    let input = TickInput {
        dt: time.delta_seconds(),
        direction: intent.0,
    };
    ward.tick(input, &mut rng.0);
}

fn handle_activation(
    mut ev_activate: EventReader<ActivateRound>,
    mut ward: ResMut<Ward>,
    mut rng: ResMut<RushRng>,
) {
    // a click and a button press can land in the same frame; count it once
    if ev_activate.is_empty() {
        return;
    }
    ev_activate.clear();
    ward.activate(&mut rng.0);
}

fn publish_ward_events(mut ward: ResMut<Ward>, mut ev_ward: EventWriter<WardEvent>) {
    for event in ward.drain_events() {
        ev_ward.send(event);
    }
}

fn sync_phase(
    ward: Res<Ward>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
) {
    if *phase.get() != ward.phase() {
        next_phase.set(ward.phase());
    }
}
