mod domain;

use bevy::prelude::*;
use clap::Parser;
use domain::{InputPlugin, RushSettings, SimPlugin, UiPlugin, Variant};

/// Steer the doctor across the ward and heal patients before they succumb.
#[derive(Parser, Debug)]
#[command(name = "ward-rush", version, about)]
struct Cli {
    /// Round rules to play.
    #[arg(long, value_enum, default_value_t = Variant::Timed)]
    variant: Variant,

    /// Seed for patient placement and health rolls.
    #[arg(long)]
    seed: Option<u64>,

    /// Round length in seconds (timed variant only).
    #[arg(long)]
    duration: Option<f32>,

    /// Patients admitted at round start.
    #[arg(long)]
    patients: Option<usize>,
}

impl Cli {
    fn into_settings(self) -> RushSettings {
        let mut settings = RushSettings::from_variant(self.variant);
        settings.seed = self.seed;
        if let Some(patients) = self.patients {
            settings.initial_patients = patients;
        }
        if let Some(duration) = self.duration {
            if settings.round_duration.is_some() {
                settings.round_duration = Some(duration);
            }
        }
        settings
    }
}

fn main() {
    let settings = Cli::parse().into_settings();
    if let Err(err) = settings.validate() {
        eprintln!("ward-rush: invalid settings: {err}");
        std::process::exit(2);
    }

    let arena = settings.arena().size();
    App::new()
        .insert_resource(ClearColor(Color::srgb_u8(173, 216, 230)))
        .insert_resource(Msaa::Sample4)
        .insert_resource(settings)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ward Rush".into(),
                resolution: (arena.x, arena.y).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((SimPlugin, UiPlugin, InputPlugin))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2dBundle::default(), MainCamera));
}

#[derive(Component)]
pub struct MainCamera;
