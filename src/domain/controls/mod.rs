use crate::domain::simulation::{ActivateRound, MoveIntent, RushSettings};
use bevy::prelude::*;

#[derive(Resource)]
pub struct Keybinds {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub activate: KeyCode,
    pub help: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            up: KeyCode::ArrowUp,
            down: KeyCode::ArrowDown,
            left: KeyCode::ArrowLeft,
            right: KeyCode::ArrowRight,
            activate: KeyCode::Space,
            help: KeyCode::KeyH,
        }
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>().add_systems(
            Update,
            (steer_doctor, activation_trigger, help_toggle),
        );
    }
}

/// Folds held keys into a direction; each axis is set independently so
/// diagonals move at full speed on both.
fn direction_from_keys(keys: &ButtonInput<KeyCode>, keybinds: &Keybinds) -> Vec2 {
    let mut dir = Vec2::ZERO;

    if keys.pressed(keybinds.up) || keys.pressed(KeyCode::KeyW) {
        dir.y += 1.0;
    }
    if keys.pressed(keybinds.down) || keys.pressed(KeyCode::KeyS) {
        dir.y -= 1.0;
    }
    if keys.pressed(keybinds.left) || keys.pressed(KeyCode::KeyA) {
        dir.x -= 1.0;
    }
    if keys.pressed(keybinds.right) || keys.pressed(KeyCode::KeyD) {
        dir.x += 1.0;
    }
    dir
}

fn steer_doctor(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut intent: ResMut<MoveIntent>,
) {
    let dir = direction_from_keys(&keys, &keybinds);
    if intent.0 != dir {
        intent.0 = dir;
    }
}

fn activation_trigger(
    mut ev_activate: EventWriter<ActivateRound>,
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keybinds: Res<Keybinds>,
) {
    if buttons.just_pressed(MouseButton::Left)
        || keys.just_pressed(keybinds.activate)
        || keys.just_pressed(KeyCode::Enter)
    {
        ev_activate.send(ActivateRound);
    }
}

fn help_toggle(
    mut settings: ResMut<RushSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.help) {
        settings.show_help = !settings.show_help;
    }
}
