pub mod panels;
pub mod ward_floor;

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::simulation::{ActivateRound, Phase, RushSettings, Ward};
use panels::{show_game_over_panel, show_help_panel, show_hud_panel, show_welcome_panel};
use ward_floor::{
    follow_doctor, spawn_doctor, track_patients, update_patient_visuals, PatientVisuals,
};

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<PatientVisuals>()
            .add_systems(Startup, spawn_doctor)
            .add_systems(
                Update,
                (track_patients, update_patient_visuals, follow_doctor).chain(),
            )
            .add_systems(Update, hud_ui)
            .add_systems(Update, welcome_ui.run_if(in_state(Phase::Welcome)))
            .add_systems(Update, game_over_ui.run_if(in_state(Phase::Ended)));
    }
}

fn hud_ui(mut contexts: EguiContexts, ward: Res<Ward>, settings: Res<RushSettings>) {
    let ctx = contexts.ctx_mut();
    show_hud_panel(ctx, &ward);
    show_help_panel(ctx, &settings);
}

fn welcome_ui(mut contexts: EguiContexts, ward: Res<Ward>) {
    show_welcome_panel(contexts.ctx_mut(), &ward);
}

fn game_over_ui(
    mut contexts: EguiContexts,
    ward: Res<Ward>,
    mut ev_activate: EventWriter<ActivateRound>,
) {
    show_game_over_panel(contexts.ctx_mut(), &ward, &mut ev_activate);
}
