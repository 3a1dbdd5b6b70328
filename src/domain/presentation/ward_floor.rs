//! Sprites for the doctor and patients.
//!
//! Gameplay records never hold engine handles. Patient sprites live in a
//! side-table keyed by [`PatientId`], filled and emptied from [`WardEvent`]s.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::collections::HashMap;

use crate::domain::simulation::{Patient, PatientId, RushSettings, Ward, WardEvent};

const BAR_WIDTH: f32 = 40.0;
const BAR_HEIGHT: f32 = 6.0;
const LOST_TINT: Color = Color::srgb(0.2, 0.2, 0.2);
const CROSS_RED: Color = Color::srgb(1.0, 0.0, 0.0);

#[derive(Component)]
pub struct DoctorSprite;

#[derive(Component)]
pub struct PatientSprite(pub PatientId);

#[derive(Component)]
pub struct HealthBarFill(pub PatientId);

#[derive(Component)]
pub struct HealthLabel(pub PatientId);

struct PatientVisual {
    body: Entity,
    /// Bar background, fill and label; dropped when the patient is lost.
    overlay: Entity,
}

#[derive(Resource, Default)]
pub struct PatientVisuals(HashMap<PatientId, PatientVisual>);

pub fn spawn_doctor(mut commands: Commands, settings: Res<RushSettings>) {
    commands
        .spawn((
            DoctorSprite,
            SpriteBundle {
                sprite: Sprite {
                    color: Color::WHITE,
                    custom_size: Some(settings.player_half_size * 2.0),
                    ..default()
                },
                transform: Transform::from_xyz(0.0, 0.0, 2.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            for size in [Vec2::new(12.0, 24.0), Vec2::new(24.0, 12.0)] {
                parent.spawn(SpriteBundle {
                    sprite: Sprite {
                        color: CROSS_RED,
                        custom_size: Some(size),
                        ..default()
                    },
                    transform: Transform::from_xyz(0.0, -6.0, 0.1),
                    ..default()
                });
            }
        });
}

fn spawn_patient_visual(
    commands: &mut Commands,
    patient: &Patient,
    settings: &RushSettings,
) -> PatientVisual {
    let id = patient.id;
    let size = settings.patient_half_size * 2.0;
    let mut overlay = Entity::PLACEHOLDER;
    let body = commands
        .spawn((
            PatientSprite(id),
            SpriteBundle {
                sprite: Sprite {
                    color: patient.severity().color(),
                    custom_size: Some(size),
                    ..default()
                },
                transform: Transform::from_translation(patient.position.extend(1.0)),
                ..default()
            },
        ))
        .with_children(|parent| {
            overlay = parent
                .spawn(SpatialBundle::from_transform(Transform::from_xyz(
                    0.0,
                    size.y * 0.5 + BAR_HEIGHT,
                    0.5,
                )))
                .with_children(|bar| {
                    bar.spawn(SpriteBundle {
                        sprite: Sprite {
                            color: Color::srgba(0.0, 0.0, 0.0, 0.2),
                            custom_size: Some(Vec2::new(BAR_WIDTH, BAR_HEIGHT)),
                            ..default()
                        },
                        ..default()
                    });
                    bar.spawn((
                        HealthBarFill(id),
                        SpriteBundle {
                            sprite: Sprite {
                                color: patient.bar_color(),
                                custom_size: Some(Vec2::new(
                                    BAR_WIDTH * patient.bar_fill(settings.max_health),
                                    BAR_HEIGHT,
                                )),
                                anchor: Anchor::CenterLeft,
                                ..default()
                            },
                            transform: Transform::from_xyz(-BAR_WIDTH * 0.5, 0.0, 0.1),
                            ..default()
                        },
                    ));
                    bar.spawn((
                        HealthLabel(id),
                        Text2dBundle {
                            text: Text::from_section(
                                health_label(patient),
                                TextStyle {
                                    font_size: 16.0,
                                    color: Color::BLACK,
                                    ..default()
                                },
                            ),
                            transform: Transform::from_xyz(0.0, 12.0, 0.1),
                            ..default()
                        },
                    ));
                })
                .id();
        })
        .id();
    PatientVisual { body, overlay }
}

fn health_label(patient: &Patient) -> String {
    format!("{}%", patient.health.round() as i32)
}

pub fn track_patients(
    mut commands: Commands,
    mut ev_ward: EventReader<WardEvent>,
    ward: Res<Ward>,
    mut visuals: ResMut<PatientVisuals>,
) {
    for event in ev_ward.read() {
        match *event {
            WardEvent::Admitted(id) => {
                let Some(patient) = ward.patient(id) else {
                    continue;
                };
                let visual = spawn_patient_visual(&mut commands, patient, ward.settings());
                visuals.0.insert(id, visual);
            }
            WardEvent::Lost(id) => {
                if let Some(visual) = visuals.0.get(&id) {
                    commands.entity(visual.overlay).despawn_recursive();
                }
            }
            WardEvent::Cleared => {
                for (_, visual) in visuals.0.drain() {
                    commands.entity(visual.body).despawn_recursive();
                }
            }
            WardEvent::Saved(_) | WardEvent::PhaseChanged(_) => {}
        }
    }
}

pub fn update_patient_visuals(
    ward: Res<Ward>,
    mut bodies: Query<(&PatientSprite, &mut Sprite), Without<HealthBarFill>>,
    mut bars: Query<(&HealthBarFill, &mut Sprite), Without<PatientSprite>>,
    mut labels: Query<(&HealthLabel, &mut Text)>,
) {
    let max_health = ward.settings().max_health;
    for (PatientSprite(id), mut sprite) in &mut bodies {
        let Some(patient) = ward.patient(*id) else {
            continue;
        };
        sprite.color = if patient.is_dead() {
            LOST_TINT
        } else {
            patient.severity().color()
        };
    }
    for (HealthBarFill(id), mut sprite) in &mut bars {
        let Some(patient) = ward.patient(*id) else {
            continue;
        };
        sprite.color = patient.bar_color();
        sprite.custom_size = Some(Vec2::new(
            BAR_WIDTH * patient.bar_fill(max_health),
            BAR_HEIGHT,
        ));
    }
    for (HealthLabel(id), mut text) in &mut labels {
        let Some(patient) = ward.patient(*id) else {
            continue;
        };
        if let Some(section) = text.sections.first_mut() {
            section.value = health_label(patient);
        }
    }
}

pub fn follow_doctor(ward: Res<Ward>, mut doctor_q: Query<&mut Transform, With<DoctorSprite>>) {
    for mut t in &mut doctor_q {
        let pos = ward.doctor().position;
        t.translation.x = pos.x;
        t.translation.y = pos.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::simulation::Variant;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world_with_ward(patients: usize) -> (World, StdRng) {
        let settings = RushSettings {
            initial_patients: patients,
            ..RushSettings::from_variant(Variant::Untimed)
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut world = World::new();
        world.insert_resource(Ward::new(settings, &mut rng));
        world.init_resource::<PatientVisuals>();
        world.init_resource::<Events<WardEvent>>();
        (world, rng)
    }

    fn flush_ward_events(world: &mut World) {
        let events: Vec<WardEvent> = world.resource_mut::<Ward>().drain_events().collect();
        let mut queue = world.resource_mut::<Events<WardEvent>>();
        for event in events {
            queue.send(event);
        }
    }

    fn run_tracking(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(track_patients);
        schedule.run(world);
    }

    #[test]
    fn side_table_follows_admissions_and_restarts() {
        let (mut world, mut rng) = world_with_ward(4);
        flush_ward_events(&mut world);
        run_tracking(&mut world);
        assert_eq!(world.resource::<PatientVisuals>().0.len(), 4);
        let mut sprites = world.query::<&PatientSprite>();
        assert_eq!(sprites.iter(&world).count(), 4);

        world.resource_mut::<Events<WardEvent>>().update();
        world.resource_mut::<Events<WardEvent>>().update();
        world.resource_scope(|_, mut ward: Mut<Ward>| {
            ward.activate(&mut rng);
            while ward.phase() == crate::domain::simulation::Phase::Active {
                ward.tick(
                    crate::domain::simulation::TickInput {
                        dt: 1.0 / 60.0,
                        direction: Vec2::ZERO,
                    },
                    &mut rng,
                );
            }
            ward.activate(&mut rng);
        });
        flush_ward_events(&mut world);
        run_tracking(&mut world);

        let ward = world.resource::<Ward>();
        let ids: Vec<PatientId> = ward.patients().iter().map(|p| p.id).collect();
        assert_eq!(world.resource::<PatientVisuals>().0.len(), 4);
        let mut sprites = world.query::<&PatientSprite>();
        let mut shown: Vec<PatientId> = sprites.iter(&world).map(|s| s.0).collect();
        shown.sort();
        assert_eq!(shown, ids);
    }

    #[test]
    fn visuals_track_decay_and_death() {
        let (mut world, mut rng) = world_with_ward(1);
        flush_ward_events(&mut world);
        run_tracking(&mut world);

        world.resource_scope(|_, mut ward: Mut<Ward>| {
            ward.activate(&mut rng);
            ward.tick(
                crate::domain::simulation::TickInput {
                    dt: 1.0 / 60.0,
                    direction: Vec2::ZERO,
                },
                &mut rng,
            );
        });
        let mut schedule = Schedule::default();
        schedule.add_systems(update_patient_visuals);
        schedule.run(&mut world);

        let (patient_id, expected, width) = {
            let ward = world.resource::<Ward>();
            let patient = &ward.patients()[0];
            (
                patient.id,
                health_label(patient),
                BAR_WIDTH * patient.bar_fill(ward.settings().max_health),
            )
        };
        let mut labels = world.query::<(&HealthLabel, &Text)>();
        let (HealthLabel(id), text) = labels.single(&world);
        assert_eq!(*id, patient_id);
        assert_eq!(text.sections[0].value, expected);
        let mut bars = world.query::<(&HealthBarFill, &Sprite)>();
        let (_, sprite) = bars.single(&world);
        assert_eq!(sprite.custom_size, Some(Vec2::new(width, BAR_HEIGHT)));
    }

    #[test]
    fn health_label_rounds() {
        let patient = Patient::new(PatientId(0), Vec2::ZERO, 42.6);
        assert_eq!(health_label(&patient), "43%");
    }
}
