//! Headless симуляция Ashfall
//!
//! Player + патрулирующий enemy, presentation заменена скриптом:
//! прямолинейное движение и анимации фиксированной длины.

use std::collections::HashMap;

use ashfall_simulation::ai::{AiBehavior, Waypoint};
use ashfall_simulation::combat::{
    ActionIntent, ActionRequest, AnimNotify, AnimationNotify, AnimationSet, MontageKind, PlayAnimation,
};
use ashfall_simulation::components::{Health, MovementCommand, MovementLocked};
use ashfall_simulation::spawn::{spawn_enemy, spawn_player, spawn_weapon_pickup};
use ashfall_simulation::{
    create_headless_app, init_logger, log, log_error, log_info, CombatProfile, SimulationPlugin, SimulationSet,
};
use bevy::prelude::*;

/// Длина любой анимации в тиках; swing window открыто с 1/3 до 2/3.
const MONTAGE_TICKS: u32 = 24;

/// Проигрываемая анимация: montage, прошедшие тики и socket signal на середине
#[derive(Debug, Clone, Copy)]
struct ScriptedMontage {
    montage: MontageKind,
    elapsed: u32,
    midpoint: Option<AnimNotify>,
}

#[derive(Resource, Default)]
struct ScriptedAnimations(HashMap<Entity, ScriptedMontage>);

fn play_scripted_animations(
    mut played: EventReader<PlayAnimation>,
    mut animations: ResMut<ScriptedAnimations>,
    mut notifies: EventWriter<AnimationNotify>,
    animation_sets: Query<&AnimationSet>,
) {
    // Упорядочиваем, чтобы порядок notifies не зависел от HashMap
    let mut running: Vec<Entity> = animations.0.keys().copied().collect();
    running.sort_by_key(|entity| entity.index());

    for entity in running {
        let Some(playing) = animations.0.get_mut(&entity) else {
            continue;
        };
        playing.elapsed += 1;
        let ScriptedMontage {
            montage,
            elapsed,
            midpoint,
        } = *playing;

        let mut notify = |notify| {
            notifies.write(AnimationNotify { entity, notify });
        };
        match montage {
            MontageKind::Attack if elapsed == MONTAGE_TICKS / 3 => notify(AnimNotify::SwingWindowOpened),
            MontageKind::Attack if elapsed == 2 * MONTAGE_TICKS / 3 => notify(AnimNotify::SwingWindowClosed),
            _ => {}
        }
        if let Some(signal) = midpoint.filter(|_| elapsed == MONTAGE_TICKS / 2) {
            notify(signal);
        }

        if elapsed >= MONTAGE_TICKS {
            match montage {
                MontageKind::Attack => notify(AnimNotify::AttackFinished),
                MontageKind::Dodge => notify(AnimNotify::DodgeFinished),
                MontageKind::Equip => notify(AnimNotify::EquipFinished),
                MontageKind::HitReact => notify(AnimNotify::HitReactionFinished),
                MontageKind::Death => {}
            }
            animations.0.remove(&entity);
        }
    }

    // Новая анимация заменяет текущую (interrupt)
    for event in played.read() {
        let midpoint = animation_sets
            .get(event.entity)
            .ok()
            .and_then(|set| set.socket_notify(&event.segment));
        animations.0.insert(
            event.entity,
            ScriptedMontage {
                montage: event.segment.montage,
                elapsed: 0,
                midpoint,
            },
        );
    }
}

fn move_straight(
    mut movers: Query<(Entity, &mut Transform, &MovementCommand), Without<MovementLocked>>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();
    let positions: HashMap<Entity, Vec3> = movers.iter().map(|(e, t, _)| (e, t.translation)).collect();

    for (_, mut transform, command) in movers.iter_mut() {
        let (target, acceptance_radius) = match *command {
            MovementCommand::MoveTo {
                target,
                acceptance_radius,
                ..
            } => (target, acceptance_radius),
            MovementCommand::Follow {
                target,
                acceptance_radius,
                ..
            } => match positions.get(&target) {
                Some(&position) => (position, acceptance_radius),
                None => continue,
            },
            _ => continue,
        };
        let speed = command.speed();

        let offset = target - transform.translation;
        let distance = offset.length();
        if distance <= acceptance_radius * 0.5 {
            continue;
        }
        transform.translation += offset / distance * (speed * dt).min(distance);
        transform.look_to(Vec3::new(offset.x, 0.0, offset.z), Vec3::Y);
    }
}

fn main() {
    let seed = 42;
    init_logger();
    log_info(&format!("Starting Ashfall headless simulation (seed: {})", seed));

    // Опциональный профиль: `ashfall_simulation path/to/profile.toml`
    let profile = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(source) => match CombatProfile::from_toml_str(&source) {
                Ok(profile) => profile,
                Err(err) => {
                    log_error(&format!("Invalid combat profile {}: {}", path, err));
                    std::process::exit(1);
                }
            },
            Err(err) => {
                log_error(&format!("Cannot read {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => CombatProfile::default(),
    };

    let mut app = create_headless_app(seed);
    app.insert_resource(profile)
        .add_plugins(SimulationPlugin)
        .init_resource::<ScriptedAnimations>()
        .add_systems(
            FixedUpdate,
            (move_straight, play_scripted_animations)
                .chain()
                .in_set(SimulationSet::Aftermath),
        );
    app.update();

    let profile = app.world().resource::<CombatProfile>().clone();
    let (player, enemy) = {
        let mut commands = app.world_mut().commands();
        spawn_weapon_pickup(&mut commands, &profile, Vec3::ZERO);
        let player = spawn_player(&mut commands, &profile, Vec3::ZERO);
        let enemy = spawn_enemy(
            &mut commands,
            &profile,
            Vec3::new(0.0, 0.0, -600.0),
            vec![
                Waypoint::new("North", Vec3::new(0.0, 0.0, -900.0)),
                Waypoint::new("South", Vec3::new(0.0, 0.0, -300.0)),
            ],
        );
        (player, enemy)
    };
    app.world_mut().flush();

    app.world_mut().send_event(ActionIntent {
        entity: player,
        request: ActionRequest::Interact,
    });

    // 1000 тиков (15.6 sec при 64Hz); player замахивается каждые 40 тиков
    for tick in 0..1000 {
        if tick == 200 {
            // Enemy замечает player
            app.world_mut().send_event(ashfall_simulation::ai::PawnSeen {
                observer: enemy,
                pawn: player,
            });
        }
        if tick > 200 && tick % 40 == 0 {
            app.world_mut().send_event(ActionIntent {
                entity: player,
                request: ActionRequest::Attack,
            });
        }

        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let health = |entity| world.get::<Health>(entity).map(|h| h.current).unwrap_or(0.0);
            let enemy_state = world.get::<AiBehavior>(enemy).map(|b| b.state);
            log(&format!(
                "Tick {}: player hp {:.0}, enemy hp {:.0}, enemy {:?}",
                tick,
                health(player),
                health(enemy),
                enemy_state
            ));
        }
    }

    log_info("Simulation complete!");
}
