//! AI behavior FSM system (sensing, timers, radius checks, transitions).

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::ai::patrol::{choose_patrol_target, random_delay};
use crate::ai::{AiBehavior, AiConfig, AiTimer, EnemyState, EnemyStateChanged, PawnSeen, PatrolRoute, ScheduledEvents, StatusIndicator};
use crate::combat::{ActionIntent, ActionRequest, ActionState, Dead};
use crate::components::{Actor, Engageable, Health, MovementCommand};
use crate::DeterministicRng;

/// Mutable view of one AI combatant for the duration of a tick.
struct Agent<'w> {
    entity: Entity,
    behavior: Mut<'w, AiBehavior>,
    config: &'w AiConfig,
    timers: Mut<'w, ScheduledEvents>,
    route: Mut<'w, PatrolRoute>,
    command: Mut<'w, MovementCommand>,
    indicator: Mut<'w, StatusIndicator>,
}

impl Agent<'_> {
    /// Side effects of entering `next`.
    fn enter<R: Rng>(&mut self, next: EnemyState, rng: &mut R) {
        match next {
            EnemyState::Patrolling => {
                // Потеря интереса: цель сброшена, сразу новый waypoint
                self.behavior.combat_target = None;
                self.indicator.set_if_neq(StatusIndicator { visible: false });
                self.timers.clear();
                self.move_to_next_waypoint(rng);
            }
            EnemyState::Chasing => {
                self.timers.clear();
                self.indicator.set_if_neq(StatusIndicator { visible: true });
                if let Some(target) = self.behavior.combat_target {
                    self.command.set_if_neq(MovementCommand::Follow {
                        target,
                        speed: self.config.chase_speed,
                        acceptance_radius: self.config.acceptance_radius,
                    });
                }
            }
            EnemyState::Attacking => {
                self.timers.clear();
                self.arm_attack(rng);
                if let Some(target) = self.behavior.combat_target {
                    self.command.set_if_neq(MovementCommand::HoldFacing { target });
                }
            }
            EnemyState::Engaged => {
                self.timers.clear();
            }
            EnemyState::Dead => {}
        }
        self.behavior.state = next;
    }

    fn arm_attack<R: Rng>(&mut self, rng: &mut R) {
        let delay = random_delay(self.config.attack_delay_min, self.config.attack_delay_max, rng);
        self.timers.arm(AiTimer::AttackDelay, delay);
    }

    fn move_to_next_waypoint<R: Rng>(&mut self, rng: &mut R) {
        let Some(index) = choose_patrol_target(&self.route, rng) else {
            self.command.set_if_neq(MovementCommand::Idle);
            return;
        };
        self.route.current = Some(index);
        let target = self.route.waypoints[index].position;
        self.command.set_if_neq(MovementCommand::MoveTo {
            target,
            speed: self.config.patrol_speed,
            acceptance_radius: self.config.acceptance_radius,
        });
    }

    /// Patrolling without a transition: arrival → wait timer, fire → next waypoint.
    fn patrol_step<R: Rng>(&mut self, position: Vec3, fired: &[AiTimer], rng: &mut R) {
        if fired.contains(&AiTimer::PatrolWait) || self.route.current.is_none() {
            self.move_to_next_waypoint(rng);
            return;
        }

        let Some(waypoint) = self.route.current_waypoint() else {
            return;
        };
        let arrived = position.distance(waypoint.position) <= self.config.acceptance_radius;

        if arrived && !self.timers.is_armed(AiTimer::PatrolWait) {
            let wait = random_delay(self.config.patrol_wait_min, self.config.patrol_wait_max, rng);
            crate::logger::log(&format!(
                "🚩 {:?} reached waypoint '{}', waiting {:.2}s",
                self.entity, waypoint.name, wait
            ));
            self.timers.arm(AiTimer::PatrolWait, wait);
            self.command.set_if_neq(MovementCommand::Idle);
        }
    }
}

/// Where a (re)evaluation lands given the distance to the combat target.
///
/// No target (or dead/vanished) and beyond-combat-radius both mean "lose
/// interest".
pub fn evaluate_engagement(config: &AiConfig, target_distance: Option<f32>) -> EnemyState {
    match target_distance {
        None => EnemyState::Patrolling,
        Some(distance) if distance > config.combat_radius => EnemyState::Patrolling,
        Some(distance) if distance <= config.attack_radius => EnemyState::Attacking,
        Some(_) => EnemyState::Chasing,
    }
}

/// Система: AI FSM update
///
/// Один проход на entity за тик, не более одного перехода:
/// 1. Тикаем таймеры (fired события обрабатываются в этом же тике)
/// 2. Action state Attacking/HitReaction → Engaged (retargeting и атаки подавлены)
/// 3. Иначе логика текущего состояния (sensing только в Patrolling)
#[allow(clippy::type_complexity)]
pub fn ai_behavior_update(
    mut seen_events: EventReader<PawnSeen>,
    mut ai_query: Query<
        (
            Entity,
            &mut AiBehavior,
            &AiConfig,
            &mut ScheduledEvents,
            &mut PatrolRoute,
            &mut MovementCommand,
            &mut StatusIndicator,
            &ActionState,
            &Transform,
            &Actor,
        ),
        Without<Dead>,
    >,
    pawns: Query<(&Transform, &Actor, Option<&Health>, Has<Engageable>)>,
    mut intents: EventWriter<ActionIntent>,
    mut state_changes: EventWriter<EnemyStateChanged>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    // observer → увиденные pawns (в порядке событий)
    let mut sightings: HashMap<Entity, Vec<Entity>> = HashMap::new();
    for event in seen_events.read() {
        sightings.entry(event.observer).or_default().push(event.pawn);
    }

    for (entity, behavior, config, timers, route, command, indicator, action, transform, actor) in ai_query.iter_mut() {
        if behavior.is_dead() || action.is_dead() {
            continue;
        }

        let position = transform.translation;
        let mut agent = Agent {
            entity,
            behavior,
            config,
            timers,
            route,
            command,
            indicator,
        };
        let fired = agent.timers.tick(delta);

        // Дистанция до живой цели (None: нет цели, умерла или despawned)
        let target_distance = agent.behavior.combat_target.and_then(|target| {
            let (target_transform, _, health, _) = pawns.get(target).ok()?;
            let alive = health.is_none_or(|h| h.is_alive());
            alive.then(|| position.distance(target_transform.translation))
        });

        let from = agent.behavior.state;
        let next = match from {
            EnemyState::Engaged if action.is_committed() => None,
            EnemyState::Engaged => Some(evaluate_engagement(config, target_distance)),
            _ if action.is_committed() => Some(EnemyState::Engaged),

            EnemyState::Patrolling => {
                if target_distance.is_some() && evaluate_engagement(config, target_distance) != EnemyState::Patrolling {
                    // Цель назначена извне патруля (получили урон)
                    Some(evaluate_engagement(config, target_distance))
                } else {
                    if agent.behavior.combat_target.is_some() {
                        agent.behavior.combat_target = None;
                        agent.indicator.set_if_neq(StatusIndicator { visible: false });
                    }

                    let spotted = sightings.get(&entity).and_then(|seen| {
                        seen.iter().copied().find(|&pawn| {
                            pawn != entity
                                && Some(pawn) != agent.behavior.combat_target
                                && pawns.get(pawn).is_ok_and(|(_, pawn_actor, health, engageable)| {
                                    engageable
                                        && pawn_actor.faction_id != actor.faction_id
                                        && health.is_none_or(|h| h.is_alive())
                                })
                        })
                    });

                    match spotted {
                        Some(pawn) => {
                            crate::logger::log(&format!("👁️ {:?} spotted {:?}", entity, pawn));
                            agent.behavior.combat_target = Some(pawn);
                            Some(EnemyState::Chasing)
                        }
                        None => {
                            agent.patrol_step(position, &fired, &mut rng.rng);
                            None
                        }
                    }
                }
            }

            EnemyState::Chasing => match evaluate_engagement(config, target_distance) {
                EnemyState::Chasing => {
                    if let Some(target) = agent.behavior.combat_target {
                        agent.command.set_if_neq(MovementCommand::Follow {
                            target,
                            speed: config.chase_speed,
                            acceptance_radius: config.acceptance_radius,
                        });
                    }
                    None
                }
                other => Some(other),
            },

            EnemyState::Attacking => match evaluate_engagement(config, target_distance) {
                EnemyState::Attacking => {
                    if fired.contains(&AiTimer::AttackDelay) {
                        intents.write(ActionIntent {
                            entity,
                            request: ActionRequest::Attack,
                        });
                        agent.arm_attack(&mut rng.rng);
                    } else if !agent.timers.is_armed(AiTimer::AttackDelay) {
                        agent.arm_attack(&mut rng.rng);
                    }
                    None
                }
                other => Some(other),
            },

            EnemyState::Dead => None,
        };

        let Some(next) = next else {
            continue;
        };

        // Engaged → Attacking и т.п. через enter(); Patrolling → Patrolling не переход
        if next == from {
            continue;
        }

        agent.enter(next, &mut rng.rng);
        crate::logger::log(&format!("🤖 AI {:?}: {:?} → {:?}", entity, from, next));
        state_changes.write(EnemyStateChanged { entity, from, to: next });
    }
}
