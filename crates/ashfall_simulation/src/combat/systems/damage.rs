//! Damage application and death systems.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::combat::{
    classify_hit, ActionState, AnimationSet, BreakableShattered, Breakable, DamageDealt, DeathPose, EntityDied,
    EquippedWeapon, FrameTransitions, ImpactEffectRequested, MeleeHit, PlayAnimation, Weapon,
};
use crate::components::{Combatant, CombatMovement, CurrencyKind, Health, Hurtbox, MovementCommand, MovementLocked, Purse};
use crate::DeterministicRng;

/// Компонент-маркер: entity мертв (Health <= 0)
///
/// Физическая коллизия (Hurtbox) уже снята; тело остаётся до DespawnAfter.
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Система `despawn_after_timeout` проверяет время и удаляет entity.
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Система: apply damage от MeleeHit событий
///
/// Порядок применения = порядок попаданий в sweep. Урон не гейтится action
/// state: прерывает attack/dodge/equip.
/// - Выжил → собственное оружие выключается, HitReaction (направление по impact point)
/// - Умер → Dead, death pose, Hurtbox снят; player теряет движение навсегда
/// - Breakable → разбивается, gold атакующему
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn apply_melee_hits(
    mut commands: Commands,
    mut hit_events: EventReader<MeleeHit>,
    mut targets: Query<(&mut Health, &mut ActionState, &Transform, &AnimationSet, &Combatant, Option<&EquippedWeapon>)>,
    mut weapons: Query<&mut Weapon>,
    breakables: Query<&Breakable>,
    mut purses: Query<&mut Purse>,
    mut transitions: ResMut<FrameTransitions>,
    mut rng: ResMut<DeterministicRng>,
    mut damage_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
    mut play_events: EventWriter<PlayAnimation>,
    mut impact_events: EventWriter<ImpactEffectRequested>,
    mut shattered_events: EventWriter<BreakableShattered>,
) {
    let mut shattered: HashSet<Entity> = HashSet::new();

    for hit in hit_events.read() {
        impact_events.write(ImpactEffectRequested {
            target: hit.target,
            position: hit.impact_point,
        });

        if let Ok(breakable) = breakables.get(hit.target) {
            if !shattered.insert(hit.target) {
                continue;
            }
            if let Ok(mut purse) = purses.get_mut(hit.attacker) {
                purse.add(CurrencyKind::Gold, breakable.gold);
            }
            commands.entity(hit.target).remove::<(Hurtbox, Breakable)>();
            crate::logger::log_info(&format!(
                "💥 {:?} shattered {:?} (+{} gold)",
                hit.attacker, hit.target, breakable.gold
            ));
            shattered_events.write(BreakableShattered {
                entity: hit.target,
                breaker: hit.attacker,
                gold: breakable.gold,
            });
            continue;
        }

        let Ok((mut health, mut state, transform, animations, combatant, equipped)) = targets.get_mut(hit.target) else {
            continue;
        };
        if state.is_dead() {
            continue;
        }

        health.take_damage(hit.damage);
        let alive = health.is_alive();

        damage_events.write(DamageDealt {
            attacker: hit.attacker,
            target: hit.target,
            damage: hit.damage,
            impact_point: hit.impact_point,
            target_died: !alive,
        });

        // Прерванный swing больше не бьёт
        if let Some(EquippedWeapon(own_weapon)) = equipped {
            if let Ok(mut weapon) = weapons.get_mut(*own_weapon) {
                weapon.set_collision(false);
            }
        }

        if alive {
            let direction = classify_hit(transform.forward().as_vec3(), transform.translation, hit.impact_point);
            crate::logger::log(&format!(
                "🩸 {:?} took {:.1} damage {:?} (health {:.1})",
                hit.target, hit.damage, direction, health.current
            ));

            let Some(segment) = animations.hit_react_segment(direction) else {
                continue;
            };
            let from = *state;
            *state = ActionState::HitReaction;
            transitions.mark(hit.target);
            crate::logger::log(&format!("{:?}: {:?} → HitReaction", hit.target, from));
            play_events.write(PlayAnimation {
                entity: hit.target,
                segment,
            });
            continue;
        }

        // Смерть
        let from = *state;
        *state = ActionState::Dead;
        transitions.mark(hit.target);

        let mut entity_commands = commands.entity(hit.target);
        entity_commands.insert(Dead).remove::<Hurtbox>();

        if let Some((pose, segment)) = animations.death_segment(&mut rng.rng) {
            entity_commands.insert(DeathPose(pose));
            play_events.write(PlayAnimation {
                entity: hit.target,
                segment,
            });
        }

        if !combatant.is_ai() {
            entity_commands.insert((MovementLocked, MovementCommand::Stop, CombatMovement(false)));
        }

        crate::logger::log_info(&format!(
            "☠️ {:?} killed by {:?} ({:?} → Dead)",
            hit.target, hit.attacker, from
        ));
        died_events.write(EntityDied {
            entity: hit.target,
            killer: Some(hit.attacker),
        });
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(mut commands: Commands, query: Query<(Entity, &DespawnAfter)>, time: Res<Time>) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
