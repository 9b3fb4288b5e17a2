//! AI reactions to combat outcomes (damage, death, vanished targets).

use bevy::ecs::entity::Entities;
use bevy::prelude::*;

use crate::ai::{AiBehavior, AiConfig, EnemyState, EnemyStateChanged, ScheduledEvents, StatusIndicator};
use crate::combat::{DamageDealt, DespawnAfter, EntityDied, EquippedWeapon, Weapon};
use crate::components::{CurrencyKind, MovementCommand, Purse};
use crate::config::CombatProfile;

/// Система: AI получил урон (и выжил)
///
/// Атакующий становится combat target, health bar показывается, таймеры
/// сбрасываются. Состояние меняет только FSM на следующем тике.
pub fn ai_react_to_damage(
    mut damage_events: EventReader<DamageDealt>,
    mut ai_query: Query<(&mut AiBehavior, &mut ScheduledEvents, &mut StatusIndicator)>,
) {
    for event in damage_events.read() {
        if event.target_died || event.attacker == event.target {
            continue;
        }
        let Ok((mut behavior, mut timers, mut indicator)) = ai_query.get_mut(event.target) else {
            continue;
        };
        if behavior.is_dead() {
            continue;
        }

        if behavior.combat_target != Some(event.attacker) {
            crate::logger::log(&format!(
                "😠 AI {:?} hit by {:?}, retargeting",
                event.target, event.attacker
            ));
            behavior.combat_target = Some(event.attacker);
        }
        indicator.set_if_neq(StatusIndicator { visible: true });
        timers.clear();
    }
}

/// Система: смерть AI
///
/// - FSM → Dead, таймеры и health bar выключены, движение остановлено
/// - Оружие выпадает в мир как pickup (на позиции владельца)
/// - Убийца получает souls
/// - Тело удаляется через `death_lifespan`
#[allow(clippy::type_complexity)]
pub fn ai_handle_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut ai_query: Query<(
        &mut AiBehavior,
        &AiConfig,
        &mut ScheduledEvents,
        &mut StatusIndicator,
        &mut MovementCommand,
        &Transform,
        Option<&EquippedWeapon>,
    )>,
    mut weapons: Query<(&mut Weapon, &mut Transform), Without<AiBehavior>>,
    mut purses: Query<&mut Purse>,
    mut state_changes: EventWriter<EnemyStateChanged>,
    profile: Res<CombatProfile>,
    time: Res<Time>,
) {
    for event in death_events.read() {
        let Ok((mut behavior, config, mut timers, mut indicator, mut command, transform, equipped)) =
            ai_query.get_mut(event.entity)
        else {
            continue;
        };
        if behavior.is_dead() {
            continue;
        }

        let from = behavior.state;
        behavior.state = EnemyState::Dead;
        behavior.combat_target = None;
        timers.clear();
        indicator.set_if_neq(StatusIndicator { visible: false });
        command.set_if_neq(MovementCommand::Stop);
        state_changes.write(EnemyStateChanged {
            entity: event.entity,
            from,
            to: EnemyState::Dead,
        });

        // Оружие → pickup в мире
        if let Some(&EquippedWeapon(weapon_entity)) = equipped {
            if let Ok((mut weapon, mut weapon_transform)) = weapons.get_mut(weapon_entity) {
                weapon.detach();
                weapon_transform.translation = transform.translation;
                commands.entity(weapon_entity).insert(profile.weapon.pickup());
                crate::logger::log(&format!(
                    "🗡️ {:?} dropped weapon {:?} at {:?}",
                    event.entity, weapon_entity, transform.translation
                ));
            }
            commands.entity(event.entity).remove::<EquippedWeapon>();
        }

        // Награда убийце
        if let Some(killer) = event.killer {
            if let Ok(mut purse) = purses.get_mut(killer) {
                purse.add(CurrencyKind::Souls, config.soul_reward);
                crate::logger::log(&format!(
                    "💀 {:?} killed {:?}: +{} souls (total {})",
                    killer, event.entity, config.soul_reward, purse.souls
                ));
            }
        }

        commands.entity(event.entity).insert(DespawnAfter {
            despawn_time: time.elapsed_secs() + config.death_lifespan,
        });

        crate::logger::log_info(&format!("AI {:?}: {:?} → Dead", event.entity, from));
    }
}

/// Система: сброс combat target, если entity уже не существует
pub fn forget_vanished_targets(mut ai_query: Query<(Entity, &mut AiBehavior)>, entities: &Entities) {
    for (entity, mut behavior) in ai_query.iter_mut() {
        let Some(target) = behavior.combat_target else {
            continue;
        };
        if !entities.contains(target) {
            crate::logger::log(&format!("AI {:?}: target {:?} vanished", entity, target));
            behavior.combat_target = None;
        }
    }
}
