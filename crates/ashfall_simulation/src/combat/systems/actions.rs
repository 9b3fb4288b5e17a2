//! Action state machine systems: controller intents + animation notifies.

use bevy::prelude::*;

use crate::combat::{
    can_arm, can_attack, can_disarm, can_dodge, can_pick_up, ActionConfig, ActionIntent, ActionRequest, ActionState,
    AnimNotify, AnimationNotify, AnimationSet, EquipState, EquippedWeapon, FrameTransitions, OverlappingItem,
    PlayAnimation, Weapon, WeaponEquipped, WeaponPickup, WeaponSocket,
};
use crate::components::{CombatMovement, MovementIntent, Stamina};
use crate::DeterministicRng;

/// Система: обработка ActionIntent (attack / dodge / interact)
///
/// Guards отклоняют молча (debug log). Нет animation segment → запрос
/// пропускается без смены состояния. Не больше одного перехода за тик.
#[allow(clippy::type_complexity, clippy::too_many_arguments)]
pub fn process_action_intents(
    mut commands: Commands,
    mut intents: EventReader<ActionIntent>,
    mut combatants: Query<(
        &mut ActionState,
        &mut EquipState,
        &mut Stamina,
        &mut CombatMovement,
        &mut OverlappingItem,
        &ActionConfig,
        &AnimationSet,
        Option<&MovementIntent>,
        Option<&EquippedWeapon>,
    )>,
    mut weapons: Query<&mut Weapon>,
    pickups: Query<(), With<WeaponPickup>>,
    mut transitions: ResMut<FrameTransitions>,
    mut rng: ResMut<DeterministicRng>,
    mut play_events: EventWriter<PlayAnimation>,
    mut equipped_events: EventWriter<WeaponEquipped>,
) {
    for intent in intents.read() {
        let entity = intent.entity;
        let Ok((mut state, mut equip, mut stamina, mut combat_movement, mut overlapping, config, animations, movement, equipped)) =
            combatants.get_mut(entity)
        else {
            continue;
        };

        if state.is_dead() {
            continue;
        }
        if transitions.contains(entity) {
            crate::logger::log(&format!("{:?}: {:?} dropped, already transitioned this tick", entity, intent.request));
            continue;
        }

        match intent.request {
            ActionRequest::Attack => {
                if !can_attack(*state, *equip) {
                    crate::logger::log(&format!("{:?}: attack rejected ({:?}, {:?})", entity, *state, *equip));
                    continue;
                }
                let intent_axis = movement.map(|m| m.0).unwrap_or(Vec2::ZERO);
                let Some(segment) = animations.attack_segment(intent_axis, config.strafe_threshold, &mut rng.rng) else {
                    crate::logger::log(&format!("{:?}: no attack segment, skipped", entity));
                    continue;
                };

                *state = ActionState::Attacking;
                transitions.mark(entity);
                crate::logger::log(&format!("⚔️ {:?}: Idle → Attacking ({})", entity, segment.section));
                play_events.write(PlayAnimation { entity, segment });
            }

            ActionRequest::Dodge => {
                if !can_dodge(*state, &stamina, config.dodge_cost) {
                    crate::logger::log(&format!(
                        "{:?}: dodge rejected ({:?}, stamina {:.1}, cost {:.1})",
                        entity, *state, stamina.current, config.dodge_cost
                    ));
                    continue;
                }
                let Some(segment) = animations.dodge_segment() else {
                    crate::logger::log(&format!("{:?}: no dodge segment, skipped", entity));
                    continue;
                };

                // Stamina списывается сразу, не по завершении
                stamina.consume(config.dodge_cost);
                *state = ActionState::Dodging;
                transitions.mark(entity);
                crate::logger::log(&format!(
                    "💨 {:?}: Idle → Dodging (stamina left {:.1})",
                    entity, stamina.current
                ));
                play_events.write(PlayAnimation { entity, segment });
            }

            ActionRequest::Interact => {
                let pickup = overlapping.0.filter(|item| pickups.contains(*item));

                if let Some(new_weapon) = pickup {
                    if !can_pick_up(*state, config.pickup_policy) {
                        crate::logger::log(&format!("{:?}: pickup rejected in {:?}", entity, *state));
                        continue;
                    }

                    let Ok(mut weapon) = weapons.get_mut(new_weapon) else {
                        continue;
                    };
                    weapon.attach(entity, WeaponSocket::Hand);

                    // Старое оружие уничтожается
                    let replaced = equipped.map(|e| e.0).filter(|old| *old != new_weapon);
                    if let Some(old_weapon) = replaced {
                        if let Ok(mut entity_commands) = commands.get_entity(old_weapon) {
                            entity_commands.despawn();
                        }
                    }
                    commands.entity(new_weapon).remove::<WeaponPickup>();
                    commands.entity(entity).insert(EquippedWeapon(new_weapon));

                    *equip = EquipState::ArmedOneHanded;
                    combat_movement.set_if_neq(CombatMovement(true));
                    overlapping.set_if_neq(OverlappingItem(None));

                    crate::logger::log_info(&format!(
                        "🗡️ {:?} picked up {:?} (replaced {:?})",
                        entity, new_weapon, replaced
                    ));
                    equipped_events.write(WeaponEquipped {
                        entity,
                        weapon: new_weapon,
                        replaced,
                    });
                    continue;
                }

                let has_weapon = equipped.is_some_and(|e| weapons.contains(e.0));

                if can_disarm(*state, *equip, has_weapon) {
                    let Some(segment) = animations.unequip_segment() else {
                        crate::logger::log(&format!("{:?}: no unequip segment, skipped", entity));
                        continue;
                    };
                    *equip = EquipState::Unarmed;
                    *state = ActionState::Equipping;
                    transitions.mark(entity);
                    crate::logger::log(&format!("{:?}: Idle → Equipping (disarm)", entity));
                    play_events.write(PlayAnimation { entity, segment });
                } else if can_arm(*state, *equip, has_weapon) {
                    let Some(segment) = animations.equip_segment() else {
                        crate::logger::log(&format!("{:?}: no equip segment, skipped", entity));
                        continue;
                    };
                    *equip = EquipState::ArmedOneHanded;
                    *state = ActionState::Equipping;
                    transitions.mark(entity);
                    crate::logger::log(&format!("{:?}: Idle → Equipping (arm)", entity));
                    play_events.write(PlayAnimation { entity, segment });
                } else {
                    crate::logger::log(&format!("{:?}: interact rejected ({:?}, {:?})", entity, *state, *equip));
                }
            }
        }
    }
}

/// Система: animation notifies от presentation
///
/// Completion signals идемпотентны: сигнал для не-текущего состояния = no-op.
pub fn process_animation_notifies(
    mut notifies: EventReader<AnimationNotify>,
    mut combatants: Query<(&mut ActionState, &EquipState, &mut CombatMovement, Option<&EquippedWeapon>)>,
    mut weapons: Query<&mut Weapon>,
    mut transitions: ResMut<FrameTransitions>,
) {
    for event in notifies.read() {
        let entity = event.entity;
        let Ok((mut state, equip, mut combat_movement, equipped)) = combatants.get_mut(entity) else {
            continue;
        };
        let mut weapon = equipped.and_then(|e| weapons.get_mut(e.0).ok());

        let finished = match event.notify {
            AnimNotify::AttackFinished => Some(ActionState::Attacking),
            AnimNotify::DodgeFinished => Some(ActionState::Dodging),
            AnimNotify::EquipFinished => Some(ActionState::Equipping),
            AnimNotify::HitReactionFinished => Some(ActionState::HitReaction),
            AnimNotify::SwingWindowOpened => {
                // Устаревший notify после прерванного swing не открывает окно
                if *state == ActionState::Attacking {
                    if let Some(weapon) = weapon.as_mut() {
                        weapon.set_collision(true);
                    }
                }
                None
            }
            AnimNotify::SwingWindowClosed => {
                if let Some(weapon) = weapon.as_mut() {
                    weapon.set_collision(false);
                }
                None
            }
            // Socket signals действуют только внутри своего unequip/equip
            // сегмента: после pickup запоздалый sheath не трогает новое оружие
            AnimNotify::WeaponSheathed => {
                if *state == ActionState::Equipping && !equip.is_armed() {
                    if let Some(weapon) = weapon.as_mut() {
                        weapon.socket = WeaponSocket::Back;
                    }
                }
                None
            }
            AnimNotify::WeaponDrawn => {
                if *state == ActionState::Equipping && equip.is_armed() {
                    if let Some(weapon) = weapon.as_mut() {
                        weapon.socket = WeaponSocket::Hand;
                    }
                }
                None
            }
        };

        let Some(expected) = finished else {
            continue;
        };
        // Completion signals не гейтятся, только отмечаются
        if !state.finish(expected) {
            continue;
        }
        transitions.mark(entity);
        crate::logger::log(&format!("{:?}: {:?} → Idle", entity, expected));

        match expected {
            ActionState::Attacking => {
                if let Some(weapon) = weapon.as_mut() {
                    weapon.set_collision(false);
                }
            }
            ActionState::Equipping => {
                combat_movement.set_if_neq(CombatMovement(equip.is_armed()));
            }
            _ => {}
        }
    }
}
