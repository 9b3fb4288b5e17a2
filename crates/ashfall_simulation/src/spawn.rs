//! Spawn helpers: player, enemy (с оружием), pickups, breakables.
//!
//! Все значения берутся из `CombatProfile`. Функции работают через
//! `Commands`, так что их можно звать из систем и из тестов
//! (`world.commands()` + `world.flush()`).

use bevy::prelude::*;

use crate::ai::{AiBehavior, PatrolRoute, ScheduledEvents, StatusIndicator, WarpTargets, Waypoint};
use crate::combat::{Breakable, EquipState, EquippedWeapon, WeaponSocket};
use crate::components::{Actor, CombatMovement, Combatant, Engageable, Hurtbox, MovementCommand};
use crate::config::CombatProfile;

pub const PLAYER_FACTION: u64 = 1;
pub const ENEMY_FACTION: u64 = 2;

/// Player: unarmed, engageable для AI sensing.
pub fn spawn_player(commands: &mut Commands, profile: &CombatProfile, position: Vec3) -> Entity {
    let entity = commands
        .spawn((
            Name::new("Player"),
            Combatant::player(),
            Actor {
                faction_id: PLAYER_FACTION,
            },
            Engageable,
            Transform::from_translation(position),
            profile.vitals.health(),
            profile.vitals.stamina(),
            profile.vitals.hurtbox(),
            profile.actions,
            profile.animation.clone(),
        ))
        .id();

    crate::logger::log(&format!("Spawned player {:?} at {:?}", entity, position));
    entity
}

/// Enemy: armed (оружие в руке), патрулирует `waypoints`.
pub fn spawn_enemy(commands: &mut Commands, profile: &CombatProfile, position: Vec3, waypoints: Vec<Waypoint>) -> Entity {
    let entity = commands
        .spawn((
            Name::new("Enemy"),
            Combatant::ai(),
            Actor {
                faction_id: ENEMY_FACTION,
            },
            Transform::from_translation(position),
            profile.vitals.health(),
            profile.vitals.stamina(),
            profile.vitals.hurtbox(),
            profile.actions,
            profile.animation.clone(),
            EquipState::ArmedOneHanded,
            CombatMovement(true),
        ))
        .insert((
            AiBehavior::default(),
            profile.ai.clone(),
            PatrolRoute::new(waypoints),
            ScheduledEvents::default(),
            StatusIndicator::default(),
            WarpTargets::default(),
            MovementCommand::Idle,
        ))
        .id();

    let mut weapon = profile.weapon.weapon();
    weapon.attach(entity, WeaponSocket::Hand);
    let weapon_entity = commands
        .spawn((Name::new("Enemy Weapon"), weapon, Transform::from_translation(position)))
        .id();
    commands.entity(entity).insert(EquippedWeapon(weapon_entity));

    crate::logger::log(&format!(
        "Spawned enemy {:?} with weapon {:?} at {:?}",
        entity, weapon_entity, position
    ));
    entity
}

/// Оружие, лежащее в мире.
pub fn spawn_weapon_pickup(commands: &mut Commands, profile: &CombatProfile, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Weapon Pickup"),
            profile.weapon.weapon(),
            profile.weapon.pickup(),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn spawn_breakable(commands: &mut Commands, position: Vec3, gold: u32) -> Entity {
    commands
        .spawn((
            Name::new("Breakable"),
            Breakable { gold },
            Hurtbox {
                radius: 30.0,
                height: 40.0,
            },
            Transform::from_translation(position),
        ))
        .id()
}
