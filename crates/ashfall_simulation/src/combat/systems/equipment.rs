//! Equipment bookkeeping: pickup overlaps, orphaned weapons.

use bevy::ecs::entity::Entities;
use bevy::prelude::*;

use crate::combat::{Dead, OverlappingItem, Weapon, WeaponPickup};
use crate::components::Combatant;

/// Система: какой pickup перекрывает combatant
///
/// Ближайший pickup в пределах его radius (по горизонтали). Пишем только
/// при изменении, чтобы Changed<OverlappingItem> не спамил.
pub fn track_pickup_overlaps(
    mut combatants: Query<(Entity, &Transform, &mut OverlappingItem), (With<Combatant>, Without<Dead>)>,
    pickups: Query<(Entity, &Transform, &WeaponPickup), Without<Combatant>>,
) {
    for (entity, transform, mut overlapping) in combatants.iter_mut() {
        let own = transform.translation.xz();

        let nearest = pickups
            .iter()
            .filter_map(|(pickup_entity, pickup_transform, pickup)| {
                let distance = own.distance(pickup_transform.translation.xz());
                (distance <= pickup.radius).then_some((pickup_entity, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.index().cmp(&b.0.index())))
            .map(|(pickup_entity, _)| pickup_entity);

        if overlapping.0 != nearest {
            if let Some(item) = nearest {
                crate::logger::log(&format!("{:?} overlaps pickup {:?}", entity, item));
            }
            overlapping.0 = nearest;
        }
    }
}

/// Система: оружие, чей владелец исчез, удаляется вместе с ним
pub fn release_orphaned_weapons(mut commands: Commands, weapons: Query<(Entity, &Weapon)>, entities: &Entities) {
    for (weapon_entity, weapon) in weapons.iter() {
        let Some(owner) = weapon.owner else {
            continue;
        };
        if !entities.contains(owner) {
            crate::logger::log(&format!("Despawning weapon {:?}: owner {:?} gone", weapon_entity, owner));
            commands.entity(weapon_entity).despawn();
        }
    }
}
