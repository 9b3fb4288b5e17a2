//! Melee hit detection: weapon sweep vs hurtboxes.
//!
//! Swept volume = capsule around the weapon's world segment (radius =
//! `trace_half_extent`). Candidate = any entity with a `Hurtbox`, treated as
//! a sphere at hurtbox height.

use bevy::prelude::*;

use crate::combat::{Breakable, MeleeHit, Weapon};
use crate::components::{Actor, Combatant, Hurtbox};

/// Closest point on segment `a → b` to `point`, plus its parameter `t ∈ [0, 1]`.
pub fn closest_point_on_segment(a: Vec3, b: Vec3, point: Vec3) -> (Vec3, f32) {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq <= f32::EPSILON {
        return (a, 0.0);
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// What a candidate can do with a hit, resolved once per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitReceiver {
    Combatant,
    Breakable,
}

impl HitReceiver {
    pub fn resolve(is_combatant: bool, is_breakable: bool) -> Option<Self> {
        if is_combatant {
            Some(HitReceiver::Combatant)
        } else if is_breakable {
            Some(HitReceiver::Breakable)
        } else {
            None
        }
    }
}

/// One overlapped candidate of a sweep.
#[derive(Debug, Clone, Copy)]
pub struct SweepContact {
    pub entity: Entity,
    /// Position along the sweep (0 = trace start)
    pub along: f32,
    pub impact_point: Vec3,
}

/// Test `segment` (inflated by `half_extent`) against a sphere.
pub fn sweep_contact(
    entity: Entity,
    segment: (Vec3, Vec3),
    half_extent: f32,
    center: Vec3,
    radius: f32,
) -> Option<SweepContact> {
    let (closest, along) = closest_point_on_segment(segment.0, segment.1, center);
    let offset = center - closest;
    if offset.length() > half_extent + radius {
        return None;
    }
    // Точка на поверхности swept volume, ближайшая к candidate
    let impact_point = closest + offset.normalize_or_zero() * half_extent;
    Some(SweepContact {
        entity,
        along,
        impact_point,
    })
}

/// Система: sweep активных оружий
///
/// Пропуск candidate: сам wielder, уже в ignore list, та же фракция.
/// Порядок попаданий = порядок вдоль sweep (от trace start), при равенстве
/// по Entity index, чтобы результат не зависел от порядка archetypes.
#[allow(clippy::type_complexity)]
pub fn sweep_weapon_hits(
    mut weapons: Query<(Entity, &mut Weapon)>,
    owners: Query<(&Transform, Option<&Actor>)>,
    candidates: Query<(Entity, &Transform, &Hurtbox, Option<&Actor>, Has<Combatant>, Has<Breakable>)>,
    mut hit_events: EventWriter<MeleeHit>,
) {
    for (weapon_entity, mut weapon) in weapons.iter_mut() {
        if !weapon.collision_active() {
            continue;
        }
        let Some(owner) = weapon.owner else {
            continue;
        };
        let Ok((owner_transform, owner_actor)) = owners.get(owner) else {
            continue;
        };
        let segment = weapon.world_trace(owner_transform);
        let owner_faction = owner_actor.map(|a| a.faction_id);

        let mut contacts: Vec<(SweepContact, HitReceiver)> = candidates
            .iter()
            .filter(|(entity, ..)| *entity != owner && !weapon.ignored().contains(entity))
            .filter(|(_, _, _, actor, ..)| match (owner_faction, actor) {
                (Some(faction), Some(actor)) => actor.faction_id != faction,
                _ => true,
            })
            .filter_map(|(entity, transform, hurtbox, _, is_combatant, is_breakable)| {
                let receiver = HitReceiver::resolve(is_combatant, is_breakable)?;
                let contact = sweep_contact(
                    entity,
                    segment,
                    weapon.trace_half_extent,
                    hurtbox.center(transform),
                    hurtbox.radius,
                )?;
                Some((contact, receiver))
            })
            .collect();

        contacts.sort_by(|(a, _), (b, _)| {
            a.along
                .total_cmp(&b.along)
                .then_with(|| a.entity.index().cmp(&b.entity.index()))
        });

        for (contact, receiver) in contacts {
            if !weapon.register_hit(contact.entity) {
                continue;
            }
            crate::logger::log(&format!(
                "🎯 {:?} ({:?}) hit {:?} [{:?}] at {:?}",
                owner, weapon_entity, contact.entity, receiver, contact.impact_point
            ));
            hit_events.write(MeleeHit {
                attacker: owner,
                weapon: weapon_entity,
                target: contact.entity,
                damage: weapon.damage,
                impact_point: contact.impact_point,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_point_clamps_to_endpoints() {
        let a = Vec3::ZERO;
        let b = Vec3::new(10.0, 0.0, 0.0);

        assert_eq!(closest_point_on_segment(a, b, Vec3::new(-5.0, 3.0, 0.0)), (a, 0.0));
        assert_eq!(closest_point_on_segment(a, b, Vec3::new(15.0, 3.0, 0.0)), (b, 1.0));
        assert_eq!(
            closest_point_on_segment(a, b, Vec3::new(4.0, 3.0, 0.0)),
            (Vec3::new(4.0, 0.0, 0.0), 0.4)
        );
    }

    #[test]
    fn test_degenerate_segment() {
        let a = Vec3::splat(2.0);
        assert_eq!(closest_point_on_segment(a, a, Vec3::ZERO), (a, 0.0));
    }

    #[test]
    fn test_sweep_contact_inside_and_outside() {
        let segment = (Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0));
        let entity = Entity::from_raw(1);

        let hit = sweep_contact(entity, segment, 5.0, Vec3::new(40.0, 0.0, -50.0), 40.0);
        let Some(hit) = hit else {
            panic!("40 ≤ 5 + 40 must overlap");
        };
        assert!((hit.along - 0.5).abs() < 1e-6);
        assert!((hit.impact_point - Vec3::new(5.0, 0.0, -50.0)).length() < 1e-4);

        assert!(sweep_contact(entity, segment, 5.0, Vec3::new(46.0, 0.0, -50.0), 40.0).is_none());
    }

    #[test]
    fn test_receiver_resolution() {
        assert_eq!(HitReceiver::resolve(true, false), Some(HitReceiver::Combatant));
        assert_eq!(HitReceiver::resolve(false, true), Some(HitReceiver::Breakable));
        assert_eq!(HitReceiver::resolve(false, false), None);
    }
}
