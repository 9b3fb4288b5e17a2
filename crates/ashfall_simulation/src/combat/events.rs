//! Combat events: input → simulation, presentation ↔ simulation, outcomes.

use bevy::prelude::*;

use crate::combat::components::AnimationSegment;

/// Request from a controller (player input or AI decision).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    Attack,
    Dodge,
    /// Pick up overlapping weapon / toggle arm-disarm
    Interact,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ActionIntent {
    pub entity: Entity,
    pub request: ActionRequest,
}

/// Signals sent back by presentation at animation milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimNotify {
    AttackFinished,
    DodgeFinished,
    EquipFinished,
    HitReactionFinished,
    SwingWindowOpened,
    SwingWindowClosed,
    /// Unequip midpoint: weapon moves hand → back
    WeaponSheathed,
    /// Equip midpoint: weapon moves back → hand
    WeaponDrawn,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationNotify {
    pub entity: Entity,
    pub notify: AnimNotify,
}

/// Simulation → presentation: play this segment on the entity.
#[derive(Event, Debug, Clone)]
pub struct PlayAnimation {
    pub entity: Entity,
    pub segment: AnimationSegment,
}

/// Weapon sweep found a damageable target this tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct MeleeHit {
    pub attacker: Entity,
    pub weapon: Entity,
    pub target: Entity,
    pub damage: f32,
    pub impact_point: Vec3,
}

/// Событие: урон нанесен (after Health mutation)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
    pub impact_point: Vec3,
    pub target_died: bool,
}

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, Copy)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Presentation hook: sound + particles at the impact point.
#[derive(Event, Debug, Clone, Copy)]
pub struct ImpactEffectRequested {
    pub target: Entity,
    pub position: Vec3,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct BreakableShattered {
    pub entity: Entity,
    pub breaker: Entity,
    pub gold: u32,
}

/// Weapon moved into a combatant's hand (pickup or replacement).
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponEquipped {
    pub entity: Entity,
    pub weapon: Entity,
    pub replaced: Option<Entity>,
}
