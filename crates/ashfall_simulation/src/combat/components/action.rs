//! Action state machine components.
//!
//! One `ActionState` + one `EquipState` per combatant. Guards live here as
//! pure functions so systems and tests share the exact same rules.

use bevy::prelude::*;
use serde::Deserialize;

use crate::components::Stamina;

/// What a combatant is doing right now.
///
/// Dead is absorbing: nothing leaves it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Component)]
pub enum ActionState {
    #[default]
    Idle,
    Attacking,
    Dodging,
    Equipping,
    HitReaction,
    Dead,
}

impl ActionState {
    pub fn is_idle(&self) -> bool {
        *self == ActionState::Idle
    }

    pub fn is_dead(&self) -> bool {
        *self == ActionState::Dead
    }

    /// Attacking or HitReaction: the owner is locked into an animation it
    /// can't cancel. AI treats this as "engaged".
    pub fn is_committed(&self) -> bool {
        matches!(self, ActionState::Attacking | ActionState::HitReaction)
    }

    /// Completion signal handler: `expected → Idle`, otherwise no-op.
    ///
    /// Stale signals (e.g. attack-finished after a hit reaction interrupted
    /// the swing) land here with a mismatched state and are ignored.
    pub fn finish(&mut self, expected: ActionState) -> bool {
        if *self == expected && expected != ActionState::Dead {
            *self = ActionState::Idle;
            true
        } else {
            false
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum EquipState {
    #[default]
    Unarmed,
    ArmedOneHanded,
}

impl EquipState {
    pub fn is_armed(&self) -> bool {
        *self == EquipState::ArmedOneHanded
    }
}

/// When weapon pickup is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum PickupPolicy {
    /// Pickup succeeds from any action state (except Dead).
    #[default]
    InterruptAnyState,
    /// Pickup requires Idle.
    RequireIdle,
}

/// Per-combatant action tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct ActionConfig {
    pub dodge_cost: f32,
    /// |intent.x| above this → strafing attack variant
    pub strafe_threshold: f32,
    pub pickup_policy: PickupPolicy,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            dodge_cost: 15.0,
            strafe_threshold: 0.2,
            pickup_policy: PickupPolicy::InterruptAnyState,
        }
    }
}

/// Persisted death pose index (presentation keeps showing it).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct DeathPose(pub usize);

pub fn can_attack(state: ActionState, equip: EquipState) -> bool {
    state.is_idle() && equip.is_armed()
}

/// Strictly more stamina than the cost: `stamina == cost` is rejected.
pub fn can_dodge(state: ActionState, stamina: &Stamina, cost: f32) -> bool {
    state.is_idle() && stamina.current > cost
}

pub fn can_disarm(state: ActionState, equip: EquipState, has_weapon: bool) -> bool {
    state.is_idle() && equip.is_armed() && has_weapon
}

pub fn can_arm(state: ActionState, equip: EquipState, has_weapon: bool) -> bool {
    state.is_idle() && !equip.is_armed() && has_weapon
}

pub fn can_pick_up(state: ActionState, policy: PickupPolicy) -> bool {
    match policy {
        PickupPolicy::InterruptAnyState => !state.is_dead(),
        PickupPolicy::RequireIdle => state.is_idle(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_requires_idle_and_armed() {
        assert!(can_attack(ActionState::Idle, EquipState::ArmedOneHanded));
        assert!(!can_attack(ActionState::Idle, EquipState::Unarmed));
        assert!(!can_attack(ActionState::Dodging, EquipState::ArmedOneHanded));
        assert!(!can_attack(ActionState::Dead, EquipState::ArmedOneHanded));
    }

    #[test]
    fn test_dodge_stamina_is_strict() {
        let mut stamina = Stamina::new(100.0);
        stamina.current = 15.0;
        assert!(!can_dodge(ActionState::Idle, &stamina, 15.0));

        stamina.current = 15.5;
        assert!(can_dodge(ActionState::Idle, &stamina, 15.0));
        assert!(!can_dodge(ActionState::Attacking, &stamina, 15.0));
    }

    #[test]
    fn test_arm_disarm_guards() {
        assert!(can_disarm(ActionState::Idle, EquipState::ArmedOneHanded, true));
        assert!(!can_disarm(ActionState::Idle, EquipState::ArmedOneHanded, false));
        assert!(!can_disarm(ActionState::Idle, EquipState::Unarmed, true));

        assert!(can_arm(ActionState::Idle, EquipState::Unarmed, true));
        assert!(!can_arm(ActionState::Idle, EquipState::Unarmed, false));
        assert!(!can_arm(ActionState::Equipping, EquipState::Unarmed, true));
    }

    #[test]
    fn test_finish_is_noop_on_mismatch() {
        let mut state = ActionState::HitReaction;
        assert!(!state.finish(ActionState::Attacking));
        assert_eq!(state, ActionState::HitReaction);

        assert!(state.finish(ActionState::HitReaction));
        assert_eq!(state, ActionState::Idle);

        // Повторный сигнал: уже Idle
        assert!(!state.finish(ActionState::HitReaction));
        assert_eq!(state, ActionState::Idle);
    }

    #[test]
    fn test_dead_is_absorbing() {
        let mut state = ActionState::Dead;
        assert!(!state.finish(ActionState::Dead));
        assert_eq!(state, ActionState::Dead);
        assert!(!can_pick_up(state, PickupPolicy::InterruptAnyState));
    }

    #[test]
    fn test_pickup_policy() {
        assert!(can_pick_up(ActionState::Attacking, PickupPolicy::InterruptAnyState));
        assert!(!can_pick_up(ActionState::Attacking, PickupPolicy::RequireIdle));
        assert!(can_pick_up(ActionState::Idle, PickupPolicy::RequireIdle));
    }

    #[test]
    fn test_committed_states() {
        assert!(ActionState::Attacking.is_committed());
        assert!(ActionState::HitReaction.is_committed());
        assert!(!ActionState::Dodging.is_committed());
        assert!(!ActionState::Idle.is_committed());
    }
}
