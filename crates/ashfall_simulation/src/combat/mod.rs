//! Combat system module
//!
//! ECS ответственность:
//! - Action state machine: Idle / Attacking / Dodging / Equipping / HitReaction / Dead
//! - Melee hit detection: weapon sweep, per-swing ignore list
//! - Damage, death, stamina regen, pickups
//!
//! Presentation ответственность:
//! - Проигрывает `PlayAnimation`, отвечает `AnimationNotify`
//!   (finished signals + swing window open/close)

use bevy::prelude::*;
use std::collections::HashSet;

pub mod components;
pub mod events;
pub mod hit_direction;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use hit_direction::{classify_hit, hit_angle, HitDirection};
pub use systems::{
    apply_melee_hits, despawn_after_timeout, process_action_intents, process_animation_notifies,
    regenerate_stamina, release_orphaned_weapons, sweep_weapon_hits, track_pickup_overlaps, Dead, DespawnAfter,
};

use crate::SimulationSet;

/// Entities, у которых action state уже сменился в этом тике.
///
/// Controller requests проверяют его: не больше одного перехода за тик.
/// Урон и completion signals только отмечают.
#[derive(Resource, Debug, Default)]
pub struct FrameTransitions(HashSet<Entity>);

impl FrameTransitions {
    pub fn mark(&mut self, entity: Entity) {
        self.0.insert(entity);
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

fn reset_frame_transitions(mut transitions: ResMut<FrameTransitions>) {
    transitions.clear();
}

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (64Hz).
///
/// Порядок выполнения:
/// 1. Perception: сброс FrameTransitions, pickup overlaps
/// 2. Action: animation notifies → action intents
/// 3. Resolution: weapon sweep → damage/death
/// 4. Aftermath: stamina regen, orphaned weapons, despawn
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);

        // Регистрация событий
        app.init_resource::<FrameTransitions>()
            .add_event::<ActionIntent>()
            .add_event::<AnimationNotify>()
            .add_event::<PlayAnimation>()
            .add_event::<MeleeHit>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<ImpactEffectRequested>()
            .add_event::<BreakableShattered>()
            .add_event::<WeaponEquipped>();

        app.add_systems(
            FixedUpdate,
            (reset_frame_transitions, track_pickup_overlaps)
                .chain()
                .in_set(SimulationSet::Perception),
        )
        .add_systems(
            FixedUpdate,
            (process_animation_notifies, process_action_intents)
                .chain()
                .in_set(SimulationSet::Action),
        )
        .add_systems(
            FixedUpdate,
            (sweep_weapon_hits, apply_melee_hits)
                .chain()
                .in_set(SimulationSet::Resolution),
        )
        .add_systems(
            FixedUpdate,
            (regenerate_stamina, release_orphaned_weapons, despawn_after_timeout)
                .chain()
                .in_set(SimulationSet::Aftermath),
        );
    }
}
