//! AI decision-making module
//!
//! FSM поверх action state machine: patrol → chase → attack, Engaged пока
//! анимация атаки/hit reaction не закончилась, Dead terminal.
//!
//! Вход: `PawnSeen` (sensing), дистанции до цели, action state.
//! Выход: `MovementCommand` (навигация), `ActionIntent::Attack`.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod patrol;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::{EnemyStateChanged, PawnSeen};
pub use patrol::choose_patrol_target;
pub use systems::*;

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// - Perception: сброс исчезнувших целей, warp targets
/// - Decision: ai_behavior_update (может отправить ActionIntent)
/// - Aftermath: реакция на урон и смерть
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_simulation_sets(app);

        app.add_event::<PawnSeen>()
            .add_event::<EnemyStateChanged>()
            .init_resource::<crate::config::CombatProfile>();

        app.add_systems(
            FixedUpdate,
            (forget_vanished_targets, update_warp_targets)
                .chain()
                .in_set(SimulationSet::Perception),
        )
        .add_systems(FixedUpdate, ai_behavior_update.in_set(SimulationSet::Decision))
        .add_systems(
            FixedUpdate,
            (ai_handle_death, ai_react_to_damage)
                .chain()
                .in_set(SimulationSet::Aftermath),
        );
    }
}
