//! Ashfall Simulation Core
//!
//! ECS-симуляция ближнего боя на Bevy 0.16 (headless, детерминированная).
//!
//! Разделение ответственности:
//! - ECS = правила: action state machine, AI поведение, попадания, урон
//! - Presentation (внешний слой) = анимации, навигация, эффекты
//!
//! Связь с presentation только через events: `PlayAnimation` наружу,
//! `AnimationNotify` обратно; движение через `MovementCommand`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod spawn;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, AiBehavior, AiConfig, EnemyState, PawnSeen};
pub use combat::{
    classify_hit, ActionIntent, ActionRequest, ActionState, AnimNotify, AnimationNotify, CombatPlugin, DamageDealt,
    Dead, EntityDied, EquipState, HitDirection, PlayAnimation, Weapon,
};
pub use components::*;
pub use config::{CombatProfile, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};

/// Simulation tick rate (FixedUpdate).
pub const SIMULATION_HZ: f64 = 64.0;

const DEFAULT_SEED: u64 = 42;

/// Фазы одного fixed тика (выполняются строго по порядку).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Per-tick bookkeeping: overlaps, warp targets, stale references
    Perception,
    /// AI behavior decisions (may emit ActionIntent)
    Decision,
    /// Action state machine: animation notifies, then intents
    Action,
    /// Weapon sweeps, damage, death
    Resolution,
    /// Reactions to outcomes, regen, despawn
    Aftermath,
}

pub(crate) fn configure_simulation_sets(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSet::Perception,
            SimulationSet::Decision,
            SimulationSet::Action,
            SimulationSet::Resolution,
            SimulationSet::Aftermath,
        )
            .chain(),
    );
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed задаёт caller (create_headless_app); здесь только fallback
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .init_resource::<CombatProfile>()
            .add_plugins((CombatPlugin, AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время продвигается вручную: каждый `app.update()` = ровно один fixed тик.
/// Первый update только инициализирует часы (delta = 0, тика нет).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
        .insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
