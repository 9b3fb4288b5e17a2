//! FSM AI components (behavior state, config, patrol route, indicator).

use bevy::prelude::*;
use serde::Deserialize;

/// AI FSM состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum EnemyState {
    /// Обход waypoints (начальное состояние)
    #[default]
    Patrolling,
    /// Преследование combat_target
    Chasing,
    /// Цель в attack radius, ждём attack timer
    Attacking,
    /// Атака или hit reaction в процессе: без retargeting и без attack timer
    Engaged,
    /// Terminal
    Dead,
}

/// Поведение AI: состояние + текущая цель.
///
/// `combat_target` пишет только собственный AI controller.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AiBehavior {
    pub state: EnemyState,
    pub combat_target: Option<Entity>,
}

impl AiBehavior {
    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }
}

/// Параметры AI (radii в world units, время в секундах)
#[derive(Component, Debug, Clone, PartialEq, Deserialize, Reflect)]
#[reflect(Component)]
#[serde(default)]
pub struct AiConfig {
    /// Дальше этого теряем интерес к цели
    pub combat_radius: f32,
    pub attack_radius: f32,
    /// Waypoint считается достигнутым на этой дистанции
    pub acceptance_radius: f32,
    pub patrol_wait_min: f32,
    pub patrol_wait_max: f32,
    pub attack_delay_min: f32,
    pub attack_delay_max: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    /// Через сколько секунд после смерти тело удаляется
    pub death_lifespan: f32,
    /// Souls для убийцы
    pub soul_reward: u32,
    /// Дистанция от цели для translation warp target
    pub warp_distance: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            combat_radius: 1000.0,
            attack_radius: 150.0,
            acceptance_radius: 75.0,
            patrol_wait_min: 5.0,
            patrol_wait_max: 10.0,
            attack_delay_min: 0.5,
            attack_delay_max: 1.0,
            patrol_speed: 125.0,
            chase_speed: 300.0,
            death_lifespan: 8.0,
            soul_reward: 5,
            warp_distance: 70.0,
        }
    }
}

/// Именованная точка патруля
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Waypoint {
    pub name: String,
    pub position: Vec3,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Набор waypoints + текущий выбранный.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub waypoints: Vec<Waypoint>,
    pub current: Option<usize>,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self {
            waypoints,
            current: None,
        }
    }

    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        self.current.and_then(|index| self.waypoints.get(index))
    }
}

/// Overhead health bar: видим пока AI в бою.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct StatusIndicator {
    pub visible: bool,
}

/// Motion warp targets для attack animation (presentation их читает).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WarpTargets {
    /// Точка на `warp_distance` от цели, со стороны атакующего
    pub translation: Option<Vec3>,
    /// Позиция цели (для разворота)
    pub rotation: Option<Vec3>,
}
