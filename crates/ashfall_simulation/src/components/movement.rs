//! Movement компоненты: intent от input, команды для навигации
//!
//! Симуляция не двигает акторов сама. Она пишет `MovementCommand`
//! (high-level intent), внешняя навигация читает его и обновляет Transform.

use bevy::prelude::*;

/// Last 2D movement input (x = strafe axis, y = forward axis).
///
/// Written by the input layer every frame, read when an attack starts to
/// decide whether the strafing variant plays.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementIntent(pub Vec2);

/// Команда движения для актора (выполняется внешней навигацией)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать navigation target)
    #[default]
    Idle,
    /// Двигаться к позиции (world coordinates)
    MoveTo {
        target: Vec3,
        speed: f32,
        acceptance_radius: f32,
    },
    /// Следовать за entity (target обновляется каждый frame)
    Follow {
        target: Entity,
        speed: f32,
        acceptance_radius: f32,
    },
    /// Stand still, keep facing the entity
    HoldFacing { target: Entity },
    /// Остановиться немедленно (сбросить velocity)
    Stop,
}

impl MovementCommand {
    pub fn speed(&self) -> f32 {
        match self {
            MovementCommand::MoveTo { speed, .. } | MovementCommand::Follow { speed, .. } => *speed,
            _ => 0.0,
        }
    }
}

/// Combat movement mode: controller-driven yaw (strafing) instead of
/// orienting to movement direction. Enabled while armed.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CombatMovement(pub bool);

/// Movement disabled for good (player death). Movers that turn
/// `MovementCommand` into motion skip entities carrying it.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MovementLocked;
