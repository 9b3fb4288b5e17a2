//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: allegiance, control strategy, vitals (Health, Stamina, Purse), Hurtbox
//! - movement: MovementIntent (input), MovementCommand (navigation), combat movement mode
//! - ai: re-export AI компонентов из crate::ai

pub mod actor;
pub mod ai;
pub mod movement;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use movement::*;
