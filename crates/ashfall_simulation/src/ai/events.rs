//! AI Events: sensing input для AI систем
//!
//! Внешний sensor (vision cone, hearing) сообщает что observer увидел pawn.
//! Симуляция ничего не опрашивает сама.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy)]
pub struct PawnSeen {
    /// AI, которому принадлежит sensor
    pub observer: Entity,
    pub pawn: Entity,
}

/// Событие: AI сменил состояние (для UI/звука/отладки)
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyStateChanged {
    pub entity: Entity,
    pub from: crate::ai::EnemyState,
    pub to: crate::ai::EnemyState,
}
