//! AI компоненты: state machine, config, patrol route, timers

// NOTE: AI компоненты живут в crate::ai::components
// Экспортируем их здесь для единообразия импорта
pub use crate::ai::{AiBehavior, AiConfig, EnemyState, PatrolRoute, ScheduledEvents, StatusIndicator, WarpTargets};
