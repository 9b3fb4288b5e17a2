//! AI components

mod fsm;
mod timers;


// Re-export all components
pub use fsm::*;
pub use timers::*;
