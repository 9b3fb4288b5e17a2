//! AI systems

mod fsm;
mod movement;
mod reactions;

// Re-export all systems
pub use fsm::*;
pub use movement::*;
pub use reactions::*;
