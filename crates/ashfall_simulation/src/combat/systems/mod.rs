//! Combat systems

pub mod actions;
pub mod damage;
pub mod equipment;
pub mod melee;
pub mod stamina;

#[cfg(test)]
mod damage_tests;

// Re-export all systems
pub use actions::*;
pub use damage::*;
pub use equipment::*;
pub use melee::*;
pub use stamina::*;
