//! Combat components

pub mod action;
pub mod animation;
pub mod weapon;


// Re-export all components
pub use action::*;
pub use animation::*;
pub use weapon::*;
