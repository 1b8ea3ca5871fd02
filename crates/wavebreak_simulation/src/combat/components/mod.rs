//! Combat components

pub mod death;
pub mod player;


// Re-export all components
pub use death::*;
pub use player::*;
