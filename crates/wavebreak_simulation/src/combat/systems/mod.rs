//! Combat systems

pub mod damage;
pub mod player;

#[cfg(test)]
mod player_tests;

// Re-export all systems
pub use damage::*;
pub use player::*;
