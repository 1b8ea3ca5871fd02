//! Physics simulation module
//!
//! Knockback/bounce интегратор + движение игрока.
//! Без физического движка: все тела двигаются своей интеграцией в FixedUpdate.

use bevy::prelude::*;

pub mod knockback;
pub mod movement;

#[cfg(test)]
mod knockback_tests;

// Re-export основных типов
pub use knockback::{
    integrate_knockback, knockback_multiplier, launch_velocity, start_knockback, Knockback,
    KnockbackSettled, KnockbackStep, SettleReason,
};
pub use movement::player_movement;

use crate::SimulationSet;

/// Physics Plugin
///
/// Движение игрока в Input (до атаки), knockback в Physics (после урона).
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<KnockbackSettled>()
            .add_systems(FixedUpdate, player_movement.in_set(SimulationSet::Input))
            .add_systems(FixedUpdate, integrate_knockback.in_set(SimulationSet::Physics));
    }
}
