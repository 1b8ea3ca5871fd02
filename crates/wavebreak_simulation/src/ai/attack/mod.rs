//! Pluggable enemy attack behaviors.
//!
//! The FSM owns *when* an enemy attacks; a behavior owns *how*.
//! Each archetype plugs its behavior into `AttackBehaviorSlot` at spawn time.
//!
//! # Contract
//!
//! - `on_enter_attack` snapshots the target position (the attack commits to it)
//! - `update_attack` is called once per fixed tick while the FSM is in Attack
//! - `Finished` hands control back to the FSM (range re-check)
//! - `cancel` drops the in-flight attack (stun/death interrupt)

use bevy::prelude::*;

use super::components::{ArchetypeStats, EnemyArchetype};

pub mod charge;
pub mod slam;

#[cfg(test)]
mod attack_tests;

pub use charge::{ChargeAttack, ChargePhase};
pub use slam::{SlamAttack, SlamPhase};

/// Per-tick input for a behavior.
#[derive(Debug, Clone, Copy)]
pub struct AttackContext {
    /// Current enemy position
    pub position: Vec3,
    /// Live target position (None if the player is gone)
    pub target: Option<Vec3>,
    /// Simulation delta (seconds)
    pub delta: f32,
}

/// Area strike produced by a behavior (resolved against the player).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackStrike {
    pub center: Vec3,
    pub radius: f32,
    pub damage: u32,
}

/// Side effects of one `update_attack` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackOutput {
    pub strikes: Vec<AttackStrike>,
    /// Translation the behavior wants applied this tick (dash)
    pub displacement: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackUpdate {
    Continue,
    Finished,
}

pub trait AttackBehavior: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Called on Chase → Attack (and on attack re-entry).
    fn on_enter_attack(&mut self, origin: Vec3, target: Vec3);

    fn update_attack(&mut self, ctx: &AttackContext, out: &mut AttackOutput) -> AttackUpdate;

    /// Interrupt (stun/death). Must leave the behavior ready for a new `on_enter_attack`.
    fn cancel(&mut self);

    /// Current phase name for logs/inspection (None = idle).
    fn phase_name(&self) -> Option<&'static str>;
}

/// Behavior slot on the enemy entity.
#[derive(Component)]
pub struct AttackBehaviorSlot(pub Box<dyn AttackBehavior>);

impl AttackBehaviorSlot {
    pub fn for_archetype(archetype: EnemyArchetype, stats: &ArchetypeStats) -> Self {
        match archetype {
            EnemyArchetype::Brute => Self(Box::new(SlamAttack::new(stats))),
            EnemyArchetype::Charger => Self(Box::new(ChargeAttack::new(stats))),
        }
    }
}

impl std::fmt::Debug for AttackBehaviorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AttackBehaviorSlot")
            .field(&self.0.name())
            .field(&self.0.phase_name())
            .finish()
    }
}

/// Distance on the ground plane (knockback height ignored).
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}
