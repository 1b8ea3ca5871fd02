//! Enemy AI module
//!
//! FSM (Chase/Attack/Stun/Die) + pluggable attack behaviors по архетипам.
//! Урон и смерть приходят снаружи (combat::damage), FSM их не вычисляет.

use bevy::prelude::*;

pub mod attack;
pub mod components;
pub mod events;
pub mod spawn;
pub mod systems;

// Re-export основных типов
pub use attack::{AttackBehavior, AttackBehaviorSlot, AttackStrike};
pub use components::*;
pub use events::*;
pub use spawn::spawn_enemy;
pub use systems::{chase_movement, enemy_fsm, set_state, update_facing};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. enemy_fsm — переходы + attack behaviors
/// 2. chase_movement — движение врагов в Chase
/// 3. update_facing — после всех перемещений (Cleanup)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyStateChanged>()
            .add_event::<EnemyAttackStrike>()
            .add_systems(
                FixedUpdate,
                (enemy_fsm, chase_movement)
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(SimulationSet::Behavior),
            )
            .add_systems(FixedUpdate, update_facing.in_set(SimulationSet::Cleanup));
    }
}
