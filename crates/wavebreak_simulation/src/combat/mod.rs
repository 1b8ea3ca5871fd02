//! Combat system module
//!
//! ECS ответственность:
//! - Player: stats, input, атака по дуге (crit roll → DamageEnemy + HitFeedbackRequested)
//! - Enemy damage: HP, knockback, Stun/Die переходы, despawn трупов
//! - Enemy strikes: area check против игрока
//! - Events: EnemyDamaged, EnemyDied, PlayerDamaged, PlayerDefeated

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod hit;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use hit::{process_hit, resolve_hit, HitOutcome};
pub use systems::{
    apply_enemy_damage, apply_reward_items, despawn_after_timeout, in_attack_arc, player_attack,
    resolve_enemy_strikes,
};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (60Hz).
///
/// Порядок выполнения (через SimulationSet):
/// 1. player_attack (Input, после движения игрока)
/// 2. apply_enemy_damage (Damage)
/// 3. resolve_enemy_strikes (Resolve, после attack behaviors)
/// 4. despawn_after_timeout (Cleanup)
///
/// Награды применяются в Update (reward board живёт там же).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageEnemy>()
            .add_event::<EnemyDamaged>()
            .add_event::<EnemyDied>()
            .add_event::<PlayerDamaged>()
            .add_event::<PlayerDefeated>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                player_attack
                    .in_set(SimulationSet::Input)
                    .after(crate::physics::player_movement),
                apply_enemy_damage.in_set(SimulationSet::Damage),
                resolve_enemy_strikes.in_set(SimulationSet::Resolve),
                despawn_after_timeout.in_set(SimulationSet::Cleanup),
            ),
        );

        // Тот же кадр, что и выбор на reward board
        app.add_systems(Update, apply_reward_items.after(crate::stage::apply_reward_choice));
    }
}

/// Спавн игрока со stats по умолчанию
pub fn spawn_player(commands: &mut Commands, position: Vec3, stats: PlayerStats) -> Entity {
    let entity = commands
        .spawn((
            Player,
            Name::new("Player"),
            stats,
            Transform::from_translation(position),
        ))
        .id();
    crate::log(&format!("🧍 Spawned player {:?} at {:?}", entity, position));
    entity
}
