//! Combat events
//!
//! Вход: DamageEnemy (запрос урона по врагу)
//! Выход: EnemyDamaged, EnemyDied, PlayerDamaged, PlayerDefeated

use bevy::prelude::*;

use crate::ai::EnemyArchetype;

/// Запрос: нанести урон врагу
///
/// Пишут player_attack и тесты. Вся обработка в apply_enemy_damage.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageEnemy {
    pub target: Entity,
    pub amount: u32,
    /// Направление удара (от атакующего к цели), для knockback
    pub hit_direction: Vec3,
}

/// Событие: враг получил урон (amount = реально снятое HP)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyDamaged {
    pub enemy: Entity,
    pub amount: u32,
    pub remaining: u32,
}

/// Событие: враг умер (HP дошёл до 0)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyDied {
    pub enemy: Entity,
    pub archetype: EnemyArchetype,
}

/// Событие: удар врага попал по игроку
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDamaged {
    pub attacker: Entity,
    pub amount: u32,
    pub remaining: u32,
}

/// Событие: HP игрока дошёл до 0
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDefeated {
    pub player: Entity,
    pub killer: Entity,
}
