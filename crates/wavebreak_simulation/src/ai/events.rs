//! AI Events — наружу от enemy FSM
//!
//! EnemyStateChanged — каждая смена состояния (presentation, логи, тесты)
//! EnemyAttackStrike — удар attack behavior, резолвится против игрока в combat

use bevy::prelude::*;

use super::attack::AttackStrike;
use super::components::EnemyState;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyStateChanged {
    pub enemy: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyAttackStrike {
    pub attacker: Entity,
    pub strike: AttackStrike,
}
