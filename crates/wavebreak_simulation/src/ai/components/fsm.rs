//! Enemy FSM components (state, archetype, combat tuning).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{
    Facing, Health, MovementSpeed, NavigationAgent, PhysicsBody, SpriteParams, VisualOffset,
};

/// Enemy FSM состояния
///
/// Единственная authority для "что делает враг прямо сейчас".
/// Die — терминальное, из него не выходим.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub enum EnemyState {
    /// Движение к игроку (навигация)
    Chase,

    /// Attack behavior владеет врагом до Finished
    Attack,

    /// Оглушение после урона
    Stun {
        /// Оставшееся время (секунды симуляции)
        remaining: f32,
    },

    /// HP == 0
    Die,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::Chase
    }
}

impl EnemyState {
    pub fn is_dead(&self) -> bool {
        matches!(self, EnemyState::Die)
    }

    pub fn is_stunned(&self) -> bool {
        matches!(self, EnemyState::Stun { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyState::Chase => "Chase",
            EnemyState::Attack => "Attack",
            EnemyState::Stun { .. } => "Stun",
            EnemyState::Die => "Die",
        }
    }
}

/// Результат урона по врагу (чистая логика, без ECS)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageResponse {
    /// Враг уже мёртв — урон проигнорирован целиком
    Ignored,
    /// HP дошёл до 0 → Die
    Killed { dealt: u32 },
    /// Вход в Stun
    Stunned { dealt: u32 },
    /// Уже в Stun — оставшееся время не трогаем
    StunHeld { dealt: u32 },
}

impl DamageResponse {
    pub fn dealt(&self) -> u32 {
        match *self {
            DamageResponse::Ignored => 0,
            DamageResponse::Killed { dealt }
            | DamageResponse::Stunned { dealt }
            | DamageResponse::StunHeld { dealt } => dealt,
        }
    }

    /// Knockback запускается на любой принятый урон (включая смертельный)
    pub fn triggers_knockback(&self) -> bool {
        !matches!(self, DamageResponse::Ignored)
    }
}

/// Применить урон к HP + FSM.
///
/// Порядок: HP → (knockback снаружи) → Die или Stun.
/// Повторный урон во время Stun не сбрасывает таймер.
pub fn resolve_damage(
    health: &mut Health,
    state: &mut EnemyState,
    amount: u32,
    stun_duration: f32,
) -> DamageResponse {
    if state.is_dead() || !health.is_alive() {
        return DamageResponse::Ignored;
    }

    let dealt = health.take_damage(amount);

    if !health.is_alive() {
        *state = EnemyState::Die;
        return DamageResponse::Killed { dealt };
    }

    if state.is_stunned() {
        return DamageResponse::StunHeld { dealt };
    }

    *state = EnemyState::Stun {
        remaining: stun_duration.max(0.0),
    };
    DamageResponse::Stunned { dealt }
}

/// Тип врага (определяет stats + attack behavior)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Медленный, бьёт площадью по точке игрока
    Brute,
    /// Быстрый, рывок к запомненной позиции игрока
    Charger,
}

impl EnemyArchetype {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyArchetype::Brute => "Brute",
            EnemyArchetype::Charger => "Charger",
        }
    }

    pub fn default_stats(&self) -> ArchetypeStats {
        match self {
            EnemyArchetype::Brute => ArchetypeStats {
                max_health: 60,
                move_speed: 1.6,
                attack_range: 2.0,
                stun_duration: 0.6,
                attack_damage: 15,
                wind_up: 0.7,
                strike_duration: 0.5,
                recovery: 0.8,
                strike_radius: 2.2,
                dash_speed: 0.0,
            },
            EnemyArchetype::Charger => ArchetypeStats {
                max_health: 30,
                move_speed: 2.8,
                attack_range: 5.0,
                stun_duration: 0.4,
                attack_damage: 10,
                wind_up: 0.4,
                strike_duration: 0.6,
                recovery: 0.5,
                strike_radius: 0.9,
                dash_speed: 12.0,
            },
        }
    }
}

/// Tuning архетипа (RON: `StageCatalog.archetypes`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeStats {
    pub max_health: u32,
    pub move_speed: f32,
    /// Дистанция (XZ) для входа в Attack
    pub attack_range: f32,
    pub stun_duration: f32,
    pub attack_damage: u32,
    pub wind_up: f32,
    /// Slam: пауза после удара; Charger: timeout рывка
    pub strike_duration: f32,
    pub recovery: f32,
    /// Радиус area check удара
    pub strike_radius: f32,
    /// Только Charger
    pub dash_speed: f32,
}

/// Маркер врага. Остальные компоненты — через required components.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    EnemyState,
    NavigationAgent,
    PhysicsBody,
    MovementSpeed,
    Facing,
    SpriteParams,
    VisualOffset,
    Transform
)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
}

/// Боевые параметры конкретного врага (копия из ArchetypeStats при спавне)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct EnemyCombat {
    pub attack_range: f32,
    pub stun_duration: f32,
}

impl Default for EnemyCombat {
    fn default() -> Self {
        Self {
            attack_range: 1.5,
            stun_duration: 0.5,
        }
    }
}

impl From<&ArchetypeStats> for EnemyCombat {
    fn from(stats: &ArchetypeStats) -> Self {
        Self {
            attack_range: stats.attack_range,
            stun_duration: stats.stun_duration,
        }
    }
}
