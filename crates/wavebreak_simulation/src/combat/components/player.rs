//! Player components: marker, input, stats.
//!
//! `PlayerStats` is the stats collaborator: base values plus item bonuses,
//! every total clamped to a sane floor/ceiling.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker: the player entity (one per world).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(PlayerInput, Transform)]
pub struct Player;

/// Player intent for the current tick.
///
/// Headless tests and the runner write it directly.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// Movement on the ground plane (x, z), any length
    pub movement: Vec2,
    /// Aim direction (y ignored)
    pub aim: Vec3,
    /// Edge-triggered: consumed by `player_attack`
    pub attack: bool,
}

/// Stat identifiers (item modifiers target these).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum Stat {
    MaxHealth,
    MoveSpeed,
    AttackDamage,
    AttackRange,
    /// Full swing arc in degrees
    AttackArc,
    CritChance,
    CritMultiplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: Stat,
    pub amount: f32,
}

/// Reward item: a named bundle of flat stat bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub modifiers: Vec<StatModifier>,
}

impl Item {
    pub fn new(name: impl Into<String>, modifiers: Vec<StatModifier>) -> Self {
        Self {
            name: name.into(),
            modifiers,
        }
    }

    pub fn single(name: impl Into<String>, stat: Stat, amount: f32) -> Self {
        Self::new(name, vec![StatModifier { stat, amount }])
    }
}

/// Flat stat values (base or accumulated bonus).
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub max_health: f32,
    pub move_speed: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_arc: f32,
    pub crit_chance: f32,
    pub crit_multiplier: f32,
}

impl StatBlock {
    pub fn player_base() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 4.0,
            attack_damage: 20.0,
            attack_range: 2.2,
            attack_arc: 120.0,
            crit_chance: 0.1,
            crit_multiplier: 2.0,
        }
    }

    pub fn get(&self, stat: Stat) -> f32 {
        match stat {
            Stat::MaxHealth => self.max_health,
            Stat::MoveSpeed => self.move_speed,
            Stat::AttackDamage => self.attack_damage,
            Stat::AttackRange => self.attack_range,
            Stat::AttackArc => self.attack_arc,
            Stat::CritChance => self.crit_chance,
            Stat::CritMultiplier => self.crit_multiplier,
        }
    }

    pub fn add(&mut self, stat: Stat, amount: f32) {
        let slot = match stat {
            Stat::MaxHealth => &mut self.max_health,
            Stat::MoveSpeed => &mut self.move_speed,
            Stat::AttackDamage => &mut self.attack_damage,
            Stat::AttackRange => &mut self.attack_range,
            Stat::AttackArc => &mut self.attack_arc,
            Stat::CritChance => &mut self.crit_chance,
            Stat::CritMultiplier => &mut self.crit_multiplier,
        };
        *slot += amount;
    }
}

/// Player stats + health.
///
/// Инвариант: 0 ≤ current_health ≤ max_health()
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerStats {
    base: StatBlock,
    bonus: StatBlock,
    pub current_health: u32,
    /// Names of applied items, in order
    pub items: Vec<String>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(StatBlock::player_base())
    }
}

impl PlayerStats {
    pub fn new(base: StatBlock) -> Self {
        let mut stats = Self {
            base,
            bonus: StatBlock::default(),
            current_health: 0,
            items: Vec::new(),
        };
        stats.current_health = stats.max_health();
        stats
    }

    /// Итоговое значение с clamp'ами
    pub fn total(&self, stat: Stat) -> f32 {
        let raw = self.base.get(stat) + self.bonus.get(stat);
        match stat {
            Stat::MaxHealth => raw.max(1.0),
            Stat::MoveSpeed => raw.max(0.5),
            Stat::AttackDamage => raw.max(1.0),
            Stat::AttackRange => raw.max(0.5),
            Stat::AttackArc => raw.clamp(10.0, 360.0),
            Stat::CritChance => raw.clamp(0.0, 1.0),
            Stat::CritMultiplier => raw.max(1.0),
        }
    }

    pub fn max_health(&self) -> u32 {
        self.total(Stat::MaxHealth).round() as u32
    }

    pub fn move_speed(&self) -> f32 {
        self.total(Stat::MoveSpeed)
    }

    pub fn attack_damage(&self) -> u32 {
        self.total(Stat::AttackDamage).round() as u32
    }

    pub fn attack_range(&self) -> f32 {
        self.total(Stat::AttackRange)
    }

    pub fn attack_arc_degrees(&self) -> f32 {
        self.total(Stat::AttackArc)
    }

    pub fn crit_chance(&self) -> f32 {
        self.total(Stat::CritChance)
    }

    pub fn crit_multiplier(&self) -> f32 {
        self.total(Stat::CritMultiplier)
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Бонусы предмета. Рост max health лечит на ту же величину.
    pub fn apply_item(&mut self, item: &Item) {
        let max_before = self.max_health();

        for modifier in &item.modifiers {
            self.bonus.add(modifier.stat, modifier.amount);
        }

        let max_after = self.max_health();
        if max_after > max_before {
            self.current_health = self.current_health.saturating_add(max_after - max_before);
        }
        self.current_health = self.current_health.min(max_after);
        self.items.push(item.name.clone());
    }

    /// Урон с полом в 0. Возвращает реально снятое HP.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_sub(amount);
        before - self.current_health
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.max_health());
    }
}
