//! Stage catalog: stages → waves → enemy manifest + spawn points, reward pool.
//!
//! Read-only во время игры. RON пример:
//!
//! ```ron
//! (
//!     stages: [
//!         (name: "Outskirts", waves: [
//!             (entries: [(archetype: Brute, count: 2)], spawn_points: [(x: 6.0, z: 0.0)]),
//!         ]),
//!     ],
//!     reward_pool: [
//!         (name: "Whetstone", modifiers: [(stat: AttackDamage, amount: 5.0)]),
//!         // ...минимум 3 предмета
//!     ],
//! )
//! ```

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::reward::REWARD_CHOICE_COUNT;
use crate::ai::{ArchetypeStats, EnemyArchetype};
use crate::combat::{Item, Stat, StatModifier};
use crate::error::ConfigError;

/// Точка спавна на плоскости земли (y = 0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub z: f32,
}

impl SpawnPoint {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub archetype: EnemyArchetype,
    pub count: u32,
}

/// Одна волна: что спавнить и где (точка выбирается случайно для каждого врага)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveDef {
    pub entries: Vec<SpawnEntry>,
    pub spawn_points: Vec<SpawnPoint>,
}

impl WaveDef {
    pub fn enemy_count(&self) -> u32 {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDef {
    pub name: String,
    pub waves: Vec<WaveDef>,
}

/// Весь контент прогрессии (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCatalog {
    pub stages: Vec<StageDef>,
    /// Override tuning архетипов (иначе `EnemyArchetype::default_stats`)
    #[serde(default)]
    pub archetypes: HashMap<EnemyArchetype, ArchetypeStats>,
    pub reward_pool: Vec<Item>,
}

impl StageCatalog {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let catalog: StageCatalog = ron::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Проверка структуры. Ошибка = каталог не принимается целиком.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::NoStages);
        }

        for (stage_index, stage) in self.stages.iter().enumerate() {
            if stage.waves.is_empty() {
                return Err(ConfigError::EmptyStage { stage: stage_index });
            }

            for (wave_index, wave) in stage.waves.iter().enumerate() {
                if wave.entries.is_empty() {
                    return Err(ConfigError::EmptyManifest {
                        stage: stage_index,
                        wave: wave_index,
                    });
                }
                if wave.spawn_points.is_empty() {
                    return Err(ConfigError::NoSpawnPoints {
                        stage: stage_index,
                        wave: wave_index,
                    });
                }
                if let Some(entry) = wave.entries.iter().find(|entry| entry.count == 0) {
                    return Err(ConfigError::ZeroCount {
                        stage: stage_index,
                        wave: wave_index,
                        archetype: entry.archetype,
                    });
                }
            }
        }

        if self.reward_pool.len() < REWARD_CHOICE_COUNT {
            return Err(ConfigError::RewardPoolTooSmall {
                available: self.reward_pool.len(),
                required: REWARD_CHOICE_COUNT,
            });
        }

        Ok(())
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn wave_count(&self, stage: usize) -> usize {
        self.stages.get(stage).map_or(0, |stage| stage.waves.len())
    }

    pub fn wave(&self, stage: usize, wave: usize) -> Option<&WaveDef> {
        self.stages.get(stage)?.waves.get(wave)
    }

    pub fn stats_for(&self, archetype: EnemyArchetype) -> ArchetypeStats {
        self.archetypes
            .get(&archetype)
            .copied()
            .unwrap_or_else(|| archetype.default_stats())
    }
}

impl Default for StageCatalog {
    /// Демо-прогрессия: 2 стадии, смешанные архетипы
    fn default() -> Self {
        let ring = vec![
            SpawnPoint::new(7.0, 0.0),
            SpawnPoint::new(-7.0, 0.0),
            SpawnPoint::new(0.0, 7.0),
            SpawnPoint::new(0.0, -7.0),
        ];
        let corners = vec![
            SpawnPoint::new(6.0, 6.0),
            SpawnPoint::new(-6.0, 6.0),
            SpawnPoint::new(6.0, -6.0),
            SpawnPoint::new(-6.0, -6.0),
        ];

        Self {
            stages: vec![
                StageDef {
                    name: "Outskirts".into(),
                    waves: vec![
                        WaveDef {
                            entries: vec![SpawnEntry {
                                archetype: EnemyArchetype::Brute,
                                count: 2,
                            }],
                            spawn_points: ring.clone(),
                        },
                        WaveDef {
                            entries: vec![
                                SpawnEntry {
                                    archetype: EnemyArchetype::Brute,
                                    count: 1,
                                },
                                SpawnEntry {
                                    archetype: EnemyArchetype::Charger,
                                    count: 2,
                                },
                            ],
                            spawn_points: ring,
                        },
                    ],
                },
                StageDef {
                    name: "Foundry".into(),
                    waves: vec![WaveDef {
                        entries: vec![
                            SpawnEntry {
                                archetype: EnemyArchetype::Charger,
                                count: 3,
                            },
                            SpawnEntry {
                                archetype: EnemyArchetype::Brute,
                                count: 2,
                            },
                        ],
                        spawn_points: corners,
                    }],
                },
            ],
            archetypes: HashMap::new(),
            reward_pool: vec![
                Item::single("Whetstone", Stat::AttackDamage, 5.0),
                Item::single("Light Boots", Stat::MoveSpeed, 0.5),
                Item::single("Iron Heart", Stat::MaxHealth, 25.0),
                Item::single("Long Haft", Stat::AttackRange, 0.4),
                Item::single("Lucky Coin", Stat::CritChance, 0.08),
                Item::new(
                    "Executioner's Mark",
                    vec![
                        StatModifier {
                            stat: Stat::CritMultiplier,
                            amount: 0.5,
                        },
                        StatModifier {
                            stat: Stat::MoveSpeed,
                            amount: -0.3,
                        },
                    ],
                ),
                Item::single("Wide Swing", Stat::AttackArc, 40.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert_eq!(StageCatalog::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_wave_without_spawn_points() {
        let mut catalog = StageCatalog::default();
        catalog.stages[1].waves[0].spawn_points.clear();

        assert_eq!(
            catalog.validate(),
            Err(ConfigError::NoSpawnPoints { stage: 1, wave: 0 })
        );
    }

    #[test]
    fn test_rejects_small_reward_pool() {
        let mut catalog = StageCatalog::default();
        catalog.reward_pool.truncate(2);

        assert_eq!(
            catalog.validate(),
            Err(ConfigError::RewardPoolTooSmall {
                available: 2,
                required: 3
            })
        );
    }

    #[test]
    fn test_rejects_zero_count_entry() {
        let mut catalog = StageCatalog::default();
        catalog.stages[0].waves[1].entries[1].count = 0;

        assert_eq!(
            catalog.validate(),
            Err(ConfigError::ZeroCount {
                stage: 0,
                wave: 1,
                archetype: EnemyArchetype::Charger
            })
        );
    }

    #[test]
    fn test_parse_ron_with_archetype_override() {
        let catalog = StageCatalog::from_ron_str(
            r#"(
                stages: [
                    (name: "Test", waves: [
                        (entries: [(archetype: Brute, count: 1)], spawn_points: [(x: 3.0, z: 0.0)]),
                    ]),
                ],
                archetypes: {
                    Brute: (
                        max_health: 10, move_speed: 1.0, attack_range: 2.0, stun_duration: 0.5,
                        attack_damage: 5, wind_up: 0.5, strike_duration: 0.3, recovery: 0.5,
                        strike_radius: 2.0, dash_speed: 0.0,
                    ),
                },
                reward_pool: [
                    (name: "A", modifiers: [(stat: AttackDamage, amount: 1.0)]),
                    (name: "B", modifiers: [(stat: MoveSpeed, amount: 1.0)]),
                    (name: "C", modifiers: []),
                ],
            )"#,
        )
        .expect("valid catalog");

        assert_eq!(catalog.stage_count(), 1);
        assert_eq!(catalog.wave_count(0), 1);
        assert_eq!(catalog.stats_for(EnemyArchetype::Brute).max_health, 10);
        assert_eq!(
            catalog.stats_for(EnemyArchetype::Charger),
            EnemyArchetype::Charger.default_stats()
        );
    }

    #[test]
    fn test_empty_stage_list_rejected() {
        let err = StageCatalog::from_ron_str("(stages: [], reward_pool: [])").unwrap_err();
        assert_eq!(err, ConfigError::NoStages);
    }
}
