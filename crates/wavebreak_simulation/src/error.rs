//! Ошибки на границе вызова (конфигурация, reward board).
//!
//! Runtime деградации (нет игрока, нет reward board) — не ошибки:
//! системы пропускают эффект и пишут warning в лог.

use thiserror::Error;

use crate::ai::EnemyArchetype;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("stage catalog has no stages")]
    NoStages,

    #[error("stage {stage} has no waves")]
    EmptyStage { stage: usize },

    #[error("stage {stage} wave {wave} has an empty enemy manifest")]
    EmptyManifest { stage: usize, wave: usize },

    #[error("stage {stage} wave {wave} has no spawn points")]
    NoSpawnPoints { stage: usize, wave: usize },

    #[error("stage {stage} wave {wave} entry for {archetype:?} has zero count")]
    ZeroCount {
        stage: usize,
        wave: usize,
        archetype: EnemyArchetype,
    },

    #[error("reward pool has {available} items, at least {required} required")]
    RewardPoolTooSmall { available: usize, required: usize },

    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: &'static str },

    #[error("failed to parse RON: {0}")]
    Parse(String),
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(err: ron::error::SpannedError) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum RewardError {
    #[error("reward offer needs at least {required} candidates, got {got}")]
    NotEnoughCandidates { got: usize, required: usize },

    #[error("no reward offer is open")]
    NoOffer,

    #[error("reward choice {index} out of range (offer has {len})")]
    ChoiceOutOfRange { index: usize, len: usize },

    #[error("reward board is busy with another offer")]
    Busy,
}
