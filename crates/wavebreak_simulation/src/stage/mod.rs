//! Stage / wave / reward orchestration
//!
//! - catalog: контент (стадии, волны, пул наград)
//! - director: state machine прогрессии + reward barrier
//! - reward: reward board (3 предмета → выбор → retract)
//! - systems: ECS обвязка director'а

use bevy::prelude::*;

pub mod catalog;
pub mod director;
pub mod events;
pub mod reward;
pub mod systems;

#[cfg(test)]
mod stage_tests;

pub use catalog::{SpawnEntry, SpawnPoint, StageCatalog, StageDef, WaveDef};
pub use director::{DirectorPhase, DirectorSignal, StageDirector};
pub use events::*;
pub use reward::{apply_reward_choice, draw_rewards, tick_reward_board, RewardBoard, REWARD_CHOICE_COUNT};
pub use systems::run_stage_director;

/// Stage Plugin (Update)
///
/// Порядок: выбор награды → retract board → director.
/// Смерти врагов (FixedUpdate) director читает в следующем Update проходе.
pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StageCatalog>()
            .init_resource::<StageDirector>()
            .init_resource::<RewardBoard>()
            .add_event::<BeginStage>()
            .add_event::<StageStarted>()
            .add_event::<StageCleared>()
            .add_event::<WaveStarted>()
            .add_event::<WaveCleared>()
            .add_event::<AllStagesComplete>()
            .add_event::<RewardChoiceRequested>()
            .add_event::<RewardsOffered>()
            .add_event::<ChooseReward>()
            .add_event::<RewardSelected>()
            .add_event::<RewardSequenceComplete>()
            .add_systems(
                Update,
                (apply_reward_choice, tick_reward_board, run_stage_director).chain(),
            );
    }
}
