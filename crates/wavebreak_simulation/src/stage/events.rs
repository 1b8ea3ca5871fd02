//! Stage events
//!
//! Вход: BeginStage, ChooseReward
//! Выход: StageStarted/Cleared, WaveStarted/Cleared, AllStagesComplete,
//! RewardChoiceRequested, RewardsOffered, RewardSelected, RewardSequenceComplete

use bevy::prelude::*;

use crate::combat::Item;

/// Запрос: начать стадию (index за пределами каталога → AllStagesComplete)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeginStage {
    pub index: usize,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStarted {
    pub stage: usize,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCleared {
    pub stage: usize,
}

/// Волна заспавнена (пик zoom-out)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStarted {
    pub stage: usize,
    pub wave: usize,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveCleared {
    pub stage: usize,
    pub wave: usize,
}

/// Терминальное событие прогрессии
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllStagesComplete;

/// Director просит выбор награды (ровно один раз на clear)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardChoiceRequested {
    pub stage: usize,
    pub wave: usize,
}

/// Board показывает предложение
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RewardsOffered {
    pub items: Vec<Item>,
}

/// Вход: игрок выбрал предмет из текущего предложения
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChooseReward {
    pub index: usize,
}

/// Выбранный предмет (применяется к PlayerStats)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RewardSelected {
    pub item: Item,
}

/// Board закончил retract — director может продолжать
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardSequenceComplete;
