//! Reward board: показывает ровно 3 предмета, принимает выбор,
//! проигрывает retract и сообщает "sequence complete".
//!
//! Поток: show_rewards → choose(index) → RewardSelected → retract → RewardSequenceComplete

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::events::{ChooseReward, RewardSelected, RewardSequenceComplete};
use crate::combat::Item;
use crate::config::SimulationConfig;
use crate::error::RewardError;
use crate::sequence::{PhaseWait, SequenceClock, TimeDomain, TimedSequence};

/// Размер предложения (и минимальный размер reward pool)
pub const REWARD_CHOICE_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardPhase {
    Retract,
}

#[derive(Resource, Debug, Clone)]
pub struct RewardBoard {
    offer: Vec<Item>,
    retract_duration: f32,
    retract: Option<TimedSequence<BoardPhase>>,
}

impl FromWorld for RewardBoard {
    fn from_world(world: &mut World) -> Self {
        let retract = world
            .get_resource::<SimulationConfig>()
            .map(|config| config.director.reward_retract_duration)
            .unwrap_or_default();
        Self::new(retract)
    }
}

impl RewardBoard {
    pub fn new(retract_duration: f32) -> Self {
        Self {
            offer: Vec::new(),
            retract_duration: retract_duration.max(0.0),
            retract: None,
        }
    }

    pub fn offer(&self) -> &[Item] {
        &self.offer
    }

    pub fn is_showing(&self) -> bool {
        !self.offer.is_empty()
    }

    pub fn is_retracting(&self) -> bool {
        self.retract.is_some()
    }

    /// Показать первые 3 кандидата.
    ///
    /// Меньше 3 → ошибка без изменения состояния (board остаётся скрытым).
    pub fn show_rewards(&mut self, candidates: &[Item]) -> Result<&[Item], RewardError> {
        if candidates.len() < REWARD_CHOICE_COUNT {
            return Err(RewardError::NotEnoughCandidates {
                got: candidates.len(),
                required: REWARD_CHOICE_COUNT,
            });
        }
        if self.is_showing() || self.is_retracting() {
            return Err(RewardError::Busy);
        }

        self.offer = candidates[..REWARD_CHOICE_COUNT].to_vec();
        Ok(&self.offer)
    }

    /// Выбор игрока: закрывает предложение и запускает retract
    pub fn choose(&mut self, index: usize) -> Result<Item, RewardError> {
        if self.offer.is_empty() {
            return Err(RewardError::NoOffer);
        }
        if index >= self.offer.len() {
            return Err(RewardError::ChoiceOutOfRange {
                index,
                len: self.offer.len(),
            });
        }

        let item = self.offer.swap_remove(index);
        self.offer.clear();
        self.retract = Some(
            TimedSequence::new(TimeDomain::Real).then(BoardPhase::Retract, PhaseWait::For(self.retract_duration)),
        );
        Ok(item)
    }

    /// Убрать открытое предложение и retract без выбора (стадия перезапущена снаружи).
    ///
    /// `RewardSequenceComplete` после этого не придёт. true — было что убирать.
    pub fn dismiss(&mut self) -> bool {
        let had_offer = self.is_showing() || self.is_retracting();
        self.offer.clear();
        self.retract = None;
        had_offer
    }

    /// true — retract закончился (ровно один раз на выбор)
    pub fn tick(&mut self, delta: f32) -> bool {
        let Some(retract) = self.retract.as_mut() else {
            return false;
        };
        retract.tick(delta);
        if !retract.is_complete() {
            return false;
        }
        self.retract = None;
        true
    }
}

/// Случайные 3 предмета из пула (без повторов)
pub fn draw_rewards<R: Rng + ?Sized>(pool: &[Item], rng: &mut R) -> Vec<Item> {
    pool.choose_multiple(rng, REWARD_CHOICE_COUNT).cloned().collect()
}

/// Система: выбор игрока → RewardSelected
pub fn apply_reward_choice(
    mut choices: EventReader<ChooseReward>,
    board: Option<ResMut<RewardBoard>>,
    mut selected: EventWriter<RewardSelected>,
) {
    let Some(mut board) = board else {
        for _ in choices.read() {
            crate::log_warning("⚠️ ChooseReward ignored: no RewardBoard");
        }
        return;
    };

    for choice in choices.read() {
        match board.choose(choice.index) {
            Ok(item) => {
                crate::log_info(&format!("🎁 Reward chosen: {}", item.name));
                selected.write(RewardSelected { item });
            }
            Err(err) => crate::log_warning(&format!("⚠️ Reward choice {} rejected: {}", choice.index, err)),
        }
    }
}

/// Система: retract анимация (wall-clock, видна во время hit-stop)
pub fn tick_reward_board(
    clock: SequenceClock,
    board: Option<ResMut<RewardBoard>>,
    mut complete: EventWriter<RewardSequenceComplete>,
) {
    let Some(mut board) = board else {
        return;
    };
    if !board.is_retracting() {
        return;
    }

    if board.tick(clock.delta(TimeDomain::Real)) {
        crate::log("🎁 Reward sequence complete");
        complete.write(RewardSequenceComplete);
    }
}
