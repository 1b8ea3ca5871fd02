//! Stage director: Idle → Transitioning → WaveActive → WaitingForReward → ...
//!
//! Чистая логика без ECS: методы возвращают `DirectorSignal`, система
//! (`run_stage_director`) исполняет их (спавн, события, reward board).
//!
//! Reward barrier: следующая волна не начинается, пока не пришёл
//! `on_reward_complete`. Повторный clear во время ожидания игнорируется.

use bevy::prelude::*;

use super::catalog::StageCatalog;
use crate::config::DirectorConfig;
use crate::sequence::{entered, PhaseWait, TimeDomain, TimedSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorPhase {
    Idle,
    Transitioning,
    WaveActive,
    WaitingForReward,
    AllComplete,
}

/// Переход к волне: пауза → zoom-out → спавн (пик) → zoom-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Delay,
    ZoomOut,
    Spawn,
    ZoomIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPhase {
    Delay,
}

/// Что system должна сделать по итогам вызова director'а
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorSignal {
    StageStarted { stage: usize },
    SpawnWave { stage: usize, wave: usize },
    WaveStarted { stage: usize, wave: usize },
    WaveCleared { stage: usize, wave: usize },
    RequestReward { stage: usize, wave: usize },
    StageCleared { stage: usize },
    AllStagesComplete,
}

#[derive(Resource, Debug, Clone)]
pub struct StageDirector {
    phase: DirectorPhase,
    stage_index: usize,
    wave_index: usize,
    /// Живые враги текущей волны (одна волна за раз)
    roster: Vec<Entity>,
    waiting_for_reward: bool,
    transition: Option<TimedSequence<TransitionPhase>>,
    reward_prompt: Option<TimedSequence<PromptPhase>>,
    zoom_peak: f32,
}

impl Default for StageDirector {
    fn default() -> Self {
        Self {
            phase: DirectorPhase::Idle,
            stage_index: 0,
            wave_index: 0,
            roster: Vec::new(),
            waiting_for_reward: false,
            transition: None,
            reward_prompt: None,
            zoom_peak: 1.0,
        }
    }
}

impl StageDirector {
    pub fn phase(&self) -> DirectorPhase {
        self.phase
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    pub fn roster(&self) -> &[Entity] {
        &self.roster
    }

    pub fn is_waiting_for_reward(&self) -> bool {
        self.waiting_for_reward
    }

    /// Множитель zoom камеры (1.0 вне перехода)
    pub fn zoom(&self) -> f32 {
        let Some(transition) = self.transition.as_ref() else {
            return 1.0;
        };
        let t = transition.phase_progress();
        match transition.current_phase() {
            Some(TransitionPhase::ZoomOut) => 1.0 + (self.zoom_peak - 1.0) * t,
            Some(TransitionPhase::Spawn) => self.zoom_peak,
            Some(TransitionPhase::ZoomIn) => self.zoom_peak + (1.0 - self.zoom_peak) * t,
            Some(TransitionPhase::Delay) | None => 1.0,
        }
    }

    /// BeginStage(index). За пределами каталога → AllStagesComplete (терминально).
    pub fn begin_stage(
        &mut self,
        index: usize,
        catalog: &StageCatalog,
        config: &DirectorConfig,
    ) -> Vec<DirectorSignal> {
        self.roster.clear();
        self.waiting_for_reward = false;
        self.reward_prompt = None;
        self.transition = None;

        if index >= catalog.stage_count() {
            if self.phase == DirectorPhase::AllComplete {
                return Vec::new();
            }
            self.phase = DirectorPhase::AllComplete;
            crate::log_info("🏁 All stages complete");
            return vec![DirectorSignal::AllStagesComplete];
        }

        self.stage_index = index;
        self.wave_index = 0;
        crate::log_info(&format!("🗺️ Stage {} begins", index));

        self.start_transition(0.0, config);
        vec![DirectorSignal::StageStarted { stage: index }]
    }

    /// Продвинуть переход и отложенный reward prompt
    pub fn tick(&mut self, delta: f32) -> Vec<DirectorSignal> {
        let mut signals = Vec::new();

        if let Some(transition) = self.transition.as_mut() {
            let events = transition.tick(delta);
            if entered(&events, TransitionPhase::Spawn) {
                self.phase = DirectorPhase::WaveActive;
                signals.push(DirectorSignal::SpawnWave {
                    stage: self.stage_index,
                    wave: self.wave_index,
                });
                signals.push(DirectorSignal::WaveStarted {
                    stage: self.stage_index,
                    wave: self.wave_index,
                });
            }
            if transition.is_complete() {
                self.transition = None;
            }
        }

        if let Some(prompt) = self.reward_prompt.as_mut() {
            prompt.tick(delta);
            if prompt.is_complete() {
                self.reward_prompt = None;
                signals.push(DirectorSignal::RequestReward {
                    stage: self.stage_index,
                    wave: self.wave_index,
                });
            }
        }

        signals
    }

    /// Подписка на смерть: враг попадает в roster текущей волны
    pub fn register_spawned(&mut self, enemy: Entity) {
        if !self.roster.contains(&enemy) {
            self.roster.push(enemy);
        }
    }

    /// Смерть врага. Неизвестный (или уже удалённый) враг игнорируется.
    pub fn on_enemy_died(&mut self, enemy: Entity, config: &DirectorConfig) -> Vec<DirectorSignal> {
        let Some(index) = self.roster.iter().position(|&e| e == enemy) else {
            return Vec::new();
        };
        self.roster.remove(index);

        crate::log(&format!("👾 Roster: {} left", self.roster.len()));

        if self.roster.is_empty() {
            self.notify_wave_cleared(config)
        } else {
            Vec::new()
        }
    }

    /// Wave clear (идемпотентно): prompt ставится ровно один раз
    pub fn notify_wave_cleared(&mut self, config: &DirectorConfig) -> Vec<DirectorSignal> {
        if self.waiting_for_reward || self.phase != DirectorPhase::WaveActive {
            return Vec::new();
        }

        self.waiting_for_reward = true;
        self.phase = DirectorPhase::WaitingForReward;
        self.roster.clear();
        self.reward_prompt = Some(
            TimedSequence::new(TimeDomain::Simulation)
                .then(PromptPhase::Delay, PhaseWait::For(config.reward_prompt_delay)),
        );

        crate::log_info(&format!(
            "✅ Wave {} of stage {} cleared",
            self.wave_index, self.stage_index
        ));

        vec![DirectorSignal::WaveCleared {
            stage: self.stage_index,
            wave: self.wave_index,
        }]
    }

    /// Reward sequence complete: единственный выход из WaitingForReward
    pub fn on_reward_complete(&mut self, catalog: &StageCatalog, config: &DirectorConfig) -> Vec<DirectorSignal> {
        if !self.waiting_for_reward {
            crate::log_warning("⚠️ Reward completion without pending reward, ignored");
            return Vec::new();
        }

        self.waiting_for_reward = false;
        self.reward_prompt = None;
        self.wave_index += 1;

        if self.wave_index < catalog.wave_count(self.stage_index) {
            self.start_transition(config.next_wave_delay, config);
            return Vec::new();
        }

        let cleared = self.stage_index;
        crate::log_info(&format!("🏆 Stage {} cleared", cleared));

        let mut signals = vec![DirectorSignal::StageCleared { stage: cleared }];
        signals.extend(self.begin_stage(cleared + 1, catalog, config));
        signals
    }

    fn start_transition(&mut self, delay: f32, config: &DirectorConfig) {
        self.phase = DirectorPhase::Transitioning;
        self.zoom_peak = config.zoom_out_level;
        self.transition = Some(
            TimedSequence::new(TimeDomain::Simulation)
                .then(TransitionPhase::Delay, PhaseWait::For(delay))
                .then(TransitionPhase::ZoomOut, PhaseWait::For(config.zoom_out_duration))
                .then(TransitionPhase::Spawn, PhaseWait::Instant)
                .then(TransitionPhase::ZoomIn, PhaseWait::For(config.zoom_in_duration)),
        );
    }
}
