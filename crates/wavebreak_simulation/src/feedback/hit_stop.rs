//! Hit-stop (freeze frame)
//!
//! Масштабирует `Time<Virtual>` (FixedUpdate замирает), таймер идёт по `Time<Real>`.
//! Вложенные удары: resume scale сохраняется только первым вызовом,
//! новый вызов перезапускает таймер. Восстановление ровно одно.

use bevy::prelude::*;

use crate::sequence::{completed, PhaseWait, TimeDomain, TimedSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitStopPhase {
    Frozen,
}

#[derive(Resource, Debug, Default)]
pub struct HitStop {
    /// Some пока активен hit-stop
    resume_scale: Option<f32>,
    sequence: Option<TimedSequence<HitStopPhase>>,
}

impl HitStop {
    pub fn is_active(&self) -> bool {
        self.resume_scale.is_some()
    }

    pub fn resume_scale(&self) -> Option<f32> {
        self.resume_scale
    }

    /// Начать (или перезапустить) hit-stop. Возвращает scale, который надо выставить.
    pub fn begin(&mut self, duration: f32, stop_scale: f32, current_scale: f32) -> f32 {
        if self.resume_scale.is_none() {
            // Захваченный 0 (внешняя пауза) не должен залипнуть после restore
            let resume = if current_scale > 0.0 { current_scale } else { 1.0 };
            self.resume_scale = Some(resume);
        }

        if let Some(previous) = self.sequence.as_mut() {
            previous.cancel();
        }
        self.sequence =
            Some(TimedSequence::new(TimeDomain::Real).then(HitStopPhase::Frozen, PhaseWait::For(duration)));

        stop_scale
    }

    /// Тик по wall-clock. Some(scale) — пора восстановить time scale.
    pub fn tick(&mut self, real_delta: f32) -> Option<f32> {
        let sequence = self.sequence.as_mut()?;
        let events = sequence.tick(real_delta);
        if !completed(&events) && !sequence.is_complete() {
            return None;
        }

        self.sequence = None;
        self.resume_scale.take()
    }
}

/// Запуск hit-stop на ресурсе времени
pub fn begin_hit_stop(hit_stop: &mut HitStop, virtual_time: &mut Time<Virtual>, duration: f32, stop_scale: f32) {
    if duration <= 0.0 {
        return;
    }
    let scale = hit_stop.begin(duration, stop_scale, virtual_time.relative_speed());
    virtual_time.set_relative_speed(scale);
}

/// Система: hit-stop tick (Update, wall-clock)
pub fn tick_hit_stop(
    real_time: Res<Time<Real>>,
    mut hit_stop: ResMut<HitStop>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    if !hit_stop.is_active() {
        return;
    }

    if let Some(resume) = hit_stop.tick(real_time.delta_secs()) {
        virtual_time.set_relative_speed(resume);
        crate::log(&format!("⏱️ Hit-stop over, time scale → {}", resume));
    }
}
