//! Critical glitch: пульсирующее затухающее искажение + jitter позиции.
//!
//! Jitter пишется в `VisualOffset` и откатывается в начале каждого тика,
//! так что суммарный дрейф позиции всегда 0.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::components::{SpriteParams, VisualOffset, GLITCH_PARAM};
use crate::sequence::{PhaseWait, SequenceClock, TimeDomain, TimedSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchPhase {
    Distort,
}

#[derive(Component, Debug, Clone)]
pub struct CriticalGlitch {
    sequence: TimedSequence<GlitchPhase>,
    peak: f32,
    pulse_frequency: f32,
    jitter: f32,
    /// Jitter, применённый в прошлом тике (откатывается)
    applied: Vec3,
}

impl CriticalGlitch {
    pub fn new(duration: f32, peak: f32, pulse_frequency: f32, jitter: f32) -> Self {
        Self {
            sequence: TimedSequence::new(TimeDomain::Simulation)
                .then(GlitchPhase::Distort, PhaseWait::For(duration)),
            peak,
            pulse_frequency,
            jitter,
            applied: Vec3::ZERO,
        }
    }

    pub fn applied_offset(&self) -> Vec3 {
        self.applied
    }

    pub fn is_complete(&self) -> bool {
        self.sequence.is_complete()
    }

    /// Откатить jitter прошлого тика, продвинуться, применить новый.
    /// Возвращает интенсивность искажения.
    pub fn tick(&mut self, delta: f32, offset: &mut Vec3) -> f32 {
        *offset -= self.applied;
        self.applied = Vec3::ZERO;

        self.sequence.tick(delta);
        if self.sequence.is_complete() {
            return 0.0;
        }

        let remaining = 1.0 - self.sequence.phase_progress();
        let t = self.sequence.total_elapsed();
        let pulse = 0.6 + 0.4 * (t * self.pulse_frequency * TAU).sin();

        // Детерминированный псевдо-шум (без RNG симуляции)
        let jitter = Vec3::new((t * 127.1 + 0.3).sin(), 0.0, (t * 311.7 + 1.7).sin());
        self.applied = jitter * self.jitter * remaining;
        *offset += self.applied;

        self.peak * remaining * pulse
    }

    /// Отмена: откатить jitter (перед заменой новым glitch)
    pub fn revert(&mut self, offset: &mut Vec3) {
        *offset -= self.applied;
        self.applied = Vec3::ZERO;
    }
}

/// Система: glitch tick (Update, simulation time)
pub fn tick_critical_glitch(
    clock: SequenceClock,
    mut glitching: Query<(Entity, &mut CriticalGlitch, &mut SpriteParams, &mut VisualOffset)>,
    mut commands: Commands,
) {
    let delta = clock.delta(TimeDomain::Simulation);

    for (entity, mut glitch, mut params, mut offset) in glitching.iter_mut() {
        let intensity = glitch.tick(delta, &mut offset.0);
        params.set(GLITCH_PARAM, intensity);

        if glitch.is_complete() {
            commands.entity(entity).remove::<CriticalGlitch>();
        }
    }
}
