//! Hit flash: полная интенсивность → hold → линейный fade до 0.

use bevy::prelude::*;

use crate::components::{SpriteParams, FLASH_PARAM};
use crate::sequence::{PhaseWait, SequenceClock, TimeDomain, TimedSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    Hold,
    Fade,
}

#[derive(Component, Debug, Clone)]
pub struct HitFlash {
    sequence: TimedSequence<FlashPhase>,
}

impl HitFlash {
    pub fn new(hold: f32, fade: f32) -> Self {
        Self {
            sequence: TimedSequence::new(TimeDomain::Simulation)
                .then(FlashPhase::Hold, PhaseWait::For(hold))
                .then(FlashPhase::Fade, PhaseWait::For(fade)),
        }
    }

    pub fn intensity(&self) -> f32 {
        match self.sequence.current_phase() {
            Some(FlashPhase::Hold) => 1.0,
            Some(FlashPhase::Fade) => 1.0 - self.sequence.phase_progress(),
            None => 0.0,
        }
    }

    pub fn tick(&mut self, delta: f32) -> f32 {
        self.sequence.tick(delta);
        self.intensity()
    }

    pub fn is_complete(&self) -> bool {
        self.sequence.is_complete()
    }
}

/// Система: flash tick (Update, simulation time)
pub fn tick_hit_flash(
    clock: SequenceClock,
    mut flashing: Query<(Entity, &mut HitFlash, &mut SpriteParams)>,
    mut commands: Commands,
) {
    let delta = clock.delta(TimeDomain::Simulation);

    for (entity, mut flash, mut params) in flashing.iter_mut() {
        let intensity = flash.tick(delta);
        params.set(FLASH_PARAM, intensity);

        if flash.is_complete() {
            commands.entity(entity).remove::<HitFlash>();
        }
    }
}
