//! Directional camera shake
//!
//! Затухающий шум + directional bias вдоль направления удара,
//! спроецированного на локальные оси камеры. Wall-clock время.

use bevy::prelude::*;

use crate::components::CameraRig;
use crate::sequence::{PhaseWait, TimeDomain, TimedSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakePhase {
    Shaking,
}

#[derive(Resource, Debug, Default)]
pub struct CameraShake {
    sequence: Option<TimedSequence<ShakePhase>>,
    amplitude: f32,
    frequency: f32,
    bias_weight: f32,
    /// Направление удара на плоскости камеры (unit или ноль)
    bias: Vec3,
    right: Vec3,
    up: Vec3,
}

impl CameraShake {
    pub fn is_active(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn bias(&self) -> Vec3 {
        self.bias
    }

    /// Новый удар отменяет текущий shake и стартует заново
    pub fn begin(
        &mut self,
        hit_direction: Vec3,
        amplitude: f32,
        duration: f32,
        frequency: f32,
        bias_weight: f32,
        rig: &CameraRig,
    ) {
        if let Some(previous) = self.sequence.as_mut() {
            previous.cancel();
        }

        self.right = rig.right.normalize_or_zero();
        self.up = rig.up.normalize_or_zero();
        self.bias = (self.right * hit_direction.dot(self.right) + self.up * hit_direction.dot(self.up))
            .normalize_or_zero();
        self.amplitude = amplitude;
        self.frequency = frequency;
        self.bias_weight = bias_weight.clamp(0.0, 1.0);
        self.sequence = Some(
            TimedSequence::new(TimeDomain::Real).then(ShakePhase::Shaking, PhaseWait::For(duration)),
        );
    }

    /// Offset камеры после тика (ноль когда shake закончился)
    pub fn tick(&mut self, real_delta: f32) -> Vec3 {
        let Some(sequence) = self.sequence.as_mut() else {
            return Vec3::ZERO;
        };

        sequence.tick(real_delta);
        if sequence.is_complete() {
            self.sequence = None;
            return Vec3::ZERO;
        }

        let decay = (1.0 - sequence.phase_progress()).powi(2);
        let t = sequence.total_elapsed() * self.frequency;

        let x_noise = (t * 1.0).sin() * 0.5 + (t * 2.3).cos() * 0.3 + (t * 4.1).sin() * 0.2;
        let y_noise = (t * 1.7).cos() * 0.5 + (t * 3.1).sin() * 0.3 + (t * 5.3).cos() * 0.2;
        let noise = self.right * x_noise + self.up * y_noise;

        (noise * (1.0 - self.bias_weight) + self.bias * self.bias_weight) * self.amplitude * decay
    }
}

/// Система: camera shake tick (Update, wall-clock)
pub fn tick_camera_shake(
    real_time: Res<Time<Real>>,
    mut shake: ResMut<CameraShake>,
    mut rig: ResMut<CameraRig>,
) {
    if !shake.is_active() && rig.shake_offset == Vec3::ZERO {
        return;
    }
    rig.shake_offset = shake.tick(real_time.delta_secs());
}
