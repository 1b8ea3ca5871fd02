//! Tuning симуляции (knockback, feedback, stage director).
//!
//! Все поля имеют defaults; RON может переопределить любое подмножество:
//!
//! ```ron
//! (
//!     knockback: (bounce_budget: 2, timeout: 1.5),
//!     feedback: (crit_hit_stop_duration: 0.2),
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Knockback/bounce параметры
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackConfig {
    /// Горизонтальная сила импульса (m/s при multiplier = 1)
    pub force: f32,
    /// Вертикальная сила импульса (m/s при multiplier = 1)
    pub up_force: f32,
    /// Baseline делитель урона для multiplier
    pub damage_divisor: f32,
    pub min_multiplier: f32,
    pub max_multiplier: f32,
    /// Гравитация (m/s², модуль, направлена вниз)
    pub gravity: f32,
    /// Затухание скорости на каждом отскоке
    pub damping: f32,
    pub bounce_budget: u32,
    /// Отражённая вертикальная скорость ниже порога → settle
    pub min_bounce_speed: f32,
    /// Допуск "у земли" для predicate
    pub ground_tolerance: f32,
    /// Жёсткий лимит длительности всей bounce sequence (секунды)
    pub timeout: f32,
}

impl Default for KnockbackConfig {
    fn default() -> Self {
        Self {
            force: 6.0,
            up_force: 5.0,
            damage_divisor: 20.0,
            min_multiplier: 0.8,
            max_multiplier: 2.5,
            gravity: 30.0,
            damping: 0.5,
            bounce_budget: 3,
            min_bounce_speed: 1.0,
            ground_tolerance: 0.05,
            timeout: 2.0,
        }
    }
}

/// Combat feedback (hit-stop, shake, flash, glitch, particles)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub hit_stop_duration: f32,
    pub crit_hit_stop_duration: f32,
    /// Time scale во время hit-stop
    pub hit_stop_scale: f32,

    pub shake_duration: f32,
    pub shake_amplitude: f32,
    pub crit_shake_multiplier: f32,
    pub shake_frequency: f32,
    /// Доля directional bias в итоговом offset (0 = только шум)
    pub shake_directional_bias: f32,

    pub flash_hold: f32,
    pub flash_fade: f32,

    pub glitch_duration: f32,
    pub glitch_peak: f32,
    pub glitch_pulse_frequency: f32,
    pub glitch_jitter: f32,

    pub particle_base_count: u32,
    pub particle_reference_damage: f32,
    pub crit_particle_multiplier: f32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            hit_stop_duration: 0.06,
            crit_hit_stop_duration: 0.12,
            hit_stop_scale: 0.0,
            shake_duration: 0.2,
            shake_amplitude: 0.15,
            crit_shake_multiplier: 2.0,
            shake_frequency: 25.0,
            shake_directional_bias: 0.6,
            flash_hold: 0.05,
            flash_fade: 0.15,
            glitch_duration: 0.3,
            glitch_peak: 1.0,
            glitch_pulse_frequency: 30.0,
            glitch_jitter: 0.05,
            particle_base_count: 8,
            particle_reference_damage: 20.0,
            crit_particle_multiplier: 2.0,
        }
    }
}

/// Stage director: задержки и длительности переходов
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Пауза между clear и показом наград
    pub reward_prompt_delay: f32,
    /// Пауза между выбором награды и следующей волной
    pub next_wave_delay: f32,
    pub zoom_out_duration: f32,
    pub zoom_in_duration: f32,
    /// Zoom камеры в пике перехода (спавн происходит здесь)
    pub zoom_out_level: f32,
    /// Анимация retract на reward board
    pub reward_retract_duration: f32,
    /// Сколько мёртвый враг живёт до despawn
    pub enemy_despawn_delay: f32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            reward_prompt_delay: 0.8,
            next_wave_delay: 1.0,
            zoom_out_duration: 0.4,
            zoom_in_duration: 0.4,
            zoom_out_level: 1.3,
            reward_retract_duration: 0.35,
            enemy_despawn_delay: 1.5,
        }
    }
}

/// Полный tuning (Resource)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub knockback: KnockbackConfig,
    pub feedback: FeedbackConfig,
    pub director: DirectorConfig,
}

impl SimulationConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let kb = &self.knockback;
        if !(0.0..=1.0).contains(&kb.damping) {
            return Err(invalid("knockback.damping", "must be in [0, 1]"));
        }
        if kb.min_multiplier > kb.max_multiplier || kb.min_multiplier < 0.0 {
            return Err(invalid("knockback.min_multiplier", "must be in [0, max_multiplier]"));
        }
        if kb.damage_divisor <= 0.0 {
            return Err(invalid("knockback.damage_divisor", "must be positive"));
        }
        if kb.timeout <= 0.0 {
            return Err(invalid("knockback.timeout", "must be positive"));
        }

        let fb = &self.feedback;
        if fb.hit_stop_scale < 0.0 {
            return Err(invalid("feedback.hit_stop_scale", "must be non-negative"));
        }

        let dir = &self.director;
        if dir.reward_prompt_delay < 0.0 || dir.next_wave_delay < 0.0 {
            return Err(invalid("director delays", "must be non-negative"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidTuning { field, reason }
}
