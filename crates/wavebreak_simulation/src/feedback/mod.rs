//! Combat feedback sequencer
//!
//! Один HitFeedbackRequested → параллельно:
//! - hit-stop (глобальный time scale, wall-clock таймер)
//! - directional camera shake (wall-clock)
//! - flash на цели (simulation time)
//! - critical glitch на цели (только крит, simulation time)
//! - звук (hit / critical / clang) и particle burst — только события наружу
//!
//! Каждый вид cancel-and-restart: новый удар заменяет текущую sequence того же вида.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

pub mod flash;
pub mod glitch;
pub mod hit_stop;
pub mod shake;

#[cfg(test)]
mod feedback_tests;

pub use flash::{tick_hit_flash, FlashPhase, HitFlash};
pub use glitch::{tick_critical_glitch, CriticalGlitch};
pub use hit_stop::{begin_hit_stop, tick_hit_stop, HitStop};
pub use shake::{tick_camera_shake, CameraShake};

use crate::combat::HitOutcome;
use crate::components::{CameraRig, SpriteParams, VisualOffset, FLASH_PARAM};
use crate::config::{FeedbackConfig, SimulationConfig};

/// Запрос feedback на один удар (крит уже решён в outcome)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitFeedbackRequested {
    pub target: Entity,
    pub hit_point: Vec3,
    pub hit_direction: Vec3,
    pub outcome: HitOutcome,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitSoundRequested {
    pub point: Vec3,
    pub intensity: f32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CriticalSoundRequested {
    pub point: Vec3,
    pub intensity: f32,
}

/// Удар без урона (броня/иммунитет)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ClangSoundRequested {
    pub point: Vec3,
}

/// Particle burst для внешнего presentation слоя
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ParticleBurstRequested {
    pub position: Vec3,
    /// Ориентация вдоль направления удара
    pub rotation: Quat,
    pub size_scale: f32,
    pub speed_scale: f32,
    pub lifetime_scale: f32,
    pub burst_count: u32,
    /// Полный угол разлёта (градусы)
    pub spread_angle: f32,
    pub critical: bool,
}

/// Масштаб эффектов от урона (1.0 = reference damage)
pub fn damage_scale(final_damage: u32, config: &FeedbackConfig) -> f32 {
    if config.particle_reference_damage <= 0.0 {
        return 1.0;
    }
    (final_damage as f32 / config.particle_reference_damage).clamp(0.5, 3.0)
}

/// Particle burst, пропорциональный урону
pub fn particle_burst(
    hit_point: Vec3,
    hit_direction: Vec3,
    outcome: &HitOutcome,
    config: &FeedbackConfig,
) -> ParticleBurstRequested {
    let scale = damage_scale(outcome.final_damage, config);
    let crit_factor = if outcome.critical {
        config.crit_particle_multiplier
    } else {
        1.0
    };

    let direction = hit_direction.normalize_or_zero();
    let rotation = if direction == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::NEG_Z, direction)
    };

    ParticleBurstRequested {
        position: hit_point,
        rotation,
        size_scale: scale,
        speed_scale: scale * crit_factor.sqrt(),
        lifetime_scale: if outcome.critical { 1.5 } else { 1.0 },
        burst_count: (config.particle_base_count as f32 * scale * crit_factor).round() as u32,
        spread_angle: if outcome.critical { 75.0 } else { 45.0 },
        critical: outcome.critical,
    }
}

#[derive(SystemParam)]
pub struct FeedbackOutputs<'w> {
    hit_sounds: EventWriter<'w, HitSoundRequested>,
    critical_sounds: EventWriter<'w, CriticalSoundRequested>,
    clang_sounds: EventWriter<'w, ClangSoundRequested>,
    particles: EventWriter<'w, ParticleBurstRequested>,
}

/// Система: PlayHitFeedback
///
/// Запускает все sequences удара. Цель без SpriteParams (или уже despawned)
/// получает только глобальные эффекты.
pub fn play_hit_feedback(
    mut requests: EventReader<HitFeedbackRequested>,
    config: Res<SimulationConfig>,
    mut hit_stop: ResMut<HitStop>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut shake: ResMut<CameraShake>,
    rig: Res<CameraRig>,
    mut targets: Query<(&mut SpriteParams, &mut VisualOffset, Option<&mut CriticalGlitch>)>,
    mut commands: Commands,
    mut outputs: FeedbackOutputs,
) {
    let fb = &config.feedback;

    for request in requests.read() {
        let outcome = request.outcome;
        let critical = outcome.critical;

        // Hit-stop
        let stop_duration = if critical {
            fb.crit_hit_stop_duration
        } else {
            fb.hit_stop_duration
        };
        begin_hit_stop(&mut hit_stop, &mut virtual_time, stop_duration, fb.hit_stop_scale);

        // Shake
        let amplitude = if critical {
            fb.shake_amplitude * fb.crit_shake_multiplier
        } else {
            fb.shake_amplitude
        };
        shake.begin(
            request.hit_direction,
            amplitude,
            fb.shake_duration,
            fb.shake_frequency,
            fb.shake_directional_bias,
            &rig,
        );

        // Flash + glitch на цели
        if let Ok((mut params, mut offset, glitch)) = targets.get_mut(request.target) {
            params.set(FLASH_PARAM, 1.0);
            commands
                .entity(request.target)
                .insert(HitFlash::new(fb.flash_hold, fb.flash_fade));

            if critical {
                if let Some(mut previous) = glitch {
                    previous.revert(&mut offset.0);
                }
                commands.entity(request.target).insert(CriticalGlitch::new(
                    fb.glitch_duration,
                    fb.glitch_peak,
                    fb.glitch_pulse_frequency,
                    fb.glitch_jitter,
                ));
            }
        }

        // Звук + частицы
        let intensity = damage_scale(outcome.final_damage, fb);
        if outcome.final_damage == 0 {
            outputs.clang_sounds.write(ClangSoundRequested {
                point: request.hit_point,
            });
        } else {
            outputs.hit_sounds.write(HitSoundRequested {
                point: request.hit_point,
                intensity,
            });
            if critical {
                outputs.critical_sounds.write(CriticalSoundRequested {
                    point: request.hit_point,
                    intensity,
                });
            }
            outputs
                .particles
                .write(particle_burst(request.hit_point, request.hit_direction, &outcome, fb));
        }

        crate::log(&format!(
            "✨ Hit feedback on {:?}: {} dmg{}",
            request.target,
            outcome.final_damage,
            if critical { " (CRIT)" } else { "" }
        ));
    }
}

/// Feedback Plugin (Update)
///
/// Порядок: play_hit_feedback → тики (hit-stop и shake по wall-clock,
/// flash и glitch по simulation time).
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitStop>()
            .init_resource::<CameraShake>()
            .init_resource::<CameraRig>()
            .add_event::<HitFeedbackRequested>()
            .add_event::<HitSoundRequested>()
            .add_event::<CriticalSoundRequested>()
            .add_event::<ClangSoundRequested>()
            .add_event::<ParticleBurstRequested>()
            .add_systems(
                Update,
                (
                    play_hit_feedback,
                    tick_hit_stop,
                    tick_camera_shake,
                    tick_hit_flash,
                    tick_critical_glitch,
                )
                    .chain(),
            );
    }
}
