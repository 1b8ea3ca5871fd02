//! Tests for feedback sequences (без ECS).

use super::*;
use crate::combat::resolve_hit;

const DT: f32 = 1.0 / 60.0;

#[test]
fn test_hit_stop_nested_restores_original_scale_once() {
    let mut hit_stop = HitStop::default();

    // Первый удар: scale 1.0 сохраняется
    let scale = hit_stop.begin(0.1, 0.0, 1.0);
    assert_eq!(scale, 0.0);
    assert_eq!(hit_stop.resume_scale(), Some(1.0));

    assert_eq!(hit_stop.tick(0.05), None);

    // Второй удар во время freeze: текущий scale 0 не должен перезаписать resume
    hit_stop.begin(0.1, 0.0, 0.0);
    assert_eq!(hit_stop.resume_scale(), Some(1.0));

    // Таймер перезапущен: 0.08 после второго удара ещё рано
    assert_eq!(hit_stop.tick(0.08), None);
    assert_eq!(hit_stop.tick(0.05), Some(1.0));

    assert!(!hit_stop.is_active());
    assert_eq!(hit_stop.tick(1.0), None, "restore ровно один раз");
}

#[test]
fn test_hit_stop_captured_zero_resumes_to_one() {
    let mut hit_stop = HitStop::default();
    hit_stop.begin(0.05, 0.0, 0.0);
    assert_eq!(hit_stop.tick(0.1), Some(1.0));
}

#[test]
fn test_hit_stop_keeps_custom_scale() {
    let mut hit_stop = HitStop::default();
    hit_stop.begin(0.05, 0.1, 0.5);
    assert_eq!(hit_stop.tick(0.1), Some(0.5));
}

#[test]
fn test_flash_hold_then_linear_fade() {
    let mut flash = HitFlash::new(0.1, 0.2);

    assert_eq!(flash.tick(0.05), 1.0);
    // 0.1 hold + 0.1 из 0.2 fade
    let mid = flash.tick(0.15);
    assert!((mid - 0.5).abs() < 1e-4, "mid = {}", mid);

    assert_eq!(flash.tick(1.0), 0.0);
    assert!(flash.is_complete());
}

#[test]
fn test_glitch_jitter_has_no_net_drift() {
    let mut glitch = CriticalGlitch::new(0.3, 1.0, 30.0, 0.05);
    let mut offset = Vec3::ZERO;
    let mut peak_intensity: f32 = 0.0;
    let mut moved = false;

    while !glitch.is_complete() {
        peak_intensity = peak_intensity.max(glitch.tick(DT, &mut offset));
        moved |= offset != Vec3::ZERO;
    }

    assert!(moved, "jitter должен быть виден во время glitch");
    assert!(peak_intensity > 0.0 && peak_intensity <= 1.0);
    assert_eq!(offset, Vec3::ZERO);
    assert_eq!(glitch.applied_offset(), Vec3::ZERO);
}

#[test]
fn test_glitch_revert_before_replace() {
    let mut glitch = CriticalGlitch::new(0.3, 1.0, 30.0, 0.05);
    let base = Vec3::new(1.0, 0.0, 2.0);
    let mut offset = base;

    glitch.tick(DT, &mut offset);
    glitch.tick(DT, &mut offset);
    glitch.revert(&mut offset);

    assert!(offset.distance(base) < 1e-6);
}

#[test]
fn test_shake_bias_projects_on_camera_axes() {
    let rig = CameraRig::default();
    let mut shake = CameraShake::default();

    shake.begin(Vec3::new(2.0, 0.0, 0.0), 0.2, 0.2, 25.0, 0.6, &rig);
    assert_eq!(shake.bias(), Vec3::X);

    // Top-down: удар "вверх экрана" (-Z)
    shake.begin(Vec3::new(0.0, 0.0, -1.0), 0.2, 0.2, 25.0, 0.6, &rig);
    assert_eq!(shake.bias(), Vec3::NEG_Z);

    // Вертикаль не проецируется на плоскость камеры
    shake.begin(Vec3::Y, 0.2, 0.2, 25.0, 0.6, &rig);
    assert_eq!(shake.bias(), Vec3::ZERO);
}

#[test]
fn test_shake_decays_to_zero() {
    let rig = CameraRig::default();
    let mut shake = CameraShake::default();
    shake.begin(Vec3::X, 0.3, 0.2, 25.0, 1.0, &rig);

    let first = shake.tick(DT);
    // Чистый bias: смещение вдоль удара
    assert!(first.x > 0.0);
    assert!(first.length() <= 0.3 + 1e-6);

    let mut ticks = 0;
    while shake.is_active() {
        shake.tick(DT);
        ticks += 1;
        assert!(ticks < 100);
    }
    assert_eq!(shake.tick(DT), Vec3::ZERO);
}

#[test]
fn test_particle_burst_scales_with_damage_and_crit() {
    let config = FeedbackConfig::default();
    let normal = resolve_hit(20, 0.99, 0.15, 2.0);
    let crit = resolve_hit(20, 0.0, 0.15, 2.0);

    let normal_burst = particle_burst(Vec3::ZERO, Vec3::X, &normal, &config);
    let crit_burst = particle_burst(Vec3::ZERO, Vec3::X, &crit, &config);

    assert_eq!(normal_burst.burst_count, config.particle_base_count);
    assert!(crit_burst.burst_count > normal_burst.burst_count);
    assert!(crit_burst.critical && !normal_burst.critical);
    assert!(crit_burst.spread_angle > normal_burst.spread_angle);
    // Ориентация вдоль удара
    assert!((crit_burst.rotation * Vec3::NEG_Z).distance(Vec3::X) < 1e-5);
}

#[test]
fn test_damage_scale_clamped() {
    let config = FeedbackConfig::default();
    assert_eq!(damage_scale(1, &config), 0.5);
    assert_eq!(damage_scale(10_000, &config), 3.0);
    assert_eq!(damage_scale(20, &config), 1.0);
}
