//! Tests for the knockback integrator.

use super::knockback::*;
use crate::config::KnockbackConfig;
use bevy::prelude::*;

const DT: f32 = 1.0 / 60.0;

/// Прогон до settle; возвращает (шагов, отскоков, причина)
fn simulate(
    knockback: &mut Knockback,
    position: &mut Vec3,
    velocity: &mut Vec3,
    config: &KnockbackConfig,
) -> (usize, u32, SettleReason) {
    let mut bounced = 0;
    for tick in 1..=10_000 {
        match knockback.step(position, velocity, DT, config) {
            KnockbackStep::Airborne => {}
            KnockbackStep::Bounced => bounced += 1,
            KnockbackStep::Settled(reason) => return (tick, bounced, reason),
        }
    }
    panic!("knockback never settled");
}

#[test]
fn test_multiplier_scales_and_clamps() {
    let config = KnockbackConfig::default();
    assert_eq!(knockback_multiplier(20, &config), 1.0);
    assert_eq!(knockback_multiplier(0, &config), config.min_multiplier);
    assert_eq!(knockback_multiplier(10_000, &config), config.max_multiplier);
}

#[test]
fn test_launch_velocity_ignores_hit_height() {
    let config = KnockbackConfig::default();
    let velocity = launch_velocity(Vec3::new(3.0, 7.0, 4.0), 20, &config);

    assert!((velocity.x - 0.6 * config.force).abs() < 1e-5);
    assert!((velocity.z - 0.8 * config.force).abs() < 1e-5);
    assert_eq!(velocity.y, config.up_force);
}

#[test]
fn test_bounces_until_budget_and_lands_on_remembered_ground() {
    // Мягкое затухание: каждый отскок выше порога, settle только по бюджету
    let config = KnockbackConfig {
        damping: 0.8,
        min_bounce_speed: 0.5,
        ground_tolerance: 0.0,
        ..Default::default()
    };
    let ground = 0.5;
    let mut position = Vec3::new(0.0, ground, 0.0);
    let mut velocity = launch_velocity(Vec3::X, 20, &config);
    let mut knockback = Knockback::launch(ground, velocity, &config);

    let (ticks, bounced, reason) = simulate(&mut knockback, &mut position, &mut velocity, &config);

    assert_eq!(reason, SettleReason::BudgetExhausted);
    assert_eq!(knockback.bounces, config.bounce_budget);
    assert_eq!(bounced as u32, config.bounce_budget - 1, "последний контакт = settle");
    assert_eq!(knockback.bounces_remaining(), 0);
    assert_eq!(velocity, Vec3::ZERO);
    assert_eq!(position.y, ground);
    assert!(position.x > 0.0, "отлетел по направлению удара");
    assert!((ticks as f32) * DT < config.timeout);
    assert!(knockback.is_settled());
}

#[test]
fn test_weak_rebound_settles_below_threshold() {
    let config = KnockbackConfig {
        damping: 0.1,
        ..Default::default()
    };
    let mut position = Vec3::ZERO;
    let mut velocity = launch_velocity(Vec3::Z, 20, &config);
    let mut knockback = Knockback::launch(0.0, velocity, &config);

    let (_, bounced, reason) = simulate(&mut knockback, &mut position, &mut velocity, &config);

    assert_eq!(reason, SettleReason::BelowThreshold);
    assert_eq!(bounced, 0);
    assert_eq!(knockback.bounces, 1);
}

#[test]
fn test_timeout_forces_settle() {
    // Почти без гравитации тело не вернётся на землю до timeout
    let config = KnockbackConfig {
        gravity: 0.1,
        timeout: 0.5,
        ..Default::default()
    };
    let mut position = Vec3::ZERO;
    let mut velocity = launch_velocity(Vec3::X, 20, &config);
    let mut knockback = Knockback::launch(0.0, velocity, &config);

    let (ticks, _, reason) = simulate(&mut knockback, &mut position, &mut velocity, &config);

    assert_eq!(reason, SettleReason::TimedOut);
    assert!(((ticks as f32) * DT - config.timeout).abs() <= 2.0 * DT);
    assert_eq!(position.y, 0.0);
    assert_eq!(velocity, Vec3::ZERO);
}

#[test]
fn test_settled_knockback_is_inert() {
    let config = KnockbackConfig {
        bounce_budget: 1,
        ..Default::default()
    };
    let mut position = Vec3::ZERO;
    let mut velocity = launch_velocity(Vec3::X, 20, &config);
    let mut knockback = Knockback::launch(0.0, velocity, &config);
    simulate(&mut knockback, &mut position, &mut velocity, &config);

    let before = position;
    assert_eq!(
        knockback.step(&mut position, &mut velocity, DT, &config),
        KnockbackStep::Settled(SettleReason::BudgetExhausted)
    );
    assert_eq!(position, before);
}
