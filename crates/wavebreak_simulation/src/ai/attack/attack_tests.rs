//! Tests for attack behaviors.

use super::*;

const DT: f32 = 1.0 / 60.0;

fn run(behavior: &mut dyn AttackBehavior, position: &mut Vec3, max_ticks: usize) -> (Vec<AttackStrike>, usize) {
    let mut strikes = Vec::new();
    for tick in 1..=max_ticks {
        let mut out = AttackOutput::default();
        let ctx = AttackContext {
            position: *position,
            target: Some(Vec3::new(10.0, 0.0, 0.0)),
            delta: DT,
        };
        let update = behavior.update_attack(&ctx, &mut out);
        *position += out.displacement;
        strikes.extend(out.strikes);
        if update == AttackUpdate::Finished {
            return (strikes, tick);
        }
    }
    (strikes, max_ticks)
}

#[test]
fn test_slam_strikes_once_at_snapshot_point() {
    let stats = EnemyArchetype::Brute.default_stats();
    let mut slam = SlamAttack::new(&stats);
    let mut position = Vec3::ZERO;

    slam.on_enter_attack(position, Vec3::new(1.5, 0.0, 0.5));
    assert_eq!(slam.phase(), Some(SlamPhase::WindUp));

    // Цель "уходит" (ctx.target = 10,0,0), удар всё равно в snapshot
    let (strikes, ticks) = run(&mut slam, &mut position, 1000);

    assert_eq!(strikes.len(), 1);
    assert_eq!(strikes[0].center, Vec3::new(1.5, 0.0, 0.5));
    assert_eq!(strikes[0].damage, stats.attack_damage);
    assert_eq!(position, Vec3::ZERO, "slam не двигает врага");

    let expected = (stats.wind_up + stats.strike_duration + stats.recovery) / DT;
    assert!((ticks as f32 - expected).abs() <= 2.0);
    assert_eq!(slam.phase(), None);
}

#[test]
fn test_slam_cancel_drops_strike() {
    let stats = EnemyArchetype::Brute.default_stats();
    let mut slam = SlamAttack::new(&stats);
    let mut position = Vec3::ZERO;

    slam.on_enter_attack(position, Vec3::X);
    let (strikes, _) = run(&mut slam, &mut position, 5);
    assert!(strikes.is_empty());
    assert_eq!(slam.phase(), Some(SlamPhase::WindUp));

    slam.cancel();
    assert_eq!(slam.phase_name(), None);

    let mut out = AttackOutput::default();
    let ctx = AttackContext {
        position,
        target: None,
        delta: DT,
    };
    assert_eq!(slam.update_attack(&ctx, &mut out), AttackUpdate::Finished);
    assert!(out.strikes.is_empty());
}

#[test]
fn test_charge_dashes_to_snapshot_and_strikes_on_contact() {
    let stats = EnemyArchetype::Charger.default_stats();
    let mut charge = ChargeAttack::new(&stats);
    let mut position = Vec3::ZERO;

    charge.on_enter_attack(position, Vec3::new(3.0, 2.0, 0.0));
    // Высота цели игнорируется
    assert_eq!(charge.dash_target(), Vec3::new(3.0, 0.0, 0.0));

    let (strikes, _) = run(&mut charge, &mut position, 1000);

    assert_eq!(strikes.len(), 1);
    assert_eq!(strikes[0].center, Vec3::new(3.0, 0.0, 0.0));
    assert!(position.distance(Vec3::new(3.0, 0.0, 0.0)) < 1e-4);
}

#[test]
fn test_charge_times_out_short_of_target() {
    let mut stats = EnemyArchetype::Charger.default_stats();
    stats.dash_speed = 1.0;
    stats.strike_duration = 0.5;
    let mut charge = ChargeAttack::new(&stats);
    let mut position = Vec3::ZERO;

    charge.on_enter_attack(position, Vec3::new(20.0, 0.0, 0.0));
    let (strikes, _) = run(&mut charge, &mut position, 1000);

    // Один удар в точке остановки, далеко от цели
    assert_eq!(strikes.len(), 1);
    assert!(position.x < 1.0);
    assert!((strikes[0].center.x - position.x).abs() < 0.05);
}

#[test]
fn test_slot_for_archetype() {
    let brute = AttackBehaviorSlot::for_archetype(
        EnemyArchetype::Brute,
        &EnemyArchetype::Brute.default_stats(),
    );
    let charger = AttackBehaviorSlot::for_archetype(
        EnemyArchetype::Charger,
        &EnemyArchetype::Charger.default_stats(),
    );
    assert_eq!(brute.0.name(), "Slam");
    assert_eq!(charger.0.name(), "Charge");
}

#[test]
fn test_planar_distance_ignores_height() {
    assert_eq!(planar_distance(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, 0.0, 4.0)), 5.0);
}
