//! Player combat systems (attack, incoming strikes, reward items).

use bevy::prelude::*;

use crate::ai::{attack::planar_distance, Enemy, EnemyAttackStrike, EnemyState};
use crate::combat::components::{Player, PlayerInput, PlayerStats};
use crate::combat::events::{DamageEnemy, PlayerDamaged, PlayerDefeated};
use crate::combat::hit::process_hit;
use crate::feedback::HitFeedbackRequested;
use crate::stage::RewardSelected;
use crate::DeterministicRng;

/// Враг ближе этого считается "в дуге" при любом aim
const POINT_BLANK: f32 = 0.3;

/// Высота точки удара над ногами врага
const HIT_POINT_HEIGHT: f32 = 0.5;

/// Попадает ли точка в дугу атаки игрока
pub fn in_attack_arc(origin: Vec3, aim: Vec3, target: Vec3, range: f32, arc_degrees: f32) -> bool {
    let to_target = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z);
    let distance = to_target.length();
    if distance > range {
        return false;
    }
    if distance <= POINT_BLANK || arc_degrees >= 360.0 {
        return true;
    }

    let aim = Vec3::new(aim.x, 0.0, aim.z).normalize_or_zero();
    if aim == Vec3::ZERO {
        return true;
    }

    let half_arc = (arc_degrees * 0.5).to_radians();
    aim.angle_between(to_target / distance) <= half_arc
}

/// Система: player attack
///
/// Edge-triggered: `PlayerInput.attack` сбрасывается здесь.
/// Каждый живой враг в дуге получает свой бросок крита.
/// Без PlayerStats атака пропускается (нечем считать урон).
pub fn player_attack(
    mut players: Query<(&Transform, &mut PlayerInput, Option<&PlayerStats>), With<Player>>,
    enemies: Query<(Entity, &Transform, &EnemyState), (With<Enemy>, Without<Player>)>,
    mut rng: ResMut<DeterministicRng>,
    mut damage_requests: EventWriter<DamageEnemy>,
    mut feedback_requests: EventWriter<HitFeedbackRequested>,
) {
    for (player_transform, mut input, stats) in players.iter_mut() {
        if !input.attack {
            continue;
        }
        input.attack = false;

        let Some(stats) = stats else {
            crate::log_warning("player_attack: no PlayerStats on player, attack skipped");
            continue;
        };

        let origin = player_transform.translation;
        let mut hits = 0;

        for (enemy, enemy_transform, state) in enemies.iter() {
            if state.is_dead() {
                continue;
            }
            let target = enemy_transform.translation;
            if !in_attack_arc(
                origin,
                input.aim,
                target,
                stats.attack_range(),
                stats.attack_arc_degrees(),
            ) {
                continue;
            }

            let outcome = process_hit(
                stats.attack_damage(),
                stats.crit_chance(),
                stats.crit_multiplier(),
                &mut rng.rng,
            );
            let hit_direction = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z).normalize_or_zero();

            damage_requests.write(DamageEnemy {
                target: enemy,
                amount: outcome.final_damage,
                hit_direction,
            });
            feedback_requests.write(HitFeedbackRequested {
                target: enemy,
                hit_point: target + Vec3::Y * HIT_POINT_HEIGHT,
                hit_direction,
                outcome,
            });
            hits += 1;
        }

        crate::log(&format!("🗡️ Player attack: {} hit(s)", hits));
    }
}

/// Система: удары врагов по игроку (area check по XZ)
pub fn resolve_enemy_strikes(
    mut strikes: EventReader<EnemyAttackStrike>,
    mut players: Query<(Entity, &Transform, Option<&mut PlayerStats>), With<Player>>,
    mut damaged_events: EventWriter<PlayerDamaged>,
    mut defeated_events: EventWriter<PlayerDefeated>,
) {
    for event in strikes.read() {
        let Ok((player, transform, stats)) = players.single_mut() else {
            continue;
        };

        if planar_distance(transform.translation, event.strike.center) > event.strike.radius {
            continue;
        }

        let Some(mut stats) = stats else {
            crate::log_warning("resolve_enemy_strikes: player has no PlayerStats, damage skipped");
            continue;
        };

        if !stats.is_alive() {
            continue;
        }

        let dealt = stats.take_damage(event.strike.damage);
        crate::log(&format!(
            "🩸 Player hit by {:?} for {} (hp {}/{})",
            event.attacker,
            dealt,
            stats.current_health,
            stats.max_health()
        ));

        damaged_events.write(PlayerDamaged {
            attacker: event.attacker,
            amount: dealt,
            remaining: stats.current_health,
        });

        if !stats.is_alive() {
            crate::log_info(&format!("☠️ Player {:?} defeated by {:?}", player, event.attacker));
            defeated_events.write(PlayerDefeated {
                player,
                killer: event.attacker,
            });
        }
    }
}

/// Система: выбранная награда → PlayerStats
pub fn apply_reward_items(
    mut selections: EventReader<RewardSelected>,
    mut players: Query<Option<&mut PlayerStats>, With<Player>>,
) {
    for selection in selections.read() {
        let Ok(Some(mut stats)) = players.single_mut() else {
            crate::log_warning(&format!(
                "Reward '{}' selected but no player stats — item not applied",
                selection.item.name
            ));
            continue;
        };

        stats.apply_item(&selection.item);
        crate::log_info(&format!(
            "🎁 Applied '{}' (hp {}/{}, dmg {}, crit {:.0}%)",
            selection.item.name,
            stats.current_health,
            stats.max_health(),
            stats.attack_damage(),
            stats.crit_chance() * 100.0
        ));
    }
}
