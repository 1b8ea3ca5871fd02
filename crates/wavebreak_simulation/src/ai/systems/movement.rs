//! Enemy movement systems (chase, facing).

use bevy::prelude::*;

use crate::ai::components::{Enemy, EnemyCombat, EnemyState};
use crate::combat::Player;
use crate::components::{Facing, MovementSpeed, NavigationAgent};
use crate::physics::Knockback;

/// Доля attack range, на которой chase останавливается
const CHASE_STOP_FRACTION: f32 = 0.9;

/// Система: chase movement
///
/// Враги в Chase с активной навигацией идут к игроку по XZ.
/// Knockback владеет позицией → такие враги отфильтрованы.
pub fn chase_movement(
    mut enemies: Query<
        (&mut Transform, &mut NavigationAgent, &MovementSpeed, &EnemyState, &EnemyCombat),
        (With<Enemy>, Without<Knockback>),
    >,
    players: Query<&Transform, (With<Player>, Without<Enemy>)>,
    time: Res<Time<Fixed>>,
) {
    let target = players.single().ok().map(|transform| transform.translation);
    let delta = time.delta_secs();

    for (mut transform, mut nav, speed, state, combat) in enemies.iter_mut() {
        if *state != EnemyState::Chase || !nav.enabled {
            continue;
        }

        let Some(target) = target else {
            nav.destination = None;
            continue;
        };
        nav.destination = Some(target);

        let to_target = Vec3::new(
            target.x - transform.translation.x,
            0.0,
            target.z - transform.translation.z,
        );
        let distance = to_target.length();
        let stop_at = combat.attack_range * CHASE_STOP_FRACTION;
        if distance <= stop_at {
            continue;
        }

        let step = (speed.speed * delta).min(distance - stop_at);
        transform.translation += to_target / distance * step;
    }
}

/// Система: facing к игроку (левый/правый спрайт)
pub fn update_facing(
    mut enemies: Query<(&Transform, &mut Facing, &EnemyState), With<Enemy>>,
    players: Query<&Transform, (With<Player>, Without<Enemy>)>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    for (transform, mut facing, state) in enemies.iter_mut() {
        if state.is_dead() {
            continue;
        }
        let next = Facing::toward(*facing, player.translation.x - transform.translation.x);
        if next != *facing {
            *facing = next;
        }
    }
}
