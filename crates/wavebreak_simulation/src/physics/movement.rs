//! Движение игрока
//!
//! PlayerInput.movement (XZ) × move speed из PlayerStats → Transform.
//! Без PlayerStats используется базовая скорость.
//!
//! Детерминизм: fixed timestep (60Hz).

use bevy::prelude::*;

use crate::combat::{Player, PlayerInput, PlayerStats, StatBlock};

/// Система движения игрока по вводу
///
/// Работает в FixedUpdate для детерминизма.
pub fn player_movement(
    mut players: Query<(&PlayerInput, Option<&PlayerStats>, &mut Transform), With<Player>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (input, stats, mut transform) in players.iter_mut() {
        if stats.is_some_and(|s| !s.is_alive()) {
            continue;
        }
        if input.movement.length_squared() <= 0.01 {
            continue;
        }

        // Диагональ не быстрее прямой
        let direction = input.movement.clamp_length_max(1.0);
        let speed = stats
            .map(|s| s.move_speed())
            .unwrap_or(StatBlock::player_base().move_speed);

        transform.translation.x += direction.x * speed * delta;
        transform.translation.z += direction.y * speed * delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_logic() {
        let direction = Vec2::new(3.0, 4.0).clamp_length_max(1.0);
        assert!((direction.length() - 1.0).abs() < 1e-6);

        // Короткий ввод (стик) не нормализуется вверх
        let half = Vec2::new(0.5, 0.0).clamp_length_max(1.0);
        assert_eq!(half.x, 0.5);
    }
}
