//! Death markers.

use bevy::prelude::*;

/// Компонент-маркер: entity мертв (Health == 0)
///
/// Используется presentation слоем (death animation, fade-out).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
///
/// Система `despawn_after_timeout` сравнивает с elapsed fixed time.
#[derive(Component, Debug, Clone, Copy)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}
