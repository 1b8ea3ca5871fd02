//! Movement компоненты: pathing authority, скорость, физическое тело

use bevy::prelude::*;

/// Pathing authority актора
///
/// Пока `enabled == false` позицией владеет физика (knockback),
/// chase-движение не трогает Transform.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavigationAgent {
    pub enabled: bool,
    /// Текущая цель навигации (None = стоим)
    pub destination: Option<Vec3>,
}

impl Default for NavigationAgent {
    fn default() -> Self {
        Self {
            enabled: true,
            destination: None,
        }
    }
}

impl NavigationAgent {
    pub fn suspend(&mut self) {
        self.enabled = false;
        self.destination = None;
    }

    pub fn restore(&mut self) {
        self.enabled = true;
    }
}

/// Скорость движения актора (метры/сек)
#[derive(Component, Clone, Copy, Debug, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 2.0 }
    }
}

/// Free-body состояние (используется только knockback'ом)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
    /// true пока физика владеет позицией
    pub free_body: bool,
}

impl PhysicsBody {
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
        self.free_body = false;
    }
}
