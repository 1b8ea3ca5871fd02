//! Presentation interface points (данные, которые читает слой рендера).
//!
//! Симуляция только пишет значения; рендер/камера/аудио — внешние.

use bevy::prelude::*;
use std::collections::HashMap;

pub const FLASH_PARAM: &str = "flash";
pub const GLITCH_PARAM: &str = "glitch";

/// Именованные float параметры материала/спрайта
#[derive(Component, Debug, Clone, Default)]
pub struct SpriteParams {
    values: HashMap<&'static str, f32>,
}

impl SpriteParams {
    pub fn set(&mut self, name: &'static str, value: f32) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(0.0)
    }
}

/// Визуальное смещение поверх Transform (jitter), не влияет на симуляцию
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct VisualOffset(pub Vec3);

/// Left/right ориентация спрайта относительно цели
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Знак горизонтали до цели; ноль сохраняет текущую ориентацию
    pub fn toward(current: Facing, dx: f32) -> Facing {
        if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            current
        }
    }
}

/// Камера (top-down): zoom + shake offset + локальные оси для directional bias
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraRig {
    pub zoom: f32,
    pub base_zoom: f32,
    pub shake_offset: Vec3,
    /// Локальная ось "вправо" камеры в world space
    pub right: Vec3,
    /// Локальная ось "вверх" экрана в world space (top-down: -Z)
    pub up: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            base_zoom: 1.0,
            shake_offset: Vec3::ZERO,
            right: Vec3::X,
            up: Vec3::NEG_Z,
        }
    }
}
