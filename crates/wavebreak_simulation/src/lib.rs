//! Wavebreak Simulation Core
//!
//! ECS-симуляция боевых волн на Bevy 0.16 (headless, без рендера).
//!
//! Домены:
//! - ai: FSM врагов (Chase/Attack/Stun/Die) + attack behaviors по архетипам
//! - physics: knockback/bounce интегратор, движение игрока
//! - combat: игрок, stats, урон, смерть
//! - feedback: hit-stop, camera shake, flash, critical glitch, звук/частицы (события)
//! - stage: стадии → волны → reward barrier
//!
//! Presentation/audio — снаружи: симуляция только пишет данные и события.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod feedback;
pub mod logger;
pub mod physics;
pub mod sequence;
pub mod stage;

// Re-export основных типов для удобства
pub use ai::{AIPlugin, EnemyArchetype, EnemyState};
pub use combat::{spawn_player, CombatPlugin, Player, PlayerInput, PlayerStats};
pub use components::*;
pub use config::SimulationConfig;
pub use error::{ConfigError, RewardError};
pub use feedback::FeedbackPlugin;
pub use logger::*;
pub use physics::PhysicsPlugin;
pub use stage::{StageCatalog, StagePlugin};

/// Шаг симуляции (60Hz)
pub const TICK_RATE_HZ: f64 = 60.0;

/// Порядок симуляции внутри FixedUpdate (chain)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Движение игрока, атака игрока
    Input,
    /// Применение урона к врагам (Stun/Die, старт knockback)
    Damage,
    /// FSM врагов + attack behaviors + chase
    Behavior,
    /// Knockback интеграция
    Physics,
    /// Удары врагов по игроку
    Resolve,
    /// Facing, despawn
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Ресурсы, вставленные до плагина (config, catalog, rng), не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .init_resource::<SimulationConfig>()
            .init_resource::<StageCatalog>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Damage,
                    SimulationSet::Behavior,
                    SimulationSet::Physics,
                    SimulationSet::Resolve,
                    SimulationSet::Cleanup,
                )
                    .chain(),
            );

        // Детерминистичный RNG (seed по умолчанию, если не задан снаружи)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins((CombatPlugin, AIPlugin, PhysicsPlugin, FeedbackPlugin, StagePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Крит-роллы, точки спавна, выбор наград.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает ровно на 1/60 секунды за `app.update()` (ManualDuration),
/// так что прогоны с одинаковым seed идентичны. `SimulationPlugin` добавляет вызывающий.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE_HZ,
        )))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
