//! Headless прогон Wavebreak
//!
//! Игрок-бот: идёт к ближайшему врагу, бьёт по кулдауну, берёт первую награду.
//! Аргументы: `[seed] [catalog.ron]`

use bevy::ecs::event::EventCursor;
use bevy::prelude::*;
use wavebreak_simulation::ai::{Enemy, EnemyState};
use wavebreak_simulation::combat::{spawn_player, PlayerDefeated, PlayerInput, PlayerStats, StatBlock};
use wavebreak_simulation::stage::{AllStagesComplete, BeginStage, ChooseReward, RewardsOffered, StageCatalog};
use wavebreak_simulation::{create_headless_app, log_error, log_info, SimulationPlugin};

const MAX_TICKS: u32 = 60 * 60 * 5;
/// Кулдаун атаки бота (тики)
const ATTACK_EVERY: u32 = 15;

fn main() {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);

    let mut app = create_headless_app(seed);

    if let Some(path) = args.next() {
        let catalog = match std::fs::read_to_string(&path) {
            Ok(source) => StageCatalog::from_ron_str(&source),
            Err(err) => {
                log_error(&format!("Failed to read {}: {}", path, err));
                return;
            }
        };
        match catalog {
            Ok(catalog) => {
                app.insert_resource(catalog);
            }
            Err(err) => {
                log_error(&format!("Invalid catalog {}: {}", path, err));
                return;
            }
        }
    }

    app.add_plugins(SimulationPlugin);
    log_info(&format!("Starting Wavebreak headless simulation (seed: {})", seed));

    let player = {
        let mut commands = app.world_mut().commands();
        let stats = PlayerStats::new(StatBlock {
            max_health: 400.0,
            ..StatBlock::player_base()
        });
        spawn_player(&mut commands, Vec3::ZERO, stats)
    };
    app.world_mut().flush();
    app.world_mut().send_event(BeginStage { index: 0 });

    let mut offers = EventCursor::<RewardsOffered>::default();
    let mut completions = EventCursor::<AllStagesComplete>::default();
    let mut defeats = EventCursor::<PlayerDefeated>::default();

    for tick in 0..MAX_TICKS {
        drive_player(app.world_mut(), player, tick);
        app.update();

        let world = app.world();
        if offers.read(world.resource::<Events<RewardsOffered>>()).next().is_some() {
            app.world_mut().send_event(ChooseReward { index: 0 });
        }

        let world = app.world();
        if completions.read(world.resource::<Events<AllStagesComplete>>()).next().is_some() {
            log_info(&format!("🏁 Run complete at tick {}", tick));
            report(app.world(), player);
            return;
        }
        if defeats.read(world.resource::<Events<PlayerDefeated>>()).next().is_some() {
            log_info(&format!("💀 Player defeated at tick {}", tick));
            report(app.world(), player);
            return;
        }

        if tick % 600 == 0 {
            log_info(&format!("Tick {}: {} entities", tick, app.world().entities().len()));
        }
    }

    log_info("⏹️ Tick limit reached");
    report(app.world(), player);
}

/// Aim + движение к ближайшему живому врагу, атака по кулдауну
fn drive_player(world: &mut World, player: Entity, tick: u32) {
    let Some(origin) = world.get::<Transform>(player).map(|t| t.translation) else {
        return;
    };
    let range = world
        .get::<PlayerStats>(player)
        .map_or(StatBlock::player_base().attack_range, |stats| stats.attack_range());

    let mut enemies = world.query_filtered::<(&Transform, &EnemyState), With<Enemy>>();
    let nearest = enemies
        .iter(world)
        .filter(|(_, state)| !state.is_dead())
        .map(|(transform, _)| transform.translation)
        .min_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)));

    let Some(mut input) = world.get_mut::<PlayerInput>(player) else {
        return;
    };

    let Some(target) = nearest else {
        input.movement = Vec2::ZERO;
        return;
    };

    let to_target = Vec2::new(target.x - origin.x, target.z - origin.z);
    let distance = to_target.length();
    input.aim = Vec3::new(to_target.x, 0.0, to_target.y);
    input.movement = if distance > range * 0.8 {
        to_target.normalize_or_zero()
    } else {
        Vec2::ZERO
    };
    if distance <= range && tick % ATTACK_EVERY == 0 {
        input.attack = true;
    }
}

fn report(world: &World, player: Entity) {
    if let Some(stats) = world.get::<PlayerStats>(player) {
        log_info(&format!(
            "Player: {}/{} hp, items: [{}]",
            stats.current_health,
            stats.max_health(),
            stats.items.join(", ")
        ));
    }
}
