//! Director + reward board tests (без ECS)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::combat::{Item, Stat};
use crate::config::DirectorConfig;
use crate::error::RewardError;

fn enemy(index: u32) -> Entity {
    Entity::from_raw(index)
}

/// Director с активной волной 0 стадии `stage`
fn active_director(stage: usize, catalog: &StageCatalog, config: &DirectorConfig) -> StageDirector {
    let mut director = StageDirector::default();
    director.begin_stage(stage, catalog, config);
    let signals = director.tick(config.zoom_out_duration + 0.01);
    assert!(signals.contains(&DirectorSignal::SpawnWave { stage, wave: 0 }));
    director
}

fn count_reward_requests(signals: &[DirectorSignal]) -> usize {
    signals
        .iter()
        .filter(|signal| matches!(signal, DirectorSignal::RequestReward { .. }))
        .count()
}

fn items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item::single(format!("Item {}", i), Stat::AttackDamage, 1.0))
        .collect()
}

#[test]
fn test_begin_stage_beyond_catalog_is_terminal() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = StageDirector::default();

    let signals = director.begin_stage(5, &catalog, &config);
    assert_eq!(signals, vec![DirectorSignal::AllStagesComplete]);
    assert_eq!(director.phase(), DirectorPhase::AllComplete);

    // Повтор не шлёт второй AllStagesComplete
    assert!(director.begin_stage(7, &catalog, &config).is_empty());
    assert!(director.tick(10.0).is_empty());
}

#[test]
fn test_spawn_happens_at_zoom_peak() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = StageDirector::default();

    let signals = director.begin_stage(0, &catalog, &config);
    assert_eq!(signals, vec![DirectorSignal::StageStarted { stage: 0 }]);
    assert_eq!(director.phase(), DirectorPhase::Transitioning);

    // Середина zoom-out: ещё без спавна
    let signals = director.tick(config.zoom_out_duration * 0.5);
    assert!(signals.is_empty());
    let mid_zoom = director.zoom();
    assert!(mid_zoom > 1.0 && mid_zoom < config.zoom_out_level, "zoom = {}", mid_zoom);

    let signals = director.tick(config.zoom_out_duration * 0.5 + 0.001);
    assert_eq!(
        signals,
        vec![
            DirectorSignal::SpawnWave { stage: 0, wave: 0 },
            DirectorSignal::WaveStarted { stage: 0, wave: 0 },
        ]
    );
    assert_eq!(director.phase(), DirectorPhase::WaveActive);
    assert!(director.zoom() > 1.0, "zoom-in начинается с пика");

    director.tick(config.zoom_in_duration + 0.1);
    assert_eq!(director.zoom(), 1.0);
}

#[test]
fn test_two_enemy_wave_prompts_once() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = active_director(0, &catalog, &config);

    director.register_spawned(enemy(1));
    director.register_spawned(enemy(2));

    // Первая смерть: roster 1, без prompt
    assert!(director.on_enemy_died(enemy(1), &config).is_empty());
    assert_eq!(director.roster().len(), 1);
    assert!(!director.is_waiting_for_reward());

    // Вторая смерть: clear + ожидание награды
    let signals = director.on_enemy_died(enemy(2), &config);
    assert_eq!(signals, vec![DirectorSignal::WaveCleared { stage: 0, wave: 0 }]);
    assert!(director.roster().is_empty());
    assert_eq!(director.phase(), DirectorPhase::WaitingForReward);

    // Prompt после задержки, ровно один
    assert_eq!(count_reward_requests(&director.tick(config.reward_prompt_delay * 0.5)), 0);
    assert_eq!(count_reward_requests(&director.tick(config.reward_prompt_delay)), 1);
    assert_eq!(count_reward_requests(&director.tick(5.0)), 0);
}

#[test]
fn test_duplicate_clear_is_idempotent() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = active_director(0, &catalog, &config);
    director.register_spawned(enemy(1));

    let first = director.on_enemy_died(enemy(1), &config);
    assert_eq!(first.len(), 1);

    // Дубликат смерти и прямой повторный clear
    assert!(director.on_enemy_died(enemy(1), &config).is_empty());
    assert!(director.notify_wave_cleared(&config).is_empty());

    let mut requests = 0;
    for _ in 0..120 {
        requests += count_reward_requests(&director.tick(1.0 / 60.0));
    }
    assert_eq!(requests, 1);
}

#[test]
fn test_reward_barrier_blocks_next_wave() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = active_director(0, &catalog, &config);
    director.register_spawned(enemy(1));
    director.on_enemy_died(enemy(1), &config);

    // Сколько бы времени ни прошло — следующей волны нет
    for _ in 0..600 {
        let signals = director.tick(1.0 / 60.0);
        assert!(!signals
            .iter()
            .any(|signal| matches!(signal, DirectorSignal::SpawnWave { .. })));
    }
    assert_eq!(director.phase(), DirectorPhase::WaitingForReward);

    // Выбор сделан → пауза → переход → волна 1
    assert!(director.on_reward_complete(&catalog, &config).is_empty());
    assert_eq!(director.wave_index(), 1);
    assert_eq!(director.phase(), DirectorPhase::Transitioning);

    let signals = director.tick(config.next_wave_delay + config.zoom_out_duration + 0.01);
    assert!(signals.contains(&DirectorSignal::SpawnWave { stage: 0, wave: 1 }));
}

#[test]
fn test_last_wave_clears_stage_and_begins_next() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = active_director(0, &catalog, &config);

    // Волна 0 → волна 1
    director.register_spawned(enemy(1));
    director.on_enemy_died(enemy(1), &config);
    director.on_reward_complete(&catalog, &config);
    director.tick(config.next_wave_delay + config.zoom_out_duration + 0.01);

    // Волна 1 — последняя в стадии 0
    director.register_spawned(enemy(2));
    director.on_enemy_died(enemy(2), &config);
    let signals = director.on_reward_complete(&catalog, &config);
    assert_eq!(
        signals,
        vec![
            DirectorSignal::StageCleared { stage: 0 },
            DirectorSignal::StageStarted { stage: 1 },
        ]
    );
    assert_eq!(director.stage_index(), 1);
    assert_eq!(director.wave_index(), 0);
}

#[test]
fn test_final_stage_completion_is_terminal() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let last = catalog.stage_count() - 1;
    let mut director = active_director(last, &catalog, &config);

    director.register_spawned(enemy(9));
    director.on_enemy_died(enemy(9), &config);
    let signals = director.on_reward_complete(&catalog, &config);

    assert_eq!(
        signals,
        vec![
            DirectorSignal::StageCleared { stage: last },
            DirectorSignal::AllStagesComplete,
        ]
    );
    assert_eq!(director.phase(), DirectorPhase::AllComplete);
}

#[test]
fn test_reward_complete_without_pending_reward_ignored() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = active_director(0, &catalog, &config);
    director.register_spawned(enemy(1));

    assert!(director.on_reward_complete(&catalog, &config).is_empty());
    assert_eq!(director.wave_index(), 0);
    assert_eq!(director.phase(), DirectorPhase::WaveActive);
}

#[test]
fn test_unknown_enemy_death_ignored() {
    let catalog = StageCatalog::default();
    let config = DirectorConfig::default();
    let mut director = active_director(0, &catalog, &config);
    director.register_spawned(enemy(1));

    assert!(director.on_enemy_died(enemy(42), &config).is_empty());
    assert_eq!(director.roster(), &[enemy(1)]);
}

#[test]
fn test_show_rewards_rejects_two_candidates() {
    let mut board = RewardBoard::new(0.3);

    let err = board.show_rewards(&items(2)).unwrap_err();
    assert_eq!(err, RewardError::NotEnoughCandidates { got: 2, required: 3 });
    assert!(!board.is_showing());
    assert!(board.offer().is_empty());
}

#[test]
fn test_show_rewards_presents_exactly_three() {
    let mut board = RewardBoard::new(0.3);
    let candidates = items(5);

    let offer = board.show_rewards(&candidates).expect("offer");
    assert_eq!(offer, &candidates[..3]);
    assert!(board.is_showing());

    // Повторный show во время открытого предложения
    assert_eq!(board.show_rewards(&candidates).unwrap_err(), RewardError::Busy);
}

#[test]
fn test_choose_then_retract_completes_once() {
    let mut board = RewardBoard::new(0.3);
    let candidates = items(3);
    board.show_rewards(&candidates).expect("offer");

    assert_eq!(
        board.choose(3).unwrap_err(),
        RewardError::ChoiceOutOfRange { index: 3, len: 3 }
    );
    assert!(board.is_showing(), "неверный выбор не закрывает предложение");

    let item = board.choose(1).expect("valid choice");
    assert_eq!(item, candidates[1]);
    assert!(!board.is_showing());
    assert!(board.is_retracting());
    assert_eq!(board.show_rewards(&candidates).unwrap_err(), RewardError::Busy);

    assert!(!board.tick(0.1));
    assert!(board.tick(0.3));
    assert!(!board.tick(0.3));
    assert_eq!(board.choose(0).unwrap_err(), RewardError::NoOffer);
}

#[test]
fn test_draw_rewards_deterministic_and_distinct() {
    let pool = StageCatalog::default().reward_pool;

    let first = draw_rewards(&pool, &mut ChaCha8Rng::seed_from_u64(7));
    let second = draw_rewards(&pool, &mut ChaCha8Rng::seed_from_u64(7));

    assert_eq!(first.len(), REWARD_CHOICE_COUNT);
    assert_eq!(first, second);
    assert_ne!(first[0].name, first[1].name);
    assert_ne!(first[1].name, first[2].name);
    assert_ne!(first[0].name, first[2].name);
}

#[test]
fn test_dismiss_clears_offer_and_retract() {
    let mut board = RewardBoard::new(0.3);
    let candidates = items(3);

    assert!(!board.dismiss(), "пустой board");

    board.show_rewards(&candidates).expect("offer");
    assert!(board.dismiss());
    assert!(!board.is_showing());
    assert_eq!(board.choose(0).unwrap_err(), RewardError::NoOffer);

    // Новое предложение после dismiss не Busy
    board.show_rewards(&candidates).expect("offer after dismiss");
    board.choose(0).expect("choice");
    assert!(board.is_retracting());

    // Прерванный retract не завершится
    assert!(board.dismiss());
    assert!(!board.tick(1.0));
    assert!(board.show_rewards(&candidates).is_ok());
}
