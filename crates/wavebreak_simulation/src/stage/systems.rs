//! Stage director system: события → StageDirector → сигналы → мир.

use std::collections::VecDeque;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::seq::SliceRandom;

use super::catalog::StageCatalog;
use super::director::{DirectorSignal, StageDirector};
use super::events::*;
use super::reward::{draw_rewards, RewardBoard};
use crate::ai::spawn_enemy;
use crate::combat::EnemyDied;
use crate::components::CameraRig;
use crate::config::SimulationConfig;
use crate::sequence::{SequenceClock, TimeDomain};
use crate::DeterministicRng;

#[derive(SystemParam)]
pub struct StageNotifications<'w> {
    stage_started: EventWriter<'w, StageStarted>,
    stage_cleared: EventWriter<'w, StageCleared>,
    wave_started: EventWriter<'w, WaveStarted>,
    wave_cleared: EventWriter<'w, WaveCleared>,
    all_complete: EventWriter<'w, AllStagesComplete>,
    reward_requested: EventWriter<'w, RewardChoiceRequested>,
    rewards_offered: EventWriter<'w, RewardsOffered>,
}

#[derive(SystemParam)]
pub struct StageInputs<'w, 's> {
    begin: EventReader<'w, 's, BeginStage>,
    deaths: EventReader<'w, 's, EnemyDied>,
    reward_complete: EventReader<'w, 's, RewardSequenceComplete>,
}

/// Система: StageDirector (Update, simulation time)
///
/// Смерти приходят из FixedUpdate и обрабатываются синхронно в этом же проходе.
/// Нет RewardBoard (или board отклонил предложение) → barrier снимается сразу.
#[allow(clippy::too_many_arguments)]
pub fn run_stage_director(
    mut commands: Commands,
    clock: SequenceClock,
    config: Res<SimulationConfig>,
    catalog: Res<StageCatalog>,
    mut director: ResMut<StageDirector>,
    mut rng: ResMut<DeterministicRng>,
    mut board: Option<ResMut<RewardBoard>>,
    mut rig: ResMut<CameraRig>,
    mut inputs: StageInputs,
    mut out: StageNotifications,
) {
    let dir_config = &config.director;
    let mut pending: VecDeque<DirectorSignal> = VecDeque::new();

    for request in inputs.begin.read() {
        // Старое предложение принадлежит прерванной волне
        if board.as_mut().is_some_and(|board| board.dismiss()) {
            crate::log_warning(&format!("⚠️ BeginStage {}: open reward offer dismissed", request.index));
        }
        pending.extend(director.begin_stage(request.index, &catalog, dir_config));
    }
    for death in inputs.deaths.read() {
        pending.extend(director.on_enemy_died(death.enemy, dir_config));
    }
    for _ in inputs.reward_complete.read() {
        pending.extend(director.on_reward_complete(&catalog, dir_config));
    }
    pending.extend(director.tick(clock.delta(TimeDomain::Simulation)));

    while let Some(signal) = pending.pop_front() {
        match signal {
            DirectorSignal::StageStarted { stage } => {
                out.stage_started.write(StageStarted { stage });
            }
            DirectorSignal::SpawnWave { stage, wave } => {
                let Some(wave_def) = catalog.wave(stage, wave) else {
                    crate::log_warning(&format!("⚠️ Stage {} wave {} missing in catalog", stage, wave));
                    pending.extend(director.notify_wave_cleared(dir_config));
                    continue;
                };

                for entry in &wave_def.entries {
                    let stats = catalog.stats_for(entry.archetype);
                    for _ in 0..entry.count {
                        let Some(point) = wave_def.spawn_points.choose(&mut rng.rng) else {
                            continue;
                        };
                        let enemy = spawn_enemy(&mut commands, entry.archetype, &stats, point.position());
                        director.register_spawned(enemy);
                    }
                }

                crate::log_info(&format!(
                    "🌊 Stage {} wave {}: {} enemies",
                    stage,
                    wave,
                    director.roster().len()
                ));

                // Пустая волна (нет spawn points) сразу считается зачищенной
                if director.roster().is_empty() {
                    pending.extend(director.notify_wave_cleared(dir_config));
                }
            }
            DirectorSignal::WaveStarted { stage, wave } => {
                out.wave_started.write(WaveStarted { stage, wave });
            }
            DirectorSignal::WaveCleared { stage, wave } => {
                out.wave_cleared.write(WaveCleared { stage, wave });
            }
            DirectorSignal::RequestReward { stage, wave } => {
                out.reward_requested.write(RewardChoiceRequested { stage, wave });

                let Some(board) = board.as_mut() else {
                    crate::log_warning("⚠️ No RewardBoard: skipping reward, barrier released");
                    pending.extend(director.on_reward_complete(&catalog, dir_config));
                    continue;
                };

                let candidates = draw_rewards(&catalog.reward_pool, &mut rng.rng);
                match board.show_rewards(&candidates) {
                    Ok(offer) => {
                        crate::log_info(&format!(
                            "🎁 Rewards offered: {}",
                            offer.iter().map(|item| item.name.as_str()).collect::<Vec<_>>().join(", ")
                        ));
                        out.rewards_offered.write(RewardsOffered { items: offer.to_vec() });
                    }
                    Err(err) => {
                        crate::log_warning(&format!("⚠️ Reward offer rejected: {}, barrier released", err));
                        pending.extend(director.on_reward_complete(&catalog, dir_config));
                    }
                }
            }
            DirectorSignal::StageCleared { stage } => {
                out.stage_cleared.write(StageCleared { stage });
            }
            DirectorSignal::AllStagesComplete => {
                out.all_complete.write(AllStagesComplete);
            }
        }
    }

    rig.zoom = rig.base_zoom * director.zoom();
}
