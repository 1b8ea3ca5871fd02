//! Enemy FSM system (Chase ⇄ Attack, Stun countdown).

use bevy::prelude::*;

use crate::ai::attack::{planar_distance, AttackBehaviorSlot, AttackContext, AttackOutput, AttackUpdate};
use crate::ai::components::{Enemy, EnemyCombat, EnemyState};
use crate::ai::events::{EnemyAttackStrike, EnemyStateChanged};
use crate::combat::Player;
use crate::physics::Knockback;

/// Система: enemy FSM transitions
///
/// - Chase: цель в attack range → Attack (behavior снимает snapshot цели)
/// - Attack: behavior тикает; Finished → повторная проверка дистанции
///   (в range → новая атака, иначе → Chase)
/// - Stun: таймер; по истечении → Chase
/// - Die: ничего
///
/// Пока активен knockback, позицией владеет физика: переходы откладываются.
pub fn enemy_fsm(
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &mut EnemyState,
            &EnemyCombat,
            &mut AttackBehaviorSlot,
            Has<Knockback>,
        ),
        With<Enemy>,
    >,
    players: Query<&Transform, (With<Player>, Without<Enemy>)>,
    time: Res<Time<Fixed>>,
    mut state_events: EventWriter<EnemyStateChanged>,
    mut strike_events: EventWriter<EnemyAttackStrike>,
) {
    let delta = time.delta_secs();
    let target = players.single().ok().map(|transform| transform.translation);

    for (entity, mut transform, mut state, combat, mut slot, knocked_back) in enemies.iter_mut() {
        match *state {
            EnemyState::Die => continue,

            EnemyState::Stun { remaining } => {
                let remaining = (remaining - delta).max(0.0);
                if remaining > 0.0 || knocked_back {
                    *state = EnemyState::Stun { remaining };
                    continue;
                }
                set_state(entity, &mut state, EnemyState::Chase, &mut state_events);
            }

            EnemyState::Chase => {
                if knocked_back {
                    continue;
                }
                let Some(target) = target else {
                    continue;
                };
                if planar_distance(transform.translation, target) <= combat.attack_range {
                    slot.0.on_enter_attack(transform.translation, target);
                    crate::log(&format!(
                        "⚔️ {:?} Chase → Attack ({}) target {:?}",
                        entity,
                        slot.0.name(),
                        target
                    ));
                    set_state(entity, &mut state, EnemyState::Attack, &mut state_events);
                }
            }

            EnemyState::Attack => {
                if knocked_back {
                    continue;
                }

                let ctx = AttackContext {
                    position: transform.translation,
                    target,
                    delta,
                };
                let mut out = AttackOutput::default();
                let update = slot.0.update_attack(&ctx, &mut out);

                transform.translation += out.displacement;
                for strike in out.strikes {
                    strike_events.write(EnemyAttackStrike {
                        attacker: entity,
                        strike,
                    });
                }

                if update == AttackUpdate::Finished {
                    match target {
                        Some(target)
                            if planar_distance(transform.translation, target) <= combat.attack_range =>
                        {
                            // Остаёмся в Attack: новая атака с новым snapshot
                            slot.0.on_enter_attack(transform.translation, target);
                            crate::log(&format!("🔁 {:?} attack re-entry ({})", entity, slot.0.name()));
                            state_events.write(EnemyStateChanged {
                                enemy: entity,
                                from: EnemyState::Attack,
                                to: EnemyState::Attack,
                            });
                        }
                        _ => {
                            set_state(entity, &mut state, EnemyState::Chase, &mut state_events);
                        }
                    }
                }
            }
        }
    }
}

/// Смена состояния + событие (no-op если состояние то же)
pub fn set_state(
    entity: Entity,
    state: &mut EnemyState,
    to: EnemyState,
    events: &mut EventWriter<EnemyStateChanged>,
) {
    let from = *state;
    if from == to {
        return;
    }
    *state = to;
    crate::log(&format!("🧠 {:?} {} → {}", entity, from.name(), to.name()));
    events.write(EnemyStateChanged { enemy: entity, from, to });
}
