//! Enemy damage and death systems.

use bevy::prelude::*;

use crate::ai::{resolve_damage, AttackBehaviorSlot, DamageResponse, Enemy, EnemyCombat, EnemyState, EnemyStateChanged};
use crate::combat::components::{Dead, DespawnAfter};
use crate::combat::events::{DamageEnemy, EnemyDamaged, EnemyDied};
use crate::components::{Health, NavigationAgent, PhysicsBody};
use crate::config::SimulationConfig;
use crate::physics::{start_knockback, Knockback};

/// Система: apply enemy damage
///
/// Порядок на каждый запрос:
/// 1. Мёртвый враг → no-op
/// 2. HP -= amount (пол 0) → EnemyDamaged
/// 3. Knockback (всегда, в том числе на смертельный удар)
/// 4. HP == 0 → Die (Dead, навигация выключена, DespawnAfter, EnemyDied)
///    иначе → Stun (если ещё не в Stun; таймер не сбрасывается)
pub fn apply_enemy_damage(
    mut requests: EventReader<DamageEnemy>,
    mut enemies: Query<
        (
            &Enemy,
            &mut Health,
            &mut EnemyState,
            &EnemyCombat,
            &Transform,
            &mut PhysicsBody,
            &mut NavigationAgent,
            Option<&Knockback>,
            Option<&mut AttackBehaviorSlot>,
        ),
    >,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut damaged_events: EventWriter<EnemyDamaged>,
    mut died_events: EventWriter<EnemyDied>,
    mut state_events: EventWriter<EnemyStateChanged>,
) {
    for request in requests.read() {
        let Ok((enemy, mut health, mut state, combat, transform, mut body, mut nav, knockback, slot)) =
            enemies.get_mut(request.target)
        else {
            crate::log_warning(&format!(
                "DamageEnemy: target {:?} is not an enemy (despawned?)",
                request.target
            ));
            continue;
        };

        let from = *state;
        let response = resolve_damage(&mut health, &mut state, request.amount, combat.stun_duration);

        if response == DamageResponse::Ignored {
            continue;
        }

        damaged_events.write(EnemyDamaged {
            enemy: request.target,
            amount: response.dealt(),
            remaining: health.current,
        });

        if response.triggers_knockback() {
            start_knockback(
                &mut commands,
                request.target,
                transform.translation,
                &mut body,
                &mut nav,
                knockback,
                request.hit_direction,
                request.amount,
                &config.knockback,
            );
        }

        match response {
            DamageResponse::Killed { dealt } => {
                if let Some(mut slot) = slot {
                    slot.0.cancel();
                }
                nav.suspend();

                let despawn_time = time.elapsed_secs() + config.director.enemy_despawn_delay;
                commands
                    .entity(request.target)
                    .insert((Dead, DespawnAfter { despawn_time }));

                crate::log_info(&format!(
                    "💀 {} {:?} died (last hit {}, despawn at {:.2}s)",
                    enemy.archetype.name(),
                    request.target,
                    dealt,
                    despawn_time
                ));

                state_events.write(EnemyStateChanged {
                    enemy: request.target,
                    from,
                    to: EnemyState::Die,
                });
                died_events.write(EnemyDied {
                    enemy: request.target,
                    archetype: enemy.archetype,
                });
            }
            DamageResponse::Stunned { dealt } => {
                // Stun прерывает атаку
                if let Some(mut slot) = slot {
                    slot.0.cancel();
                }
                crate::log(&format!(
                    "💫 {:?} {} → Stun ({} dmg, hp {}/{})",
                    request.target,
                    from.name(),
                    dealt,
                    health.current,
                    health.max
                ));
                state_events.write(EnemyStateChanged {
                    enemy: request.target,
                    from,
                    to: *state,
                });
            }
            DamageResponse::StunHeld { dealt } => {
                crate::log(&format!(
                    "💫 {:?} hit while stunned ({} dmg, stun timer kept)",
                    request.target, dealt
                ));
            }
            DamageResponse::Ignored => {}
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
///
/// Время — elapsed fixed time (тот же домен, что и при постановке таймера).
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
