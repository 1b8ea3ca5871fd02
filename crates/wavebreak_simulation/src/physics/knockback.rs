//! Knockback / bounce simulator
//!
//! Архитектура:
//! - Удар переводит тело в free-body: навигация выключена, позицией владеет интегратор
//! - Импульс = горизонталь по направлению удара + вертикаль, масштаб по урону (clamped)
//! - Gravity + отскоки от запомненной высоты земли с затуханием
//! - Settle: бюджет отскоков / скорость ниже порога / timeout (что раньше)
//!
//! После settle: скорость 0, высота = земля, навигация обратно (только живым),
//! FSM явно возвращается в Chase (если не в Stun).
//!
//! Детерминизм: FixedUpdate, своя интеграция (без физ. движка).

use bevy::prelude::*;

use crate::ai::{set_state, EnemyState, EnemyStateChanged};
use crate::components::{Health, NavigationAgent, PhysicsBody};
use crate::config::{KnockbackConfig, SimulationConfig};
use crate::sequence::{PhaseWait, SequenceEvent, TimeDomain, TimedSequence};

/// Единственная фаза: полёт, ограниченный timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockbackPhase {
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SettleReason {
    /// Отскоков больше не осталось
    BudgetExhausted,
    /// Отражённая скорость слишком мала для нового отскока
    BelowThreshold,
    /// Sequence не успела закончиться за timeout
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnockbackStep {
    Airborne,
    Bounced,
    Settled(SettleReason),
}

/// Активный knockback (компонент живёт от удара до settle)
#[derive(Component, Debug, Clone)]
pub struct Knockback {
    /// Высота земли, запомненная при первом ударе
    pub ground_y: f32,
    pub launch_velocity: Vec3,
    pub bounces: u32,
    pub bounce_budget: u32,
    pub damping: f32,
    settled: Option<SettleReason>,
    sequence: TimedSequence<KnockbackPhase>,
}

impl Knockback {
    pub fn launch(ground_y: f32, launch_velocity: Vec3, config: &KnockbackConfig) -> Self {
        Self {
            ground_y,
            launch_velocity,
            bounces: 0,
            bounce_budget: config.bounce_budget,
            damping: config.damping,
            settled: None,
            sequence: TimedSequence::new(TimeDomain::Simulation).then(
                KnockbackPhase::Airborne,
                PhaseWait::Until {
                    timeout: config.timeout,
                },
            ),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.settled.is_some()
    }

    pub fn settle_reason(&self) -> Option<SettleReason> {
        self.settled
    }

    pub fn elapsed(&self) -> f32 {
        self.sequence.total_elapsed()
    }

    pub fn bounces_remaining(&self) -> u32 {
        self.bounce_budget.saturating_sub(self.bounces)
    }

    /// Один шаг интеграции.
    ///
    /// Bounce predicate: тело падает (vy < 0) и у земли (y ≤ ground + tolerance).
    pub fn step(
        &mut self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        dt: f32,
        config: &KnockbackConfig,
    ) -> KnockbackStep {
        if let Some(reason) = self.settled {
            return KnockbackStep::Settled(reason);
        }

        let events = self.sequence.tick(dt);
        if events
            .iter()
            .any(|event| matches!(event, SequenceEvent::TimedOut(KnockbackPhase::Airborne)))
        {
            return self.settle(position, velocity, SettleReason::TimedOut);
        }

        velocity.y -= config.gravity * dt;
        *position += *velocity * dt;

        let falling = velocity.y < 0.0;
        let near_ground = position.y <= self.ground_y + config.ground_tolerance;
        if !(falling && near_ground) {
            return KnockbackStep::Airborne;
        }

        // Отскок
        position.y = self.ground_y;
        let reflected = -velocity.y * self.damping;
        velocity.x *= self.damping;
        velocity.z *= self.damping;
        self.bounces += 1;

        if self.bounces >= self.bounce_budget {
            return self.settle(position, velocity, SettleReason::BudgetExhausted);
        }
        if reflected < config.min_bounce_speed {
            return self.settle(position, velocity, SettleReason::BelowThreshold);
        }

        velocity.y = reflected;
        KnockbackStep::Bounced
    }

    fn settle(&mut self, position: &mut Vec3, velocity: &mut Vec3, reason: SettleReason) -> KnockbackStep {
        // Закрываем Until фазу (no-op если уже timed out)
        self.sequence.resolve();
        *velocity = Vec3::ZERO;
        position.y = self.ground_y;
        self.settled = Some(reason);
        KnockbackStep::Settled(reason)
    }
}

/// Damage-scaled multiplier: damage / divisor, clamp [min, max]
pub fn knockback_multiplier(damage: u32, config: &KnockbackConfig) -> f32 {
    (damage as f32 / config.damage_divisor).clamp(config.min_multiplier, config.max_multiplier)
}

/// Импульс удара. Вертикаль от направления удара отбрасывается.
pub fn launch_velocity(hit_direction: Vec3, damage: u32, config: &KnockbackConfig) -> Vec3 {
    let multiplier = knockback_multiplier(damage, config);
    let horizontal = Vec3::new(hit_direction.x, 0.0, hit_direction.z).normalize_or_zero();
    horizontal * config.force * multiplier + Vec3::Y * config.up_force * multiplier
}

/// Запуск knockback на теле.
///
/// Новый удар во время полёта заменяет импульс, но высота земли
/// остаётся от первого удара.
pub fn start_knockback(
    commands: &mut Commands,
    entity: Entity,
    position: Vec3,
    body: &mut PhysicsBody,
    nav: &mut NavigationAgent,
    existing: Option<&Knockback>,
    hit_direction: Vec3,
    damage: u32,
    config: &KnockbackConfig,
) {
    let ground_y = existing.map(|kb| kb.ground_y).unwrap_or(position.y);
    let velocity = launch_velocity(hit_direction, damage, config);

    nav.suspend();
    body.velocity = velocity;
    body.free_body = true;

    commands
        .entity(entity)
        .insert(Knockback::launch(ground_y, velocity, config));
}

/// Событие: knockback закончился
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct KnockbackSettled {
    pub entity: Entity,
    pub reason: SettleReason,
    pub alive: bool,
}

/// Система интеграции knockback (FixedUpdate)
pub fn integrate_knockback(
    mut bodies: Query<(
        Entity,
        &mut Knockback,
        &mut Transform,
        &mut PhysicsBody,
        &mut NavigationAgent,
        Option<&mut EnemyState>,
        Option<&Health>,
    )>,
    config: Res<SimulationConfig>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut state_events: EventWriter<EnemyStateChanged>,
    mut settled_events: EventWriter<KnockbackSettled>,
) {
    let delta = time.delta_secs();

    for (entity, mut knockback, mut transform, mut body, mut nav, state, health) in bodies.iter_mut() {
        let mut velocity = body.velocity;
        let step = knockback.step(&mut transform.translation, &mut velocity, delta, &config.knockback);
        body.velocity = velocity;

        let KnockbackStep::Settled(reason) = step else {
            continue;
        };

        body.halt();
        commands.entity(entity).remove::<Knockback>();

        let alive = health.is_none_or(|h| h.is_alive())
            && state.as_ref().is_none_or(|s| !s.is_dead());

        if alive {
            nav.restore();
            if let Some(mut state) = state {
                // Stun доигрывает свой таймер, FSM сам вернёт Chase
                if !state.is_stunned() {
                    set_state(entity, &mut state, EnemyState::Chase, &mut state_events);
                }
            }
        }

        crate::log(&format!(
            "🪂 {:?} knockback settled ({:?}, {} bounces, alive: {})",
            entity, reason, knockback.bounces, alive
        ));

        settled_events.write(KnockbackSettled {
            entity,
            reason,
            alive,
        });
    }
}
