//! Charger dash: wind up, dash at the snapshotted point, recover.
//!
//! The dash ends on contact with the snapshotted point or on timeout,
//! whichever comes first. Exactly one strike per attack.

use bevy::prelude::*;

use super::{AttackBehavior, AttackContext, AttackOutput, AttackStrike, AttackUpdate};
use crate::ai::components::ArchetypeStats;
use crate::sequence::{completed, PhaseWait, SequenceEvent, TimeDomain, TimedSequence};

/// Distance to the dash point that counts as arrival
const ARRIVAL_EPSILON: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargePhase {
    WindUp,
    Dash,
    Recovery,
}

impl ChargePhase {
    fn name(&self) -> &'static str {
        match self {
            ChargePhase::WindUp => "WindUp",
            ChargePhase::Dash => "Dash",
            ChargePhase::Recovery => "Recovery",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChargeAttack {
    wind_up: f32,
    dash_timeout: f32,
    recovery: f32,
    dash_speed: f32,
    radius: f32,
    damage: u32,
    dash_target: Vec3,
    struck: bool,
    sequence: Option<TimedSequence<ChargePhase>>,
}

impl ChargeAttack {
    pub fn new(stats: &ArchetypeStats) -> Self {
        Self {
            wind_up: stats.wind_up,
            dash_timeout: stats.strike_duration,
            recovery: stats.recovery,
            dash_speed: stats.dash_speed,
            radius: stats.strike_radius,
            damage: stats.attack_damage,
            dash_target: Vec3::ZERO,
            struck: false,
            sequence: None,
        }
    }

    pub fn dash_target(&self) -> Vec3 {
        self.dash_target
    }

    pub fn phase(&self) -> Option<ChargePhase> {
        self.sequence.as_ref().and_then(|seq| seq.current_phase())
    }

    fn strike_at(&mut self, center: Vec3, out: &mut AttackOutput) {
        if self.struck {
            return;
        }
        self.struck = true;
        out.strikes.push(AttackStrike {
            center,
            radius: self.radius,
            damage: self.damage,
        });
    }
}

impl AttackBehavior for ChargeAttack {
    fn name(&self) -> &'static str {
        "Charge"
    }

    fn on_enter_attack(&mut self, origin: Vec3, target: Vec3) {
        // Рывок по земле: высота цели не важна
        self.dash_target = Vec3::new(target.x, origin.y, target.z);
        self.struck = false;
        self.sequence = Some(
            TimedSequence::new(TimeDomain::Simulation)
                .then(ChargePhase::WindUp, PhaseWait::For(self.wind_up))
                .then(
                    ChargePhase::Dash,
                    PhaseWait::Until {
                        timeout: self.dash_timeout,
                    },
                )
                .then(ChargePhase::Recovery, PhaseWait::For(self.recovery)),
        );
    }

    fn update_attack(&mut self, ctx: &AttackContext, out: &mut AttackOutput) -> AttackUpdate {
        let Some(mut sequence) = self.sequence.take() else {
            return AttackUpdate::Finished;
        };

        let mut events = sequence.tick(ctx.delta);

        if sequence.current_phase() == Some(ChargePhase::Dash) {
            let to_target = self.dash_target - ctx.position;
            let distance = to_target.length();
            let step = self.dash_speed * ctx.delta;

            if distance <= step.max(ARRIVAL_EPSILON) {
                out.displacement = to_target;
                self.strike_at(self.dash_target, out);
                events.extend(sequence.resolve());
            } else if distance > 0.0 {
                out.displacement = to_target / distance * step;
            }
        }

        if events
            .iter()
            .any(|event| matches!(event, SequenceEvent::TimedOut(ChargePhase::Dash)))
        {
            // Не добежал за timeout — бьём там, где остановились
            self.strike_at(ctx.position + out.displacement, out);
        }

        if completed(&events) || sequence.is_complete() {
            return AttackUpdate::Finished;
        }

        self.sequence = Some(sequence);
        AttackUpdate::Continue
    }

    fn cancel(&mut self) {
        self.sequence = None;
        self.struck = false;
    }

    fn phase_name(&self) -> Option<&'static str> {
        self.phase().map(|phase| phase.name())
    }
}
