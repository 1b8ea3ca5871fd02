//! Brute slam: wind up, hit an area at the snapshotted target point, recover.

use bevy::prelude::*;

use super::{AttackBehavior, AttackContext, AttackOutput, AttackStrike, AttackUpdate};
use crate::ai::components::ArchetypeStats;
use crate::sequence::{entered, completed, PhaseWait, TimeDomain, TimedSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlamPhase {
    WindUp,
    /// Strike fires on entry
    Slam,
    Recovery,
}

impl SlamPhase {
    fn name(&self) -> &'static str {
        match self {
            SlamPhase::WindUp => "WindUp",
            SlamPhase::Slam => "Slam",
            SlamPhase::Recovery => "Recovery",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SlamAttack {
    wind_up: f32,
    slam_hold: f32,
    recovery: f32,
    radius: f32,
    damage: u32,
    /// Target point captured on attack entry
    impact_point: Vec3,
    sequence: Option<TimedSequence<SlamPhase>>,
}

impl SlamAttack {
    pub fn new(stats: &ArchetypeStats) -> Self {
        Self {
            wind_up: stats.wind_up,
            slam_hold: stats.strike_duration,
            recovery: stats.recovery,
            radius: stats.strike_radius,
            damage: stats.attack_damage,
            impact_point: Vec3::ZERO,
            sequence: None,
        }
    }

    pub fn impact_point(&self) -> Vec3 {
        self.impact_point
    }

    pub fn phase(&self) -> Option<SlamPhase> {
        self.sequence.as_ref().and_then(|seq| seq.current_phase())
    }
}

impl AttackBehavior for SlamAttack {
    fn name(&self) -> &'static str {
        "Slam"
    }

    fn on_enter_attack(&mut self, _origin: Vec3, target: Vec3) {
        self.impact_point = target;
        self.sequence = Some(
            TimedSequence::new(TimeDomain::Simulation)
                .then(SlamPhase::WindUp, PhaseWait::For(self.wind_up))
                .then(SlamPhase::Slam, PhaseWait::For(self.slam_hold))
                .then(SlamPhase::Recovery, PhaseWait::For(self.recovery)),
        );
    }

    fn update_attack(&mut self, ctx: &AttackContext, out: &mut AttackOutput) -> AttackUpdate {
        let Some(sequence) = self.sequence.as_mut() else {
            return AttackUpdate::Finished;
        };

        let events = sequence.tick(ctx.delta);

        if entered(&events, SlamPhase::Slam) {
            out.strikes.push(AttackStrike {
                center: self.impact_point,
                radius: self.radius,
                damage: self.damage,
            });
        }

        if completed(&events) || sequence.is_complete() {
            self.sequence = None;
            return AttackUpdate::Finished;
        }

        AttackUpdate::Continue
    }

    fn cancel(&mut self) {
        if let Some(sequence) = self.sequence.as_mut() {
            sequence.cancel();
        }
        self.sequence = None;
    }

    fn phase_name(&self) -> Option<&'static str> {
        self.phase().map(|phase| phase.name())
    }
}
