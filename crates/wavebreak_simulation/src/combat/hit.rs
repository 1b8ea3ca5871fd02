//! Hit roll: base damage → crit → final damage
//!
//! Крит решается один раз на удар и дальше едет в HitOutcome
//! (урон, feedback, звук читают один и тот же результат).

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub base_damage: u32,
    pub critical: bool,
    pub final_damage: u32,
}

/// Бросок крита через RNG симуляции
pub fn process_hit<R: Rng + ?Sized>(
    base_damage: u32,
    crit_chance: f32,
    crit_multiplier: f32,
    rng: &mut R,
) -> HitOutcome {
    let roll: f32 = rng.gen();
    resolve_hit(base_damage, roll, crit_chance, crit_multiplier)
}

/// Детерминированная часть: roll ∈ [0, 1), крит если roll < chance
pub fn resolve_hit(base_damage: u32, roll: f32, crit_chance: f32, crit_multiplier: f32) -> HitOutcome {
    let critical = roll < crit_chance.clamp(0.0, 1.0);
    let final_damage = if critical {
        (base_damage as f32 * crit_multiplier.max(1.0)).round() as u32
    } else {
        base_damage
    };

    HitOutcome {
        base_damage,
        critical,
        final_damage,
    }
}
