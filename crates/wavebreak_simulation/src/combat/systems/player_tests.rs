//! Tests for player combat helpers.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::player::in_attack_arc;

    #[test]
    fn test_target_in_front_is_hit() {
        assert!(in_attack_arc(Vec3::ZERO, Vec3::X, Vec3::new(1.5, 0.0, 0.2), 2.0, 90.0));
    }

    #[test]
    fn test_target_behind_is_missed() {
        assert!(!in_attack_arc(Vec3::ZERO, Vec3::X, Vec3::new(-1.5, 0.0, 0.0), 2.0, 120.0));
    }

    #[test]
    fn test_target_out_of_range_is_missed() {
        assert!(!in_attack_arc(Vec3::ZERO, Vec3::X, Vec3::new(2.5, 0.0, 0.0), 2.0, 360.0));
    }

    #[test]
    fn test_point_blank_and_full_circle() {
        // Вплотную — всегда в дуге
        assert!(in_attack_arc(Vec3::ZERO, Vec3::X, Vec3::new(-0.1, 0.0, 0.1), 2.0, 30.0));
        // 360° — в любом направлении
        assert!(in_attack_arc(Vec3::ZERO, Vec3::X, Vec3::new(-1.5, 0.0, 0.0), 2.0, 360.0));
    }

    #[test]
    fn test_height_is_ignored() {
        // Враг в воздухе (knockback) всё ещё попадает по XZ
        assert!(in_attack_arc(Vec3::ZERO, Vec3::new(1.0, -5.0, 0.0), Vec3::new(1.0, 3.0, 0.0), 2.0, 60.0));
    }

    #[test]
    fn test_combat_exports_resolve_unambiguously() {
        // Системы и компоненты доступны из crate::combat без путей через модули
        use crate::combat::{in_attack_arc as arc, Player, PlayerStats};

        let _marker = Player;
        let stats = PlayerStats::default();
        assert!(arc(Vec3::ZERO, Vec3::X, Vec3::new(1.0, 0.0, 0.0), stats.attack_range(), 90.0));
    }
}
