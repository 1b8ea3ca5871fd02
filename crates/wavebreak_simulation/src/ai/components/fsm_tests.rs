//! Tests for enemy FSM components.

#[cfg(test)]
mod tests {
    use super::super::fsm::*;
    use crate::components::Health;

    #[test]
    fn test_enemy_state_default() {
        assert_eq!(EnemyState::default(), EnemyState::Chase);
    }

    #[test]
    fn test_lethal_damage_goes_straight_to_die() {
        let mut health = Health::new(60);
        let mut state = EnemyState::Chase;

        let response = resolve_damage(&mut health, &mut state, 70, 0.5);

        assert_eq!(response, DamageResponse::Killed { dealt: 60 });
        assert_eq!(health.current, 0);
        assert_eq!(state, EnemyState::Die);
        assert!(response.triggers_knockback());
    }

    #[test]
    fn test_non_lethal_damage_stuns() {
        let mut health = Health::new(10);
        let mut state = EnemyState::Attack;

        let response = resolve_damage(&mut health, &mut state, 5, 0.4);

        assert_eq!(response, DamageResponse::Stunned { dealt: 5 });
        assert_eq!(health.current, 5);
        assert_eq!(state, EnemyState::Stun { remaining: 0.4 });
    }

    #[test]
    fn test_repeated_damage_keeps_stun_timer() {
        let mut health = Health::new(100);
        let mut state = EnemyState::Stun { remaining: 0.15 };

        let response = resolve_damage(&mut health, &mut state, 10, 1.0);

        assert_eq!(response, DamageResponse::StunHeld { dealt: 10 });
        assert_eq!(state, EnemyState::Stun { remaining: 0.15 });
        assert_eq!(health.current, 90);
    }

    #[test]
    fn test_damage_on_dead_enemy_is_ignored() {
        let mut health = Health { current: 0, max: 30 };
        let mut state = EnemyState::Die;

        let response = resolve_damage(&mut health, &mut state, 50, 0.5);

        assert_eq!(response, DamageResponse::Ignored);
        assert_eq!(response.dealt(), 0);
        assert!(!response.triggers_knockback());
        assert_eq!(state, EnemyState::Die);
    }

    #[test]
    fn test_archetype_defaults_differ() {
        let brute = EnemyArchetype::Brute.default_stats();
        let charger = EnemyArchetype::Charger.default_stats();

        assert!(brute.max_health > charger.max_health);
        assert!(charger.move_speed > brute.move_speed);
        assert!(charger.dash_speed > 0.0);
        assert_eq!(EnemyCombat::from(&brute).attack_range, brute.attack_range);
    }
}
