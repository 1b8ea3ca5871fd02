//! Spawn врага по архетипу

use bevy::prelude::*;

use super::attack::AttackBehaviorSlot;
use super::components::{ArchetypeStats, Enemy, EnemyArchetype, EnemyCombat};
use crate::components::{Health, MovementSpeed};

/// Спавн врага: Enemy marker тянет required components,
/// здесь только то, что зависит от архетипа.
pub fn spawn_enemy(
    commands: &mut Commands,
    archetype: EnemyArchetype,
    stats: &ArchetypeStats,
    position: Vec3,
) -> Entity {
    let entity = commands
        .spawn((
            Enemy { archetype },
            Name::new(archetype.name()),
            Health::new(stats.max_health),
            MovementSpeed {
                speed: stats.move_speed,
            },
            EnemyCombat::from(stats),
            AttackBehaviorSlot::for_archetype(archetype, stats),
            Transform::from_translation(position),
        ))
        .id();

    crate::log(&format!(
        "👾 Spawned {} {:?} at {:?} (hp {})",
        archetype.name(),
        entity,
        position,
        stats.max_health
    ));

    entity
}
