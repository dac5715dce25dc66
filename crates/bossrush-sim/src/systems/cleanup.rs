//! Cleanup system: removes projectiles that have finished dying.

use hecs::{Entity, World};

use bossrush_core::components::Projectile;
use bossrush_core::enums::ProjectilePhase;

/// Despawn every Removed projectile.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.phase == ProjectilePhase::Removed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
