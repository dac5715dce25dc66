//! Kinematic integration system.
//!
//! Applies gravity, integrates position from velocity and pushes bodies out
//! of ground colliders along the axis of least penetration.

use hecs::World;

use bossrush_core::components::{Body, Hitbox, Transform};
use bossrush_core::constants::GRAVITY;
use bossrush_core::types::Aabb;

use crate::terrain::Terrain;

/// Run kinematic integration for all entities with Transform + Hitbox + Body.
pub fn run(world: &mut World, terrain: &Terrain, dt: f32) {
    for (_entity, (transform, hitbox, body)) in
        world.query_mut::<(&mut Transform, &Hitbox, &mut Body)>()
    {
        body.velocity.y += GRAVITY * body.gravity_scale * body.gravity_factor * dt;
        transform.position += body.velocity * dt;

        for collider in terrain.colliders() {
            let area = Aabb::new(transform.position + hitbox.offset, hitbox.half_extents);
            if !collider.bounds.overlaps(&area) {
                continue;
            }
            let delta = area.center - collider.bounds.center;
            let depth = area.half_extents + collider.bounds.half_extents - delta.abs();

            if depth.y <= depth.x {
                if delta.y >= 0.0 {
                    transform.position.y += depth.y;
                    if body.velocity.y < 0.0 {
                        body.landing_speed = -body.velocity.y;
                        body.velocity.y = 0.0;
                    }
                } else {
                    transform.position.y -= depth.y;
                    body.velocity.y = body.velocity.y.min(0.0);
                }
            } else {
                transform.position.x += depth.x.copysign(delta.x);
                body.velocity.x = 0.0;
            }
        }
    }
}
