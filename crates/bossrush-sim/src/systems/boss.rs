//! Boss pattern system. Fires the aimed burst and the ring for every live boss.

use hecs::World;
use rand::Rng;

use bossrush_behavior::boss::{self, BossContext, Shot};
use bossrush_core::components::*;
use bossrush_core::types::Pose;

use crate::components::BossLoadout;
use crate::config::SpecLibrary;
use crate::systems::Feedback;
use crate::world_setup;

pub fn run<R: Rng>(
    world: &mut World,
    specs: &SpecLibrary,
    dt: f32,
    rng: &mut R,
    fb: &mut Feedback,
) {
    let player_position = world
        .query::<(&Player, &Transform)>()
        .iter()
        .next()
        .map(|(_, (_, t))| t.position);

    let mut shots: Vec<(glam::Vec2, Shot)> = Vec::new();
    for (_entity, (transform, health, state, loadout)) in
        world.query_mut::<(&Transform, &Health, &mut BossState, &BossLoadout)>()
    {
        if health.dead {
            continue;
        }
        let ctx = BossContext {
            dt,
            position: transform.position,
            player_position,
            aimed: loadout.aimed.as_deref(),
            ring: loadout.ring.as_deref(),
        };
        let origin = transform.position;
        shots.extend(boss::step(state, &ctx, rng).into_iter().map(|s| (origin, s)));
    }

    for (origin, shot) in shots {
        match specs.get(&shot.spec) {
            Ok(spec) => {
                world_setup::spawn_projectile(
                    world,
                    spec,
                    Pose::new(origin, shot.rotation_deg),
                    1.0,
                    None,
                    fb,
                );
            }
            Err(err) => tracing::warn!(error = %err, "boss shot skipped"),
        }
    }
}
