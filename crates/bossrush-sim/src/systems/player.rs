//! Player control system. Runs the controller for the player entity.
//!
//! Samples the ground probe, steps the controller and applies its output to
//! the body. Executed attacks become pending volleys that wait out their
//! spec's spawn delay.

use glam::Vec2;
use hecs::{Entity, World};

use bossrush_behavior::controller::{self, ControllerContext};
use bossrush_core::commands::PlayerInput;
use bossrush_core::components::*;
use bossrush_core::constants::GROUND_PROBE_DEPTH;
use bossrush_core::enums::AttackSlot;
use bossrush_core::types::Aabb;

use crate::components::{PendingVolley, PlayerLoadout};
use crate::systems::Feedback;
use crate::terrain::Terrain;

/// Thin box just below the feet of a hitbox.
pub fn ground_probe(transform: &Transform, hitbox: &Hitbox) -> Aabb {
    let center = transform.position + hitbox.offset;
    let feet = center.y - hitbox.half_extents.y;
    Aabb::new(
        Vec2::new(center.x, feet - GROUND_PROBE_DEPTH / 2.0),
        Vec2::new(hitbox.half_extents.x * 0.9, GROUND_PROBE_DEPTH / 2.0),
    )
}

/// Step the controller of every player entity.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    terrain: &Terrain,
    input: &PlayerInput,
    dt: f32,
    dt_unscaled: f32,
    pending: &mut Vec<PendingVolley>,
    fb: &mut Feedback,
) {
    let mut animations: Vec<(Entity, &'static str)> = Vec::new();

    for (entity, (_player, transform, hitbox, body, health, state, timers, loadout)) in world
        .query_mut::<(
            &Player,
            &mut Transform,
            &Hitbox,
            &mut Body,
            &Health,
            &mut PlayerState,
            &mut CombatTimers,
            &PlayerLoadout,
        )>()
    {
        let ctx = ControllerContext {
            input,
            touching_ground: terrain.touches(&ground_probe(transform, hitbox)),
            velocity: body.velocity,
            fall_speed: body.landing_speed,
            facing: transform.facing,
            dead: health.dead,
            dt,
            dt_unscaled,
        };
        let profiles = loadout.profiles();
        let out = controller::step(&loadout.tuning, &profiles, state, timers, ctx);

        body.landing_speed = 0.0;
        body.velocity = out.velocity;
        body.gravity_factor = out.gravity_factor;
        transform.facing = out.facing;

        fb.cues.extend(out.cues);
        animations.extend(out.animations.into_iter().map(|name| (entity, name)));

        for slot in out.attacks {
            let index = match slot {
                AttackSlot::One => 0,
                AttackSlot::Two => 1,
            };
            if let Some(spec) = &loadout.attacks[index] {
                tracing::trace!(?slot, spec = %spec.name, "player attack");
                pending.push(PendingVolley {
                    owner: entity,
                    spec: spec.clone(),
                    remaining: spec.spawn_delay,
                });
            }
        }
    }

    for (entity, name) in animations {
        fb.animation(entity, name);
    }
}
