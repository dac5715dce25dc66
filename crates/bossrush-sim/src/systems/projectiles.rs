//! Projectile systems: lifecycle ticking and owner anchoring.
//!
//! The lifecycle itself lives in `bossrush_behavior::lifecycle`; these
//! systems feed it the tick's services and turn its outcomes into sounds,
//! effect events and child spawns.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use bossrush_behavior::behavior::{Arena, ChildRequest};
use bossrush_behavior::lifecycle::{self, DeathCause, Outcome};
use bossrush_behavior::targeting::{TargetRegistry, TargetSelector};
use bossrush_core::components::{Projectile, Transform};
use bossrush_core::events::EffectEvent;
use bossrush_core::types::Pose;

use crate::components::Anchor;
use crate::config::SpecLibrary;
use crate::systems::{entity_id, Feedback};
use crate::terrain::Terrain;
use crate::world_setup;

/// Advance every projectile by one tick: motion while Active, expiry, the
/// post-death wait.
pub fn run<R: Rng>(
    world: &mut World,
    terrain: &Terrain,
    targets: &mut TargetRegistry,
    specs: &SpecLibrary,
    dt: f32,
    rng: &mut R,
    fb: &mut Feedback,
) {
    let mut children = Vec::new();
    {
        let mut selector = TargetSelector {
            registry: targets,
            rng,
        };
        let mut arena = Arena {
            probe: terrain,
            targets: &mut selector,
            dt,
        };
        for (entity, projectile) in world.query_mut::<&mut Projectile>() {
            let outcome = lifecycle::tick(projectile, &mut arena);
            record(entity, projectile, outcome, fb, &mut children);
        }
    }
    spawn_children(world, specs, children, fb);
}

/// Forward a lifecycle outcome to the feedback stream.
pub(crate) fn record(
    entity: Entity,
    projectile: &Projectile,
    outcome: Outcome,
    fb: &mut Feedback,
    children: &mut Vec<ChildRequest>,
) {
    fb.cues.extend(outcome.cues);
    if let Some(cause) = outcome.died {
        tracing::trace!(spec = %projectile.spec.name, ?cause, "projectile died");
        fb.effects.push(EffectEvent::ProjectileDestroyed {
            entity: entity_id(entity),
            position: projectile.pose.position,
            expired: cause == DeathCause::Expired,
            death_anim: projectile.spec.has_death_anim,
        });
    }
    children.extend(outcome.child);
}

/// Spawn released children. Unknown spec names are logged and skipped.
pub(crate) fn spawn_children(
    world: &mut World,
    specs: &SpecLibrary,
    children: Vec<ChildRequest>,
    fb: &mut Feedback,
) {
    for child in children {
        match specs.get(&child.spec) {
            Ok(spec) => {
                let pose = Pose::new(child.position, child.rotation_deg);
                world_setup::spawn_projectile(world, spec, pose, 1.0, None, fb);
            }
            Err(err) => tracing::warn!(error = %err, "child projectile skipped"),
        }
    }
}

/// Carry anchored projectiles along with their owners. When the owner turns
/// around, the projectile is mirrored across the owner's vertical axis.
pub fn follow_anchors(world: &mut World) {
    let mut moves: Vec<(Entity, Vec2, f32)> = Vec::new();
    {
        let mut query = world.query::<&Anchor>();
        for (entity, anchor) in query.iter() {
            if let Ok(owner) = world.get::<&Transform>(anchor.owner) {
                moves.push((entity, owner.position, owner.facing));
            }
        }
    }

    for (entity, owner_position, owner_facing) in moves {
        let Ok((projectile, anchor)) = world.query_one_mut::<(&mut Projectile, &mut Anchor)>(entity)
        else {
            continue;
        };
        let facing = if owner_facing < 0.0 { -1.0 } else { 1.0 };
        projectile.pose.position += owner_position - anchor.last_position;
        if facing != anchor.last_facing {
            let x = projectile.pose.position.x;
            projectile.pose.position.x = owner_position.x - (x - owner_position.x);
            projectile.pose.rotation_deg = -projectile.pose.rotation_deg;
            projectile.dir = -projectile.dir;
        }
        anchor.last_position = owner_position;
        anchor.last_facing = facing;
    }
}
