//! Collision system: projectile triggers against ground and actor hitboxes.
//!
//! Overlaps are trigger-enter: a projectile reports a contact only in the
//! tick it starts overlapping something. Actor contacts go through damage
//! negotiation first; anything but a polarity mismatch is then reported to
//! the projectile as a hit.

use std::collections::HashSet;

use hecs::{Entity, World};
use rand::Rng;

use bossrush_behavior::behavior::{Arena, Hit};
use bossrush_behavior::controller;
use bossrush_behavior::damage::{self, DamageOutcome, Strike};
use bossrush_behavior::lifecycle;
use bossrush_behavior::targeting::{TargetRegistry, TargetSelector};
use bossrush_core::components::*;
use bossrush_core::enums::Faction;
use bossrush_core::events::EffectEvent;
use bossrush_core::types::{Aabb, ColliderId};

use crate::components::PlayerLoadout;
use crate::config::SpecLibrary;
use crate::systems::projectiles::{record, spawn_children};
use crate::systems::{entity_id, Feedback};
use crate::terrain::Terrain;

/// What a projectile is touching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contact {
    Ground(ColliderId),
    Actor(Entity),
}

/// Projectile/contact pairs that overlapped during the previous tick.
pub type ContactSet = HashSet<(Entity, Contact)>;

/// Trigger volume of a projectile at its current pose.
pub fn projectile_bounds(projectile: &Projectile) -> Aabb {
    Aabb::new(
        projectile.pose.position,
        projectile.spec.hitbox * projectile.pose.scale.abs(),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn run<R: Rng>(
    world: &mut World,
    terrain: &Terrain,
    targets: &mut TargetRegistry,
    specs: &SpecLibrary,
    contacts: &mut ContactSet,
    dt: f32,
    rng: &mut R,
    fb: &mut Feedback,
) {
    // Corpses still collide: damage is refused but the projectile is told.
    let actors: Vec<(Entity, Aabb)> = world
        .query::<(&Transform, &Hitbox, &Health)>()
        .iter()
        .map(|(e, (t, h, _))| (e, Aabb::new(t.position + h.offset, h.half_extents)))
        .collect();

    let mut entered: Vec<(Entity, Contact)> = Vec::new();
    let mut current = ContactSet::new();
    for (entity, projectile) in world.query::<&Projectile>().iter() {
        if !projectile.is_active() {
            continue;
        }
        let bounds = projectile_bounds(projectile);
        // Actors first: a shot grazing the floor still lands on its target.
        let touching = actors
            .iter()
            .filter(|(_, area)| area.overlaps(&bounds))
            .map(|(actor, _)| Contact::Actor(*actor))
            .chain(terrain.overlapping(&bounds).map(|c| Contact::Ground(c.id)));
        for contact in touching {
            if !contacts.contains(&(entity, contact)) {
                entered.push((entity, contact));
            }
            current.insert((entity, contact));
        }
    }
    *contacts = current;

    let mut children = Vec::new();
    {
        let mut selector = TargetSelector {
            registry: targets,
            rng,
        };
        for (entity, contact) in entered {
            let Ok(mut projectile) = world.get::<&mut Projectile>(entity) else {
                continue;
            };
            // An earlier contact this tick may already have ended it.
            if !projectile.is_active() {
                continue;
            }

            let hit = match contact {
                Contact::Ground(id) => Hit::Ground(id),
                Contact::Actor(actor) => {
                    let strike = Strike {
                        damage: projectile.spec.damage,
                        friendly: projectile.spec.friendly,
                    };
                    if !strike_actor(world, actor, strike, fb) {
                        continue;
                    }
                    Hit::Hitbox
                }
            };

            let mut arena = Arena {
                probe: terrain,
                targets: &mut selector,
                dt,
            };
            let outcome = lifecycle::try_destroy(&mut projectile, hit, &mut arena);
            record(entity, &projectile, outcome, fb, &mut children);
        }
    }
    spawn_children(world, specs, children, fb);
}

/// Negotiate damage on one actor. Returns whether the projectile hit it.
fn strike_actor(world: &World, actor: Entity, strike: Strike, fb: &mut Feedback) -> bool {
    let invulnerable = match (
        world.get::<&PlayerLoadout>(actor),
        world.get::<&CombatTimers>(actor),
    ) {
        (Ok(loadout), Ok(timers)) => controller::is_invulnerable(&loadout.tuning, &timers),
        _ => false,
    };

    let Ok(mut health) = world.get::<&mut Health>(actor) else {
        return false;
    };
    let outcome = damage::negotiate(&mut health, strike, invulnerable);
    let faction = health.faction;
    drop(health);

    match outcome {
        DamageOutcome::Ignored => return false,
        DamageOutcome::Blocked(reason) => {
            tracing::trace!(entity = entity_id(actor), ?reason, "hit blocked");
        }
        DamageOutcome::Damaged { remaining, killed } => {
            tracing::debug!(entity = entity_id(actor), ?faction, remaining, "actor damaged");
            if let Ok(mut flash) = world.get::<&mut HitFlash>(actor) {
                damage::start_flash(&mut flash);
            }
            fb.effects.push(EffectEvent::HitFlash {
                entity: entity_id(actor),
            });
            if killed {
                on_death(world, actor, faction, fb);
            }
        }
    }
    true
}

fn on_death(world: &World, actor: Entity, faction: Faction, fb: &mut Feedback) {
    tracing::info!(entity = entity_id(actor), ?faction, "actor died");
    fb.effects.push(EffectEvent::ActorDied {
        entity: entity_id(actor),
        faction,
    });

    if let Ok(mut state) = world.get::<&mut PlayerState>(actor) {
        state.can_input = false;
    }
    let die_anim = world
        .get::<&PlayerLoadout>(actor)
        .map_or(false, |loadout| loadout.tuning.enable_die_anim);
    if die_anim {
        fb.animation(actor, "die");
    }
}
