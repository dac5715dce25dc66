//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, enemies and projectiles with the component bundles
//! the systems expect.

use std::sync::Arc;

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use bossrush_behavior::audio::Cue;
use bossrush_behavior::boss;
use bossrush_behavior::combat;
use bossrush_behavior::volley::volley_rotations;
use bossrush_core::components::*;
use bossrush_core::enums::Faction;
use bossrush_core::events::EffectEvent;
use bossrush_core::spec::{HealthTuning, ProjectileSpec};
use bossrush_core::types::Pose;

use crate::components::{Anchor, BossLoadout, PlayerLoadout};
use crate::config::{EncounterConfig, EnemySetup, PlayerSetup, SpecLibrary};
use crate::systems::{entity_id, Feedback};

/// Populate an empty world from an encounter. Returns the player entity.
pub fn setup_encounter(world: &mut World, encounter: &EncounterConfig, specs: &SpecLibrary) -> Entity {
    let player = spawn_player(world, &encounter.player, specs);
    for enemy in &encounter.enemies {
        spawn_enemy(world, enemy, specs);
    }
    player
}

fn flash(tuning: &HealthTuning) -> HitFlash {
    HitFlash {
        duration: tuning.flash.duration,
        alpha: tuning.flash.alpha.clone(),
        elapsed: None,
    }
}

/// Spawn the player with its controller state and resolved attacks.
pub fn spawn_player(world: &mut World, setup: &PlayerSetup, specs: &SpecLibrary) -> Entity {
    let tuning = setup.tuning.clone();
    let loadout = PlayerLoadout {
        attacks: [
            specs.resolve(tuning.attack_one.as_deref()),
            specs.resolve(tuning.attack_two.as_deref()),
        ],
        tuning,
    };
    let timers = combat::fresh(loadout.tuning.dash_downtime);
    let body = Body {
        velocity: Vec2::ZERO,
        gravity_scale: loadout.tuning.gravity_scale,
        gravity_factor: 1.0,
        landing_speed: 0.0,
    };

    world.spawn((
        Player,
        Transform {
            position: setup.position,
            facing: 1.0,
        },
        Hitbox {
            offset: Vec2::ZERO,
            half_extents: setup.hitbox,
        },
        body,
        Health::new(Faction::Player, &setup.health),
        flash(&setup.health),
        PlayerState::default(),
        timers,
        loadout,
    ))
}

/// Spawn a stationary enemy, with an attack pattern when it has one.
pub fn spawn_enemy(world: &mut World, setup: &EnemySetup, specs: &SpecLibrary) -> Entity {
    let entity = world.spawn((
        Enemy {
            name: setup.name.clone(),
        },
        Transform {
            position: setup.position,
            facing: -1.0,
        },
        Hitbox {
            offset: Vec2::ZERO,
            half_extents: setup.hitbox,
        },
        Health::new(Faction::Enemy, &setup.health),
        flash(&setup.health),
    ));

    if setup.targetable {
        let _ = world.insert_one(entity, Targetable);
    }
    if let Some(tuning) = &setup.boss {
        let loadout = BossLoadout {
            aimed: specs.resolve(tuning.aimed_attack.as_deref()),
            ring: specs.resolve(tuning.ring_attack.as_deref()),
        };
        let _ = world.insert(entity, (boss::new_state(tuning.initial_delay), loadout));
    }
    entity
}

/// Spawn one projectile with a world pose and play its spawn sound.
pub fn spawn_projectile(
    world: &mut World,
    spec: Arc<ProjectileSpec>,
    pose: Pose,
    dir: f32,
    anchor: Option<Anchor>,
    fb: &mut Feedback,
) -> Entity {
    fb.cues.push(Cue::new(&spec.spawn_sound));
    let name = spec.name.clone();
    let projectile = Projectile::new(spec, pose, dir);
    let entity = match anchor {
        Some(anchor) => world.spawn((projectile, anchor)),
        None => world.spawn((projectile,)),
    };
    fb.effects.push(EffectEvent::ProjectileSpawned {
        entity: entity_id(entity),
        spec: name,
    });
    entity
}

/// Fire one volley from `owner`'s current position in its facing direction.
/// Nothing spawns when the owner is gone.
pub fn spawn_volley<R: Rng>(
    world: &mut World,
    owner: Entity,
    spec: &Arc<ProjectileSpec>,
    rng: &mut R,
    fb: &mut Feedback,
) -> Vec<Entity> {
    let Ok(transform) = world.get::<&Transform>(owner).map(|t| *t) else {
        tracing::debug!(spec = %spec.name, "volley owner is gone; skipping");
        return Vec::new();
    };
    let dir = if transform.facing < 0.0 { -1.0 } else { 1.0 };
    let anchor = (!spec.decoupled).then_some(Anchor {
        owner,
        last_position: transform.position,
        last_facing: dir,
    });

    volley_rotations(spec, dir, rng)
        .into_iter()
        .map(|rotation| {
            let pose = Pose::new(transform.position, rotation);
            spawn_projectile(world, spec.clone(), pose, dir, anchor, fb)
        })
        .collect()
}
