//! Scenario definitions: the built-in sample encounter.
//!
//! A walled arena with a stationary boss. The player fires an autofire
//! spark and a splitting seeker shell; the boss alternates aimed mortar
//! bursts with rings of bouncing orbs.

use glam::Vec2;

use bossrush_core::curve::{Curve, Keyframe};
use bossrush_core::enums::{BehaviorKind, MovementSpace};
use bossrush_core::spec::*;
use bossrush_core::types::Aabb;

use crate::config::{EncounterConfig, EnemySetup, PlayerSetup};

/// The built-in encounter used by the CLI and the engine tests.
pub fn sample_encounter() -> EncounterConfig {
    EncounterConfig {
        name: "sample-arena".to_string(),
        projectiles: vec![
            spark(),
            seeker_shell(),
            seeker(),
            boss_mortar(),
            mortar_blast(),
            boss_orb(),
        ],
        player: PlayerSetup {
            position: Vec2::new(-8.0, 0.9),
            hitbox: Vec2::new(0.4, 0.9),
            health: HealthTuning {
                max_health: 5.0,
                immunity_frame_length: 1.0,
                ..Default::default()
            },
            tuning: PlayerTuning {
                attack_one: Some("spark".to_string()),
                attack_two: Some("seeker_shell".to_string()),
                enable_alt_attack_anim_one: true,
                enable_air_attack_anim_one: true,
                enable_spawn_anim: true,
                sounds: PlayerSounds {
                    jump: Some(SoundSpec::new("jump", 0.8)),
                    dash: Some(SoundSpec::new("dash", 0.8)),
                    land: Some(SoundSpec::new("land", 0.6)),
                    step: Some(SoundSpec::new("step", 0.4)),
                },
                ..Default::default()
            },
        },
        enemies: vec![EnemySetup {
            name: "warden".to_string(),
            position: Vec2::new(8.0, 3.0),
            hitbox: Vec2::new(1.5, 3.0),
            health: HealthTuning {
                max_health: 40.0,
                immunity_frame_length: 0.0,
                ..Default::default()
            },
            boss: Some(BossTuning {
                aimed_attack: Some("boss_mortar".to_string()),
                ring_attack: Some("boss_orb".to_string()),
                initial_delay: 2.0,
            }),
            targetable: true,
        }],
        ground: vec![
            // floor, top at y = 0
            Aabb::new(Vec2::new(0.0, -1.0), Vec2::new(20.0, 1.0)),
            // walls
            Aabb::new(Vec2::new(-21.0, 10.0), Vec2::new(1.0, 10.0)),
            Aabb::new(Vec2::new(21.0, 10.0), Vec2::new(1.0, 10.0)),
        ],
    }
}

fn sound(clip: &str) -> Option<SoundSpec> {
    Some(SoundSpec::new(clip, 1.0))
}

fn spark() -> ProjectileSpec {
    ProjectileSpec {
        speed: Modifier::on(Curve::constant(14.0)),
        lifespan: 0.6,
        damage: 1.0,
        time_between_attacks: 0.2,
        autofire: true,
        friendly: true,
        decoupled: true,
        hitbox: Vec2::splat(0.2),
        spawn_sound: sound("spark"),
        hit_sound: sound("spark_hit"),
        ..ProjectileSpec::named("spark")
    }
}

/// Rides along with the player until it splits into a seeker.
fn seeker_shell() -> ProjectileSpec {
    ProjectileSpec {
        behavior: BehaviorKind::Splitter,
        speed: Modifier::on(Curve::linear(10.0, 2.0)),
        size: Modifier::on(Curve::linear(0.6, 1.2)),
        lifespan: 0.4,
        damage: 2.0,
        time_between_attacks: 0.8,
        spawn_delay: 0.1,
        friendly: true,
        children: vec!["seeker".to_string()],
        spawn_sound: sound("shell"),
        hit_sound: sound("shell_hit"),
        ..ProjectileSpec::named("seeker_shell")
    }
}

fn seeker() -> ProjectileSpec {
    ProjectileSpec {
        speed: Modifier::on(Curve::constant(16.0)),
        lifespan: 1.5,
        damage: 3.0,
        friendly: true,
        decoupled: true,
        has_death_anim: true,
        death_wait_time: 0.25,
        hit_sound: sound("seeker_hit"),
        expire_sound: sound("fizzle"),
        ..ProjectileSpec::named("seeker")
    }
}

/// Arcs at the player and explodes wherever it lands.
fn boss_mortar() -> ProjectileSpec {
    ProjectileSpec {
        behavior: BehaviorKind::Lobber,
        speed: Modifier::on(Curve::constant(7.0)),
        gravity: Modifier::on(Curve::constant(6.0)),
        initial_vertical_velocity: 4.0,
        lifespan: 3.0,
        quantity: 3,
        damage: 1.0,
        time_between_attacks: 0.6,
        children: vec!["mortar_blast".to_string()],
        hitbox: Vec2::splat(0.3),
        spawn_sound: sound("mortar"),
        ..ProjectileSpec::named("boss_mortar")
    }
}

fn mortar_blast() -> ProjectileSpec {
    ProjectileSpec {
        size: Modifier::on(Curve::new(vec![
            Keyframe::new(0.0, 0.5),
            Keyframe::new(0.3, 2.0),
            Keyframe::new(1.0, 1.5),
        ])),
        lifespan: 0.4,
        damage: 1.0,
        piercing: true,
        hitbox: Vec2::splat(0.5),
        spawn_sound: sound("blast"),
        ..ProjectileSpec::named("mortar_blast")
    }
}

/// Drifts outwards in world space with a wobble and bounces on floors.
fn boss_orb() -> ProjectileSpec {
    ProjectileSpec {
        behavior: BehaviorKind::Bounce,
        movement_space: MovementSpace::World,
        speed: Modifier::on(Curve::constant(3.0)),
        waviness: Waviness {
            enabled: true,
            amplitude: Curve::constant(1.5),
            frequency: Curve::constant(0.5),
        },
        gravity: Modifier::on(Curve::constant(9.0)),
        initial_vertical_velocity: 2.0,
        lifespan: 5.0,
        quantity: 8,
        damage: 1.0,
        time_between_attacks: 4.0,
        hitbox: Vec2::splat(0.25),
        bounce_probe: Some(ProbeBox {
            offset: Vec2::new(0.0, -0.3),
            half_extents: Vec2::new(0.1, 0.1),
        }),
        hit_sound: sound("orb_bounce"),
        expire_sound: sound("orb_pop"),
        ..ProjectileSpec::named("boss_orb")
    }
}
