//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use bossrush_behavior::controller;
use bossrush_behavior::damage;
use bossrush_core::components::*;
use bossrush_core::enums::GamePhase;
use bossrush_core::events::{AudioEvent, EffectEvent};
use bossrush_core::state::*;
use bossrush_core::types::SimTime;

use crate::components::PlayerLoadout;
use crate::systems::entity_id;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    time_scale: f32,
    audio_events: Vec<AudioEvent>,
    effect_events: Vec<EffectEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        time_scale,
        player: build_player(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        audio_events,
        effect_events,
    }
}

fn actor_view(
    entity: hecs::Entity,
    name: &str,
    transform: &Transform,
    health: &Health,
    flash: &HitFlash,
    dashing_shield: bool,
) -> ActorView {
    ActorView {
        entity: entity_id(entity),
        name: name.to_string(),
        position: transform.position,
        facing: transform.facing,
        health: health.current,
        max_health: health.max,
        dead: health.dead,
        invulnerable: dashing_shield || health.immunity_remaining > 0.0,
        flash_alpha: damage::flash_alpha(flash),
    }
}

fn build_player(world: &World) -> Option<ActorView> {
    world
        .query::<(&Player, &Transform, &Health, &HitFlash, &CombatTimers, &PlayerLoadout)>()
        .iter()
        .next()
        .map(|(entity, (_, transform, health, flash, timers, loadout))| {
            let shield = controller::is_invulnerable(&loadout.tuning, timers);
            actor_view(entity, "player", transform, health, flash, shield)
        })
}

fn build_enemies(world: &World) -> Vec<ActorView> {
    world
        .query::<(&Enemy, &Transform, &Health, &HitFlash)>()
        .iter()
        .map(|(entity, (enemy, transform, health, flash))| {
            actor_view(entity, &enemy.name, transform, health, flash, false)
        })
        .collect()
}

/// Dying projectiles stay visible while their death effect plays.
fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, p)| ProjectileView {
            entity: entity_id(entity),
            spec: p.spec.name.clone(),
            phase: p.phase,
            position: p.pose.position,
            rotation_deg: p.pose.rotation_deg,
            scale: p.pose.scale,
        })
        .collect()
}
