//! Game state snapshot: the complete visible state handed to the host each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, EffectEvent};
use crate::types::SimTime;

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f32,
    pub player: Option<ActorView>,
    pub enemies: Vec<ActorView>,
    pub projectiles: Vec<ProjectileView>,
    pub audio_events: Vec<AudioEvent>,
    pub effect_events: Vec<EffectEvent>,
}

/// A damageable actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    pub entity: u64,
    pub name: String,
    pub position: Vec2,
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub dead: bool,
    pub invulnerable: bool,
    /// Current white-flash alpha (0 when not flashing).
    pub flash_alpha: f32,
}

/// A projectile in world space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub entity: u64,
    pub spec: String,
    pub phase: ProjectilePhase,
    pub position: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
}
