//! Events emitted by the simulation for audio and visual feedback.
//!
//! The host owns playback; the simulation only emits cues.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// A one-shot sound effect request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub clip: String,
    pub volume: f32,
    pub pitch: f32,
}

/// Visual feedback the host should play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectEvent {
    /// Play a named animation on an entity (`jump`, `attackOne`, `die`, ...).
    Animation { entity: u64, name: String },
    /// An actor took damage and started flashing.
    HitFlash { entity: u64 },
    /// An actor's health reached zero.
    ActorDied { entity: u64, faction: Faction },
    ProjectileSpawned { entity: u64, spec: String },
    /// A projectile entered its death phase.
    ProjectileDestroyed {
        entity: u64,
        position: Vec2,
        /// True when it ran out of lifespan rather than hitting something.
        expired: bool,
        /// Whether the sprite plays `die` or is hidden.
        death_anim: bool,
    },
}
