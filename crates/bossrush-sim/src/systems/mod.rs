//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or is passed in by
//! the engine. Sound and visual feedback is collected into a `Feedback`.

use hecs::Entity;

use bossrush_behavior::audio::Cue;
use bossrush_core::events::EffectEvent;

pub mod bodies;
pub mod boss;
pub mod cleanup;
pub mod collision;
pub mod health;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod spawns;

/// Feedback produced during one tick, drained into the snapshot.
#[derive(Debug, Default)]
pub struct Feedback {
    pub cues: Vec<Cue>,
    pub effects: Vec<EffectEvent>,
}

impl Feedback {
    pub fn animation(&mut self, entity: Entity, name: &str) {
        self.effects.push(EffectEvent::Animation {
            entity: entity_id(entity),
            name: name.to_string(),
        });
    }
}

/// Stable id of an entity as exposed in snapshots and events.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}
