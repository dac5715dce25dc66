//! Per-entity combat logic for bossrush.
//!
//! Projectile motion and lifecycle, behaviour variants, combat timers,
//! the player controller, damage negotiation, targeting, boss patterns
//! and the audio cue service. No ECS dependency: everything operates on
//! plain data and returns what the caller should do next.

pub mod audio;
pub mod behavior;
pub mod boss;
pub mod combat;
pub mod controller;
pub mod damage;
pub mod lifecycle;
pub mod motion;
pub mod targeting;
pub mod volley;

pub use bossrush_core as core;

#[cfg(test)]
mod tests;
