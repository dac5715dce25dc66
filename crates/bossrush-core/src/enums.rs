//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which behaviour hooks a projectile uses for hits and expiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    /// Dies on expiry, on ground, and on actor hits unless piercing.
    #[default]
    Default,
    /// Bounces off floors it rests on; dies on walls and actors.
    Bounce,
    /// On expiry releases its first child aimed at the nearest target.
    Splitter,
    /// Releases its first child wherever it dies (e.g. an explosion).
    Lobber,
}

/// Axis frame used for forward motion and waviness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementSpace {
    /// Forward is the projectile's own rotated +x axis.
    #[default]
    Local,
    /// Forward is world +x regardless of rotation.
    World,
}

/// Projectile lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectilePhase {
    /// Moving and collidable.
    #[default]
    Active,
    /// Uncollidable; playing its death effect and waiting to be removed.
    Dying,
    /// Terminal; the instance is discarded at cleanup.
    Removed,
}

/// What a projectile ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// Static ground geometry.
    Ground,
    /// A damageable actor's hitbox.
    Hitbox,
}

/// The player's two attack bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackSlot {
    One,
    Two,
}

/// Which side an actor is on. Decides which projectiles can damage it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Damaged only by non-friendly projectiles.
    Player,
    /// Damaged only by friendly projectiles.
    Enemy,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Setup,
    Active,
    Paused,
    /// Every enemy is dead. Projectiles still finish their lifecycles.
    Victory,
    /// The player is dead. Projectiles still finish their lifecycles.
    Defeat,
}

impl GamePhase {
    /// Whether systems advance in this phase.
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::Active | GamePhase::Victory | GamePhase::Defeat)
    }
}
