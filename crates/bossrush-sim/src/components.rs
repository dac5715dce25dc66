//! Engine-only components: the ones that hold entity handles or shared specs.

use std::sync::Arc;

use glam::Vec2;
use hecs::Entity;

use bossrush_behavior::controller::AttackProfile;
use bossrush_core::spec::{PlayerTuning, ProjectileSpec};

/// The player's tuning and resolved attack bindings.
#[derive(Debug, Clone)]
pub struct PlayerLoadout {
    pub tuning: PlayerTuning,
    pub attacks: [Option<Arc<ProjectileSpec>>; 2],
}

impl PlayerLoadout {
    pub fn profiles(&self) -> [Option<AttackProfile>; 2] {
        self.attacks.clone().map(|spec| {
            spec.map(|s| AttackProfile {
                autofire: s.autofire,
                time_between_attacks: s.time_between_attacks,
            })
        })
    }
}

/// Resolved specs of a boss's two patterns.
#[derive(Debug, Clone, Default)]
pub struct BossLoadout {
    pub aimed: Option<Arc<ProjectileSpec>>,
    pub ring: Option<Arc<ProjectileSpec>>,
}

/// Ties a non-decoupled projectile to the actor that fired it. The
/// projectile follows the owner's displacement and mirrors when it turns.
#[derive(Debug, Clone, Copy)]
pub struct Anchor {
    pub owner: Entity,
    pub last_position: Vec2,
    pub last_facing: f32,
}

/// A volley waiting out its spec's spawn delay.
#[derive(Debug, Clone)]
pub struct PendingVolley {
    pub owner: Entity,
    pub spec: Arc<ProjectileSpec>,
    pub remaining: f32,
}
