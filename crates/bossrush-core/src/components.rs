//! ECS components for hecs entities.
//!
//! Components are plain data structs. Per-entity logic lives in the
//! behavior crate and is driven by the simulation's systems.

use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::enums::*;
use crate::spec::{HealthTuning, ProjectileSpec};
use crate::types::Pose;

/// One live projectile.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub spec: Arc<ProjectileSpec>,
    pub phase: ProjectilePhase,
    /// Seconds since spawn while Active, seconds since death while Dying.
    pub elapsed: f32,
    pub vertical_velocity: f32,
    /// Mirrors motion, spread and turning for left-facing spawns (+1 or -1).
    pub dir: f32,
    /// World pose.
    pub pose: Pose,
}

impl Projectile {
    pub fn new(spec: Arc<ProjectileSpec>, pose: Pose, dir: f32) -> Self {
        let vertical_velocity = spec.initial_vertical_velocity;
        Self {
            spec,
            phase: ProjectilePhase::Active,
            elapsed: 0.0,
            vertical_velocity,
            dir: if dir < 0.0 { -1.0 } else { 1.0 },
            pose,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == ProjectilePhase::Active
    }
}

/// Actor position and facing (+1 right, -1 left).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    pub facing: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            facing: 1.0,
        }
    }
}

/// Trigger volume relative to the owner's position.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hitbox {
    pub offset: Vec2,
    pub half_extents: Vec2,
}

/// Kinematic body integrated by the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Body {
    pub velocity: Vec2,
    pub gravity_scale: f32,
    /// Extra multiplier on gravity (the dash sets this).
    pub gravity_factor: f32,
    /// Downward speed at the last landing; 0 while airborne or resting.
    pub landing_speed: f32,
}

/// Health, immunity and death state of a damageable actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub faction: Faction,
    pub max: f32,
    pub current: f32,
    pub immunity_frame_length: f32,
    pub immunity_remaining: f32,
    /// Monotonic: once set, never cleared.
    pub dead: bool,
}

impl Health {
    pub fn new(faction: Faction, tuning: &HealthTuning) -> Self {
        Self {
            faction,
            max: tuning.max_health,
            current: tuning.max_health,
            immunity_frame_length: tuning.immunity_frame_length,
            immunity_remaining: 0.0,
            dead: false,
        }
    }
}

/// White hit flash. `elapsed` is `None` while no flash is showing.
#[derive(Debug, Clone)]
pub struct HitFlash {
    pub duration: f32,
    pub alpha: Curve,
    pub elapsed: Option<f32>,
}

/// Cooldowns and input buffers of a combat-capable actor. All values are seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatTimers {
    /// Goes negative after expiring; the alternate attack window reads it.
    pub attack_cooldown: f32,
    pub input_buffer: f32,
    pub buffered_attack: Option<AttackSlot>,
    /// The attack that last executed and whether it was an alternate.
    pub last_attack: Option<(AttackSlot, bool)>,
    /// Positive while dashing; negative values count time since the dash ended.
    pub dash_timer: f32,
    pub jump_hold: f32,
    pub jump_buffer: f32,
    pub coyote: f32,
}

/// Per-tick player flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerState {
    pub grounded: bool,
    pub can_double_jump: bool,
    /// Cleared for cutscenes and on death.
    pub can_input: bool,
    /// Counts down to the next footstep while running on the ground.
    pub step_timer: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            grounded: false,
            can_double_jump: false,
            can_input: true,
            step_timer: 0.0,
        }
    }
}

/// Marks the player-controlled entity.
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Marks an enemy entity.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub name: String,
}

/// Marks an actor that projectiles with a nearest-target query can aim at.
#[derive(Debug, Clone, Copy)]
pub struct Targetable;

/// Boss attack-pattern timers. Both timers start negative to give a grace period.
#[derive(Debug, Clone, Default)]
pub struct BossState {
    pub aimed_timer: f32,
    pub burst_counter: u32,
    pub ring_timer: f32,
}
