//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position, rotation and uniform scale of a 2D object.
/// Rotation is in degrees, counter-clockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl Pose {
    pub fn new(position: Vec2, rotation_deg: f32) -> Self {
        Self {
            position,
            rotation_deg,
            scale: 1.0,
        }
    }

    /// Local +x axis in world space.
    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.rotation_deg.to_radians())
    }

    /// Local +y axis in world space.
    pub fn up(&self) -> Vec2 {
        self.forward().perp()
    }
}

/// Axis-aligned box used for trigger overlaps and ground geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    /// Strict overlap test: boxes that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y
    }
}

/// Identifies one piece of static ground geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed scaled simulation time in seconds.
    pub elapsed_secs: f64,
    /// Elapsed real time in seconds, unaffected by time scale.
    pub unscaled_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` real seconds at the given time scale.
    pub fn advance(&mut self, dt: f32, time_scale: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt * time_scale);
        self.unscaled_secs += f64::from(dt);
    }
}
