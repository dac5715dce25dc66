//! Per-tick projectile kinematics.
//!
//! Every enabled modifier is resampled at the current lifespan progress
//! each tick, so amplitude and frequency changes shape the path as it flies.
//! Disabled modifiers contribute nothing.

use std::f32::consts::TAU;

use glam::Vec2;

use bossrush_core::components::Projectile;
use bossrush_core::enums::MovementSpace;

/// Move, turn and scale one projectile by `dt` seconds.
/// `elapsed` must already include this tick.
pub fn advance_pose(p: &mut Projectile, dt: f32) {
    let spec = p.spec.clone();
    let progress = spec.progress(p.elapsed);

    let (forward, lateral) = match spec.movement_space {
        MovementSpace::Local => (p.pose.forward(), p.pose.up()),
        MovementSpace::World => (Vec2::X, Vec2::Y),
    };

    if let Some(speed) = spec.speed.sample(progress) {
        p.pose.position += forward * (p.dir * speed * dt);
    }

    if spec.waviness.enabled {
        let amplitude = spec.waviness.amplitude.sample(progress);
        let frequency = spec.waviness.frequency.sample(progress);
        let mut phase = p.elapsed * frequency * TAU;
        if spec.movement_space == MovementSpace::World {
            phase += p.pose.rotation_deg.to_radians();
        }
        p.pose.position += lateral * (p.dir * phase.cos() * amplitude * dt);
    }

    if let Some(turns) = spec.curviness.sample(progress) {
        p.pose.rotation_deg += p.dir * turns * dt * 360.0;
    }

    if let Some(size) = spec.size.sample(progress) {
        p.pose.scale = size;
    }

    if let Some(gravity) = spec.gravity.sample(progress) {
        p.vertical_velocity -= gravity * dt;
        p.pose.position.y += p.vertical_velocity * dt;
    }
}
