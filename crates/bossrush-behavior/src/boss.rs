//! Attack pattern of the example boss.
//!
//! Two independent patterns, each paced by its own spec's
//! `time_between_attacks`:
//! - aimed burst: one projectile at the player per beat for `quantity`
//!   beats, then silence until the beat counter reaches `quantity × 4`;
//! - ring: `quantity` projectiles evenly spaced around a random start angle.

use glam::Vec2;
use rand::Rng;

use bossrush_core::components::BossState;
use bossrush_core::constants::BOSS_BURST_CYCLE_FACTOR;
use bossrush_core::spec::ProjectileSpec;

use crate::targeting::bearing_deg;

/// A projectile the boss wants to fire.
#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub spec: String,
    pub rotation_deg: f32,
}

pub struct BossContext<'a> {
    pub dt: f32,
    pub position: Vec2,
    pub player_position: Option<Vec2>,
    pub aimed: Option<&'a ProjectileSpec>,
    pub ring: Option<&'a ProjectileSpec>,
}

/// Timers for a boss that waits `initial_delay` seconds before attacking.
pub fn new_state(initial_delay: f32) -> BossState {
    BossState {
        aimed_timer: -initial_delay,
        burst_counter: 0,
        ring_timer: -initial_delay,
    }
}

/// Advance both patterns by one tick and return the shots to fire.
pub fn step<R: Rng>(state: &mut BossState, ctx: &BossContext<'_>, rng: &mut R) -> Vec<Shot> {
    let mut shots = Vec::new();

    if let Some(spec) = ctx.aimed {
        state.aimed_timer += ctx.dt;
        if state.aimed_timer > spec.time_between_attacks {
            state.aimed_timer = 0.0;
            state.burst_counter += 1;
            if state.burst_counter <= spec.quantity {
                if let Some(player) = ctx.player_position {
                    shots.push(Shot {
                        spec: spec.name.clone(),
                        rotation_deg: bearing_deg(ctx.position, player),
                    });
                }
            } else if state.burst_counter >= spec.quantity * BOSS_BURST_CYCLE_FACTOR {
                state.burst_counter = 0;
            }
        }
    }

    if let Some(spec) = ctx.ring {
        state.ring_timer += ctx.dt;
        if state.ring_timer > spec.time_between_attacks && spec.quantity > 0 {
            state.ring_timer = 0.0;
            let step = 360.0 / spec.quantity as f32;
            let start = rng.gen_range(0.0..step);
            shots.extend((0..spec.quantity).map(|i| Shot {
                spec: spec.name.clone(),
                rotation_deg: start + i as f32 * step,
            }));
        }
    }

    shots
}
