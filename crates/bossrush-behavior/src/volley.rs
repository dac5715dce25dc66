//! Spread of a simultaneous volley.
//!
//! The spread curve is range-based: each projectile of a volley draws one
//! point on it. Slot `i` of `quantity` draws from a window centred on
//! `i / (quantity - 1)` (0.5 for a single projectile) whose half-width
//! grows with the `ProjectileSpec` spread randomness.

use rand::Rng;

use bossrush_core::curve::clamp01;
use bossrush_core::spec::ProjectileSpec;

/// Draw the curve sample point for slot `index` of a volley.
pub fn spread_point<R: Rng>(index: u32, quantity: u32, randomness: f32, rng: &mut R) -> f32 {
    let quantity = quantity.max(1);
    let mid = if quantity == 1 {
        0.5
    } else {
        index as f32 / (quantity - 1) as f32
    };
    let half_width = clamp01(randomness) / 2.0 / quantity as f32;
    let lo = clamp01(mid - half_width);
    let hi = clamp01(mid + half_width);
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Spawn rotation (degrees) of every projectile in one volley, mirrored by `dir`.
pub fn volley_rotations<R: Rng>(spec: &ProjectileSpec, dir: f32, rng: &mut R) -> Vec<f32> {
    (0..spec.quantity)
        .map(|i| {
            if spec.spread.enabled {
                let t = spread_point(i, spec.quantity, spec.spread_randomness, rng);
                dir * spec.spread.curve.sample(t)
            } else {
                0.0
            }
        })
        .collect()
}
