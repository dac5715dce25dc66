//! Designer-authored response curves.
//!
//! Every time-based and range-based projectile modifier is a `Curve`
//! sampled over [0, 1]. Between keys the curve is a cubic Hermite spline
//! built from each key's authored tangents, so it is continuous and passes
//! through every key. Outside the first/last key the end value is held.

use serde::{Deserialize, Serialize};

/// Clamp to [0, 1]; NaN maps to 0.
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// One control point of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    /// Slope arriving at this key.
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key.
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// A flat key (zero tangents).
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// A piecewise Hermite curve. Keys are kept sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct Curve {
    keys: Vec<Keyframe>,
}

impl From<Vec<Keyframe>> for Curve {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

impl From<Curve> for Vec<Keyframe> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}

impl Curve {
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// The same value everywhere.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value), Keyframe::new(1.0, value)])
    }

    /// A straight line from `start` at 0 to `end` at 1.
    pub fn linear(start: f32, end: f32) -> Self {
        let slope = end - start;
        Self::new(vec![
            Keyframe::with_tangents(0.0, start, slope, slope),
            Keyframe::with_tangents(1.0, end, slope, slope),
        ])
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluate the curve at `t`, clamped to [0, 1] first.
    /// An empty curve evaluates to 0.
    pub fn sample(&self, t: f32) -> f32 {
        let t = clamp01(t);
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; guaranteed to be in 1..len here.
        let idx = self.keys.partition_point(|k| k.time <= t);
        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];

        let span = b.time - a.time;
        if span <= f32::EPSILON {
            return b.value;
        }
        let s = (t - a.time) / span;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * a.value + h10 * span * a.out_tangent + h01 * b.value + h11 * span * b.in_tangent
    }
}
