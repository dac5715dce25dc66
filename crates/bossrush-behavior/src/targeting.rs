//! Nearest-target selection for aimed projectiles.

use glam::Vec2;
use rand::Rng;

use crate::behavior::TargetQuery;

/// Bearing in degrees from `from` to `to`, counter-clockwise from +x.
/// Targets above the query point have a positive bearing.
pub fn bearing_deg(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Nearest candidate by Euclidean distance. Equally near candidates are
/// chosen uniformly at random.
pub fn select_nearest<R, I>(from: Vec2, candidates: I, rng: &mut R) -> Option<Vec2>
where
    R: Rng,
    I: IntoIterator<Item = Vec2>,
{
    let mut best: Option<(Vec2, f32)> = None;
    let mut ties = 0u32;
    for candidate in candidates {
        let dist = candidate.distance(from);
        match best {
            Some((_, best_dist)) if dist > best_dist => {}
            Some((_, best_dist)) if dist == best_dist => {
                ties += 1;
                if rng.gen_range(0..ties) == 0 {
                    best = Some((candidate, dist));
                }
            }
            _ => {
                best = Some((candidate, dist));
                ties = 1;
            }
        }
    }
    best.map(|(position, _)| position)
}

/// One registered target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: u64,
    pub position: Vec2,
    pub alive: bool,
}

/// Targets that aimed projectiles may seek. Dead or removed targets are
/// pruned before every selection.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: u64, position: Vec2) {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) => {
                target.position = position;
                target.alive = true;
            }
            None => self.targets.push(Target {
                id,
                position,
                alive: true,
            }),
        }
    }

    /// Refresh a target. Unknown ids are ignored.
    pub fn update(&mut self, id: u64, position: Vec2, alive: bool) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.position = position;
            target.alive = alive;
        }
    }

    /// Mark every target for which `exists` is false as gone.
    pub fn retain_existing(&mut self, mut exists: impl FnMut(u64) -> bool) {
        for target in &mut self.targets {
            if !exists(target.id) {
                target.alive = false;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn prune(&mut self) {
        self.targets.retain(|t| t.alive);
    }

    /// Bearing to the nearest live target; 0 when none remain.
    pub fn nearest_bearing<R: Rng>(&mut self, from: Vec2, rng: &mut R) -> f32 {
        self.prune();
        select_nearest(from, self.targets.iter().map(|t| t.position), rng)
            .map(|to| bearing_deg(from, to))
            .unwrap_or(0.0)
    }
}

/// A registry paired with the session RNG, usable from behaviour hooks.
pub struct TargetSelector<'a, R: Rng> {
    pub registry: &'a mut TargetRegistry,
    pub rng: &'a mut R,
}

impl<R: Rng> TargetQuery for TargetSelector<'_, R> {
    fn nearest_bearing(&mut self, from: Vec2) -> f32 {
        self.registry.nearest_bearing(from, self.rng)
    }
}
