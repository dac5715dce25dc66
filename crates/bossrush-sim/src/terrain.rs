//! Static ground geometry of an encounter.

use glam::Vec2;

use bossrush_behavior::behavior::OverlapProbe;
use bossrush_core::types::{Aabb, ColliderId};

/// One solid box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundCollider {
    pub id: ColliderId,
    pub bounds: Aabb,
}

/// All ground colliders, indexed by their `ColliderId`.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    colliders: Vec<GroundCollider>,
}

impl Terrain {
    pub fn new(boxes: &[Aabb]) -> Self {
        let colliders = boxes
            .iter()
            .enumerate()
            .map(|(i, bounds)| GroundCollider {
                id: ColliderId(i as u32),
                bounds: *bounds,
            })
            .collect();
        Self { colliders }
    }

    pub fn colliders(&self) -> &[GroundCollider] {
        &self.colliders
    }

    pub fn get(&self, id: ColliderId) -> Option<&GroundCollider> {
        self.colliders.get(id.0 as usize)
    }

    /// Colliders overlapping `area`, in id order.
    pub fn overlapping<'a>(&'a self, area: &'a Aabb) -> impl Iterator<Item = &'a GroundCollider> + 'a {
        self.colliders.iter().filter(move |c| c.bounds.overlaps(area))
    }

    pub fn touches(&self, area: &Aabb) -> bool {
        self.overlapping(area).next().is_some()
    }
}

impl OverlapProbe for Terrain {
    fn overlaps(&self, center: Vec2, half_extents: Vec2, collider: ColliderId) -> bool {
        self.get(collider)
            .map_or(false, |c| c.bounds.overlaps(&Aabb::new(center, half_extents)))
    }
}
