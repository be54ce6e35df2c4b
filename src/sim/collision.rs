//! Axis-aligned box collision between bodies
//!
//! Every body is a box `center ± size / 2`. Two bodies collide when their
//! boxes touch or overlap on both axes and they belong to opposing factions.

use glam::Vec2;

use super::body::Body;

/// An axis-aligned bounding box stored as its min/max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box centered on `center` with full extents `size`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Top-left corner and full extents, as a draw call wants them
    pub fn to_rect(&self) -> (Vec2, Vec2) {
        (self.min, self.max - self.min)
    }

    /// Separating-axis test; boxes that merely touch count as overlapping
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }
}

/// Geometry-only overlap check between two center/size boxes
#[inline]
pub fn aabb_overlap(center_a: Vec2, size_a: Vec2, center_b: Vec2, size_b: Vec2) -> bool {
    Aabb::from_center_size(center_a, size_a).overlaps(&Aabb::from_center_size(center_b, size_b))
}

/// Whether two bodies destroy each other this frame.
///
/// False for the same body and for bodies of the same faction, regardless of
/// overlap. Symmetric in its arguments.
pub fn colliding(a: &Body, b: &Body) -> bool {
    if a.id() == b.id() || a.faction() == b.faction() {
        return false;
    }
    aabb_overlap(a.center(), a.size(), b.center(), b.size())
}
