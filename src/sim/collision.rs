//! Collision primitives for the side-scrolling playfield
//!
//! Everything in the world is either an axis-aligned box (avatar, obstacle
//! halves, hazard bodies) or a circle (pickups, bullets, bombs).

use glam::Vec2;

/// Axis-aligned bounding box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Shrink every side by `pad` (never inverting the box)
    pub fn shrink(&self, pad: f32) -> Self {
        let center = (self.min + self.max) / 2.0;
        let min = (self.min + Vec2::splat(pad)).min(center);
        let max = (self.max - Vec2::splat(pad)).max(center);
        Self { min, max }
    }

    /// Strict overlap test (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Horizontal span overlap only
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.max.x > left && self.min.x < right
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Two circles overlap when their centres are closer than the radius sum
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Circle against box
#[inline]
pub fn circle_aabb_overlap(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    center.distance_squared(closest) < radius * radius
}

/// A padded box crossing a gapped obstacle pair
///
/// Hits if the box is horizontally within the pair and pokes above the top
/// half's edge or below the bottom half's edge.
pub fn box_hits_gap(hitbox: &Aabb, left: f32, right: f32, top_height: f32, bottom_y: f32) -> bool {
    hitbox.overlaps_x(left, right) && (hitbox.min.y < top_height || hitbox.max.y > bottom_y)
}
