/// Axis-Aligned Bounding Box.
///
/// The workhorse bounding volume of the scene system. Drawables store
/// one in local space; the octree and the frustum work on world-space
/// boxes recomputed from the local box and the world matrix.
///
/// An AABB can be *empty* (`min > max` on every axis). Empty boxes are
/// produced by `Aabb::EMPTY` and behave as the identity for `merge`.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
///
/// Invariant once valid: `min[i] <= max[i]` on all three axes.
/// The empty state (`min = +INF, max = -INF`) breaks that invariant on
/// purpose and is detectable via `is_empty()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl Aabb {
    /// The empty AABB. Merging anything into it yields that thing.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create an AABB from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from a center point and half-size extents.
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Test whether this AABB is empty (contains no points).
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Test whether all corners are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Compute the center point of this AABB.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Compute the half-size (center to corner) of this AABB.
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Compute the full size (max - min) of this AABB.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest AABB containing both `self` and `other`.
    ///
    /// Empty boxes act as the identity: merging with `Aabb::EMPTY`
    /// returns the other operand unchanged.
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Scale this AABB about its center by `factor`.
    ///
    /// `factor = 1.0` is the identity; the octree uses 1.5–2.0 to
    /// derive loose bounds from tight node bounds.
    pub fn expanded(&self, factor: f32) -> Aabb {
        let center = self.center();
        let extents = self.extents() * factor;
        Aabb {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Test if this AABB fully contains another AABB.
    ///
    /// Returns `true` if `other` is entirely within `self`.
    /// Used by the octree to decide if an object fits entirely
    /// within a child node's loose bounds.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB contains a point (surface inclusive).
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.x <= point.x && point.x <= self.max.x
        && self.min.y <= point.y && point.y <= self.max.y
        && self.min.z <= point.z && point.z <= self.max.z
    }

    /// Test if this AABB intersects (overlaps) another AABB.
    ///
    /// Returns `true` if the two AABBs overlap or touch.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    ///
    /// An empty AABB stays empty (the infinite corners must not reach
    /// the arithmetic below).
    pub fn transformed(&self, matrix: &Mat4) -> Aabb {
        if self.is_empty() {
            return Aabb::EMPTY;
        }

        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Aabb { min: new_min, max: new_max }
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
