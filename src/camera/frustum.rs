/// Frustum — six clipping planes and eight corner points, derived
/// lazily from a view-projection matrix and a world matrix.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Setting either matrix only marks the frustum dirty; planes and
/// corners are recomputed on the next read. The world matrix is an
/// extra transform folded in ahead of the projection, so one frustum
/// can test bounds expressed in some local space (identity for an
/// ordinary camera).

use glam::{Mat4, Vec3, Vec4};
use crate::math::Aabb;

/// Result of a 3-way frustum/AABB classification.
///
/// Drives hierarchical culling over the octree:
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect all objects without further testing
/// - `Partial` → test individual objects and recurse into children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipState {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum boundary
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Frustum corner indices: bit 0 = right, bit 1 = top, bit 2 = far
pub const CORNER_LEFT_BOTTOM_NEAR: usize = 0;
pub const CORNER_RIGHT_BOTTOM_NEAR: usize = 1;
pub const CORNER_LEFT_TOP_NEAR: usize = 2;
pub const CORNER_RIGHT_TOP_NEAR: usize = 3;
pub const CORNER_LEFT_BOTTOM_FAR: usize = 4;
pub const CORNER_RIGHT_BOTTOM_FAR: usize = 5;
pub const CORNER_LEFT_TOP_FAR: usize = 6;
pub const CORNER_RIGHT_TOP_FAR: usize = 7;

/// Six frustum planes plus eight corners for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    view_projection: Mat4,
    world: Mat4,
    /// Cached planes: left, right, bottom, top, near, far
    planes: [Vec4; 6],
    /// Cached corners, indexed by the CORNER_* constants
    corners: [Vec3; 8],
    dirty: bool,
}

impl Frustum {
    /// Create a frustum with identity matrices (the NDC cube).
    pub fn new() -> Self {
        Self {
            view_projection: Mat4::IDENTITY,
            world: Mat4::IDENTITY,
            planes: [Vec4::ZERO; 6],
            corners: [Vec3::ZERO; 8],
            dirty: true,
        }
    }

    /// Create a frustum from a view-projection matrix.
    pub fn from_view_projection(matrix: Mat4) -> Self {
        let mut frustum = Self::new();
        frustum.set_view_projection(matrix);
        frustum
    }

    // ===== GETTERS =====

    /// View-projection matrix.
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Extra transform applied to tested geometry ahead of the projection.
    pub fn world(&self) -> &Mat4 {
        &self.world
    }

    /// Frustum planes, recomputed first if a matrix changed.
    pub fn planes(&mut self) -> &[Vec4; 6] {
        self.ensure_updated();
        &self.planes
    }

    /// Frustum corners, recomputed first if a matrix changed.
    ///
    /// Indexed by the CORNER_* constants.
    pub fn corners(&mut self) -> &[Vec3; 8] {
        self.ensure_updated();
        &self.corners
    }

    // ===== SETTERS — store and mark dirty, compute nothing =====

    /// Set the view-projection matrix.
    pub fn set_view_projection(&mut self, matrix: Mat4) {
        self.view_projection = matrix;
        self.dirty = true;
    }

    /// Set the world matrix.
    pub fn set_world(&mut self, matrix: Mat4) {
        self.world = matrix;
        self.dirty = true;
    }

    // ===== QUERIES =====

    /// Test if a point is inside the frustum.
    pub fn contains_point(&mut self, point: Vec3) -> bool {
        self.ensure_updated();
        for plane in &self.planes {
            let normal = Vec3::new(plane.x, plane.y, plane.z);
            if normal.dot(point) + plane.w < 0.0 {
                return false;
            }
        }
        true
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// Returns `true` if the AABB is (potentially) inside or intersecting.
    /// May return false positives (conservative), never false negatives.
    /// An empty AABB never intersects.
    pub fn intersects_aabb(&mut self, aabb: &Aabb) -> bool {
        if aabb.is_empty() {
            return false;
        }
        self.ensure_updated();

        for plane in &self.planes {
            let normal = Vec3::new(plane.x, plane.y, plane.z);

            // Find the positive vertex (corner most aligned with the normal)
            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            // If the positive vertex is outside this plane, the AABB is fully outside
            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// Tests both the positive vertex (p-vertex) and negative vertex (n-vertex)
    /// against each plane:
    /// - If the p-vertex is outside any plane → `Outside` (early out)
    /// - If the n-vertex is outside any plane → at least `Partial`
    /// - If all n-vertices are inside all planes → `Inside`
    ///
    /// An empty AABB classifies as `Outside`.
    pub fn classify_aabb(&mut self, aabb: &Aabb) -> ClipState {
        if aabb.is_empty() {
            return ClipState::Outside;
        }
        self.ensure_updated();

        let mut all_inside = true;

        for plane in &self.planes {
            let normal = Vec3::new(plane.x, plane.y, plane.z);

            // Positive vertex: corner most in the direction of the normal
            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            // If the p-vertex is outside → entire AABB is outside
            if normal.dot(p_vertex) + plane.w < 0.0 {
                return ClipState::Outside;
            }

            // Negative vertex: corner least in the direction of the normal
            let n_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
                if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
                if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
            );

            // If the n-vertex is outside → AABB straddles this plane
            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { ClipState::Inside } else { ClipState::Partial }
    }

    // ===== RECOMPUTATION =====

    fn ensure_updated(&mut self) {
        if !self.dirty {
            return;
        }

        let combined = self.view_projection * self.world;
        let m = combined.to_cols_array_2d();

        // Gribb & Hartmann: extract planes from rows of the combined matrix
        // Each plane is normalized so that (A, B, C) is a unit vector.
        // With a 0..1 depth range the row-sum near plane sits at ndc
        // z = -1, slightly behind the true near plane (conservative
        // for culling)
        self.planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row3 + row2
            Vec4::new(m[0][3] + m[0][2], m[1][3] + m[1][2], m[2][3] + m[2][2], m[3][3] + m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        // Normalize each plane
        for plane in &mut self.planes {
            let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        // Corners: unproject the canonical NDC cube (z in [0, 1],
        // matching the 0..1 depth range of the projection helpers)
        let inverse = combined.inverse();
        for (index, corner) in self.corners.iter_mut().enumerate() {
            let ndc = Vec3::new(
                if index & 1 != 0 { 1.0 } else { -1.0 },
                if index & 2 != 0 { 1.0 } else { -1.0 },
                if index & 4 != 0 { 1.0 } else { 0.0 },
            );
            *corner = inverse.project_point3(ndc);
        }

        self.dirty = false;
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
