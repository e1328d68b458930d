/// Camera — view/projection pair with an attached frustum.
///
/// The camera computes no motion of its own. The caller derives the
/// view and projection matrices from high-level parameters (position,
/// rotation, FOV, etc.) and stores them here; the camera only keeps
/// the frustum fed with the combined matrix so culling and picking
/// always see the current state.

use glam::{Mat4, Vec3};
use crate::math::Ray;
use super::frustum::Frustum;

/// A camera: view matrix, projection matrix, and the derived frustum.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Create a camera from a view and a projection matrix.
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum: Frustum::from_view_projection(projection * view),
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum derived from the current matrices.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Mutable frustum access (plane/corner reads recompute lazily).
    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }

    // ===== SETTERS =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
        self.frustum.set_view_projection(self.projection_matrix * self.view_matrix);
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
        self.frustum.set_view_projection(self.projection_matrix * self.view_matrix);
    }

    // ===== PICKING =====

    /// Build a world-space ray through a screen point.
    ///
    /// `x`/`y` are in pixels with the origin at the top-left corner;
    /// `width`/`height` are the viewport dimensions. The ray starts on
    /// the near plane and carries a normalized direction.
    pub fn screen_point_to_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = 2.0 * x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / height;

        let inverse = self.view_projection_matrix().inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        Ray::new(near, (far - near).normalize())
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
