/// RaycastVisitor — nearest-hit ray query over the scene.
///
/// Walks the octree pruning subtrees whose loose bounds the ray
/// misses, then tests each candidate drawable in the drawable's local
/// space: without renormalization the local-space entry parameter
/// equals the world-space distance along the query ray, so hits from
/// differently-scaled objects compare directly. The running minimum
/// makes traversal order irrelevant for correctness.

use crate::math::Ray;
use super::drawable::{Drawable, DrawableKey};
use super::octree::{Octree, ROOT};
use super::scene::Scene;

/// Nearest accepted hit of a raycast walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub drawable: DrawableKey,
    /// Parameter along the query ray; negative when the ray origin
    /// started inside the hit bound
    pub distance: f32,
}

/// Nearest-hit traversal over one scene.
///
/// Not reentrant: the scratch ray is exclusive to one visitor, so one
/// instance serves one query at a time.
pub struct RaycastVisitor {
    ray: Ray,
    /// Scratch ray re-targeted into each candidate's local space
    local_ray: Ray,
    best: Option<DrawableKey>,
    best_distance: f32,
}

impl RaycastVisitor {
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            local_ray: ray,
            best: None,
            best_distance: f32::INFINITY,
        }
    }

    /// The world-space query ray.
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Replace the query ray; the next `visit` starts fresh.
    pub fn set_ray(&mut self, ray: Ray) {
        self.ray = ray;
    }

    /// Walk the scene, keeping the nearest pickable hit.
    pub fn visit(&mut self, scene: &Scene) {
        self.best = None;
        self.best_distance = f32::INFINITY;

        if let Some(octree) = scene.octree() {
            self.visit_node(scene, octree, ROOT);
        } else {
            for (key, drawable) in scene.drawables() {
                self.test_drawable(key, drawable);
            }
        }
    }

    /// Nearest hit of the last walk, if any.
    pub fn intersected(&self) -> Option<RaycastHit> {
        self.best.map(|drawable| RaycastHit {
            drawable,
            distance: self.best_distance,
        })
    }

    fn visit_node(&mut self, scene: &Scene, octree: &Octree, node_index: u32) {
        let node = octree.node(node_index);

        // The root is always entered; deeper nodes must pass the box test
        if node.level() > 0 && !self.ray.bbox_intersection_test(node.loose_bounds()) {
            return;
        }

        for &key in node.objects() {
            if let Some(drawable) = scene.drawable(key) {
                self.test_drawable(key, drawable);
            }
        }

        for octant in 0..8 {
            if let Some(child) = node.child(octant) {
                self.visit_node(scene, octree, child);
            }
        }
    }

    fn test_drawable(&mut self, key: DrawableKey, drawable: &Drawable) {
        if !drawable.is_visible() || !drawable.is_pickable() {
            return;
        }

        let inverse = drawable.inv_world_matrix();
        self.local_ray.set(
            inverse.transform_point3(self.ray.origin()),
            inverse.transform_vector3(self.ray.direction()),
        );

        let distance = self.local_ray.bbox_intersection_test_ex(drawable.bounding_box());
        if distance < self.best_distance {
            self.best = Some(key);
            self.best_distance = distance;
        }
    }
}

#[cfg(test)]
#[path = "raycast_visitor_tests.rs"]
mod tests;
