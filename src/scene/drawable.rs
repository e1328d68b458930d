/// Drawable — a cullable, pickable object managed by a Scene.
///
/// A drawable is the flattened interface the spatial queries consume:
/// a local-space bounding box, a world matrix (with cached inverse and
/// cached world-space bounds), behavior flags, and a render order. The
/// geometry and material side of an object lives elsewhere; culling
/// and picking never look at it.

use glam::Mat4;
use slotmap::new_key_type;
use bitflags::bitflags;
use crate::math::Aabb;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a Drawable within a Scene.
    ///
    /// Keys remain valid even after other drawables are removed.
    /// A key becomes invalid only when its own drawable is removed.
    pub struct DrawableKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-drawable behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DrawableFlags: u32 {
        /// Drawable participates in rendering at all
        const VISIBLE       = 1 << 0;
        /// Drawable is rendered into shadow passes
        const CAST_SHADOW   = 1 << 1;
        /// Drawable participates in raycast picking
        const PICKABLE      = 1 << 2;
        /// Drawable skips the frustum test and always counts as fully inside
        const CLIP_DISABLED = 1 << 3;
    }
}

impl Default for DrawableFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::CAST_SHADOW | Self::PICKABLE
    }
}

// ===== DRAWABLE =====

/// A cullable, pickable scene object.
///
/// The world matrix is the one mutable input with derived state: its
/// inverse and the world-space bounding box are cached on every
/// change. Moves go through `Scene::set_world_matrix` so the octree
/// placement stays in sync.
#[derive(Debug, Clone)]
pub struct Drawable {
    world_matrix: Mat4,
    /// Cached inverse, used to bring picking rays into local space
    inv_world_matrix: Mat4,
    /// Local-space bounds of the drawable's geometry
    bounding_box: Aabb,
    /// Cached `bounding_box` transformed by `world_matrix`
    world_bounding_box: Aabb,
    flags: DrawableFlags,
    render_order: i32,
}

impl Drawable {
    /// Create a drawable from local bounds and a world matrix.
    pub fn new(
        bounding_box: Aabb,
        world_matrix: Mat4,
        flags: DrawableFlags,
        render_order: i32,
    ) -> Self {
        Self {
            world_matrix,
            inv_world_matrix: world_matrix.inverse(),
            bounding_box,
            world_bounding_box: bounding_box.transformed(&world_matrix),
            flags,
            render_order,
        }
    }

    // ===== GETTERS =====

    /// World matrix (local → world).
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Inverse world matrix (world → local).
    pub fn inv_world_matrix(&self) -> &Mat4 {
        &self.inv_world_matrix
    }

    /// Local-space bounding box.
    pub fn bounding_box(&self) -> &Aabb {
        &self.bounding_box
    }

    /// World-space bounding box (cached).
    pub fn world_bounding_box(&self) -> &Aabb {
        &self.world_bounding_box
    }

    /// Behavior flags.
    pub fn flags(&self) -> DrawableFlags {
        self.flags
    }

    /// Sort key consumed by render queues (lower draws first).
    pub fn render_order(&self) -> i32 {
        self.render_order
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(DrawableFlags::VISIBLE)
    }

    pub fn casts_shadow(&self) -> bool {
        self.flags.contains(DrawableFlags::CAST_SHADOW)
    }

    pub fn is_pickable(&self) -> bool {
        self.flags.contains(DrawableFlags::PICKABLE)
    }

    pub fn clip_disabled(&self) -> bool {
        self.flags.contains(DrawableFlags::CLIP_DISABLED)
    }

    // ===== SETTERS =====

    /// Replace the behavior flags.
    pub fn set_flags(&mut self, flags: DrawableFlags) {
        self.flags = flags;
    }

    /// Set the render order.
    pub fn set_render_order(&mut self, render_order: i32) {
        self.render_order = render_order;
    }

    /// Replace the world matrix and refresh the derived state.
    ///
    /// Crate-internal: callers move drawables through
    /// `Scene::set_world_matrix`, which also updates the octree.
    pub(crate) fn set_world_matrix(&mut self, matrix: Mat4) {
        self.world_matrix = matrix;
        self.inv_world_matrix = matrix.inverse();
        self.world_bounding_box = self.bounding_box.transformed(&matrix);
    }

    /// Replace the local bounds and refresh the world bounds.
    pub(crate) fn set_bounding_box(&mut self, bounding_box: Aabb) {
        self.bounding_box = bounding_box;
        self.world_bounding_box = bounding_box.transformed(&self.world_matrix);
    }
}

#[cfg(test)]
#[path = "drawable_tests.rs"]
mod tests;
