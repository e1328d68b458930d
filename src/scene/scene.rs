/// Scene — owning container for drawables plus the optional octree.
///
/// Drawables live in a slot map and are addressed by stable keys. When
/// the scene carries an octree, every mutation that changes a world
/// bound re-places the drawable immediately, so visitors always see a
/// consistent index. Without an octree the visitors fall back to
/// linear walks over the slot map.

use glam::Mat4;
use slotmap::SlotMap;
use crate::error::Result;
use crate::math::Aabb;
use super::drawable::{Drawable, DrawableFlags, DrawableKey};
use super::octree::{Octree, OctreeConfig};

/// Container of drawables with an optional spatial index.
pub struct Scene {
    drawables: SlotMap<DrawableKey, Drawable>,
    /// Spatial index; `None` means visitors walk linearly
    octree: Option<Octree>,
}

impl Scene {
    /// Create a scene without a spatial index.
    pub fn new() -> Self {
        Self {
            drawables: SlotMap::with_key(),
            octree: None,
        }
    }

    /// Create a scene indexed by an octree over `world_bounds`.
    pub fn with_octree(world_bounds: Aabb, min_cell_size: f32) -> Result<Self> {
        Ok(Self {
            drawables: SlotMap::with_key(),
            octree: Some(Octree::new(world_bounds, min_cell_size)?),
        })
    }

    /// Create a scene with a fully configured octree.
    pub fn with_octree_config(world_bounds: Aabb, config: OctreeConfig) -> Result<Self> {
        Ok(Self {
            drawables: SlotMap::with_key(),
            octree: Some(Octree::with_config(world_bounds, config)?),
        })
    }

    // ===== DRAWABLES =====

    /// Add a drawable and return its stable key.
    pub fn create_drawable(
        &mut self,
        bounding_box: Aabb,
        world_matrix: Mat4,
        flags: DrawableFlags,
        render_order: i32,
    ) -> DrawableKey {
        let drawable = Drawable::new(bounding_box, world_matrix, flags, render_order);
        let world_bounding_box = *drawable.world_bounding_box();
        let key = self.drawables.insert(drawable);

        if let Some(octree) = &mut self.octree {
            octree.place(key, &world_bounding_box);
        }

        crate::scene_trace!("vista3d::Scene", "Created drawable {:?}", key);
        key
    }

    /// Remove a drawable. Returns `true` if the key was live.
    pub fn remove_drawable(&mut self, key: DrawableKey) -> bool {
        if self.drawables.remove(key).is_some() {
            if let Some(octree) = &mut self.octree {
                octree.remove(key);
            }
            crate::scene_trace!("vista3d::Scene", "Removed drawable {:?}", key);
            true
        } else {
            false
        }
    }

    /// Drawable by key.
    pub fn drawable(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables.get(key)
    }

    /// Mutable drawable access, for flags and render order.
    ///
    /// Transform and bounds changes go through `set_world_matrix` /
    /// `set_bounding_box` so the octree placement follows.
    pub fn drawable_mut(&mut self, key: DrawableKey) -> Option<&mut Drawable> {
        self.drawables.get_mut(key)
    }

    /// Move a drawable, keeping its octree placement in sync.
    ///
    /// Returns `false` when the key is dead.
    pub fn set_world_matrix(&mut self, key: DrawableKey, matrix: Mat4) -> bool {
        let Some(drawable) = self.drawables.get_mut(key) else {
            return false;
        };
        drawable.set_world_matrix(matrix);
        let world_bounding_box = *drawable.world_bounding_box();

        if let Some(octree) = &mut self.octree {
            octree.place(key, &world_bounding_box);
        }
        true
    }

    /// Replace a drawable's local bounds, keeping placement in sync.
    ///
    /// Returns `false` when the key is dead.
    pub fn set_bounding_box(&mut self, key: DrawableKey, bounding_box: Aabb) -> bool {
        let Some(drawable) = self.drawables.get_mut(key) else {
            return false;
        };
        drawable.set_bounding_box(bounding_box);
        let world_bounding_box = *drawable.world_bounding_box();

        if let Some(octree) = &mut self.octree {
            octree.place(key, &world_bounding_box);
        }
        true
    }

    /// Iterate all drawables with their keys.
    pub fn drawables(&self) -> impl Iterator<Item = (DrawableKey, &Drawable)> + '_ {
        self.drawables.iter()
    }

    /// Iterate all live keys.
    pub fn keys(&self) -> impl Iterator<Item = DrawableKey> + '_ {
        self.drawables.keys()
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// The spatial index, if this scene carries one.
    pub fn octree(&self) -> Option<&Octree> {
        self.octree.as_ref()
    }

    /// Remove all drawables. Octree node structure is kept.
    pub fn clear(&mut self) {
        self.drawables.clear();
        if let Some(octree) = &mut self.octree {
            octree.clear();
        }
        crate::scene_trace!("vista3d::Scene", "Cleared scene");
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
