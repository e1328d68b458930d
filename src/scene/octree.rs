/// Octree — loose, lazily-subdivided spatial index over drawables.
///
/// Each object is stored in exactly one node: the shallowest node
/// whose *loose* bound (the tight grid cell expanded by a configurable
/// factor) fully contains the object's world AABB. The loose bounds
/// mean an object whose center sits in a cell can overhang the cell
/// edges without being pushed up the tree, which keeps small moves
/// from churning re-insertions.
///
/// Nodes live in a flat arena. Children are created on first insertion
/// into their octant and never removed, so arena indices stay stable
/// for the lifetime of the tree; only the per-node object lists mutate
/// as objects move.

use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::math::Aabb;
use super::drawable::DrawableKey;

/// Index of the root node in the flat node arena.
pub(crate) const ROOT: u32 = 0;

/// Sentinel for an absent child in `OctreeNode::children`.
const NO_CHILD: u32 = u32::MAX;

// ===== CONFIG =====

/// Tuning knobs for octree construction.
#[derive(Debug, Clone, Copy)]
pub struct OctreeConfig {
    /// Expansion factor applied to each cell's tight bound. Must be
    /// >= 1; 1.5–2 is the useful range.
    pub loose_factor: f32,
    /// Subdivision stops once a child cell's shortest side would drop
    /// below this.
    pub min_cell_size: f32,
    /// Hard cap on tree depth regardless of cell size.
    pub max_depth: u32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            loose_factor: 2.0,
            min_cell_size: 1.0,
            max_depth: 8,
        }
    }
}

// ===== NODE =====

/// A single node in the octree.
#[derive(Debug)]
pub struct OctreeNode {
    /// Depth of this node (root = 0)
    level: u32,
    /// Tight grid-cell bound
    bounds: Aabb,
    /// Tight bound expanded by the loose factor; placement and
    /// traversal test against this
    loose_bounds: Aabb,
    /// Arena index per octant, NO_CHILD until first use
    children: [u32; 8],
    /// Drawables stored at this node's level
    objects: Vec<DrawableKey>,
}

impl OctreeNode {
    fn new(level: u32, bounds: Aabb, loose_factor: f32) -> Self {
        Self {
            level,
            bounds,
            loose_bounds: bounds.expanded(loose_factor),
            children: [NO_CHILD; 8],
            objects: Vec::new(),
        }
    }

    /// Depth of this node (root = 0).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Tight grid-cell bound.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Loosened bound used for placement and traversal pruning.
    pub fn loose_bounds(&self) -> &Aabb {
        &self.loose_bounds
    }

    /// Drawables stored at this node's level.
    pub fn objects(&self) -> &[DrawableKey] {
        &self.objects
    }

    /// Arena index of the child in `octant` (0-7), if it exists.
    pub fn child(&self, octant: u8) -> Option<u32> {
        let index = self.children[octant as usize];
        (index != NO_CHILD).then_some(index)
    }
}

// ===== OCTREE =====

/// Loose octree over drawable keys.
///
/// Constructed from a world bound; the depth is derived by halving the
/// world cell until the minimum cell size (or the depth cap) is hit.
pub struct Octree {
    /// Flat arena of nodes; index 0 is the root
    nodes: Vec<OctreeNode>,
    max_depth: u32,
    loose_factor: f32,
    /// Reverse lookup: drawable key → (node index, last placed AABB).
    /// Needed for O(1) remove without tree traversal.
    locations: FxHashMap<DrawableKey, (u32, Aabb)>,
}

impl Octree {
    /// Create an octree with default tuning and the given cell floor.
    pub fn new(world_bounds: Aabb, min_cell_size: f32) -> Result<Self> {
        Self::with_config(
            world_bounds,
            OctreeConfig {
                min_cell_size,
                ..OctreeConfig::default()
            },
        )
    }

    /// Create an octree with explicit tuning.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBounds` when `world_bounds` is empty or
    /// non-finite, and `Error::InvalidConfig` when the loose factor or
    /// minimum cell size is out of range.
    pub fn with_config(world_bounds: Aabb, config: OctreeConfig) -> Result<Self> {
        if world_bounds.is_empty() || !world_bounds.is_finite() {
            return Err(Self::log_and_return_error(Error::InvalidBounds(format!(
                "octree world bounds must be finite and non-empty, got {:?}",
                world_bounds
            ))));
        }
        if !(config.loose_factor.is_finite() && config.loose_factor >= 1.0) {
            return Err(Self::log_and_return_error(Error::InvalidConfig(format!(
                "loose factor must be >= 1, got {}",
                config.loose_factor
            ))));
        }
        if !(config.min_cell_size.is_finite() && config.min_cell_size > 0.0) {
            return Err(Self::log_and_return_error(Error::InvalidConfig(format!(
                "minimum cell size must be positive, got {}",
                config.min_cell_size
            ))));
        }

        // Depth at which a further split would violate the cell floor
        let mut max_depth = 0;
        let mut cell_side = world_bounds.size().min_element();
        while max_depth < config.max_depth && cell_side * 0.5 >= config.min_cell_size {
            cell_side *= 0.5;
            max_depth += 1;
        }

        let mut nodes = Vec::with_capacity(64);
        nodes.push(OctreeNode::new(0, world_bounds, config.loose_factor));

        crate::scene_debug!(
            "vista3d::Octree",
            "Created octree: bounds {:?} to {:?}, max depth {}, loose factor {}",
            world_bounds.min,
            world_bounds.max,
            max_depth,
            config.loose_factor
        );

        Ok(Self {
            nodes,
            max_depth,
            loose_factor: config.loose_factor,
            locations: FxHashMap::default(),
        })
    }

    /// Helper to log errors before returning them (internal use)
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InvalidBounds(msg) => {
                crate::scene_error!("vista3d::Octree", "Invalid bounds: {}", msg);
            }
            Error::InvalidConfig(msg) => {
                crate::scene_error!("vista3d::Octree", "Invalid configuration: {}", msg);
            }
        }
        error
    }

    // ===== GETTERS =====

    /// World bound covered by the root cell.
    pub fn world_bounds(&self) -> &Aabb {
        &self.nodes[ROOT as usize].bounds
    }

    /// Maximum depth derived at construction (root = 0).
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Loose expansion factor.
    pub fn loose_factor(&self) -> f32 {
        self.loose_factor
    }

    /// Number of nodes allocated so far.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of drawables currently placed.
    pub fn object_count(&self) -> usize {
        self.locations.len()
    }

    /// The root node.
    pub fn root(&self) -> &OctreeNode {
        &self.nodes[ROOT as usize]
    }

    /// Node by arena index (`ROOT` or an index from `OctreeNode::child`).
    pub fn node(&self, index: u32) -> &OctreeNode {
        &self.nodes[index as usize]
    }

    /// Arena index of the node holding `key`, if placed.
    pub fn location(&self, key: DrawableKey) -> Option<u32> {
        self.locations.get(&key).map(|&(node_index, _)| node_index)
    }

    // ===== PLACEMENT =====

    /// Insert or move a drawable.
    ///
    /// The drawable lands in the shallowest node whose loose bound
    /// fully contains `world_aabb`. The octant to descend into is
    /// picked by the bound's center; descent stops when the chosen
    /// child's loose bound no longer contains the whole bound or the
    /// depth cap is reached. Empty bounds and bounds outside the
    /// root's loose bound fall back to the root list.
    pub fn place(&mut self, key: DrawableKey, world_aabb: &Aabb) {
        if let Some(&(_, stored)) = self.locations.get(&key) {
            if stored == *world_aabb {
                return;
            }
        }
        self.remove(key);

        let mut node_index = ROOT;
        if !world_aabb.is_empty()
            && self.nodes[ROOT as usize].loose_bounds.contains(world_aabb)
        {
            loop {
                let node = &self.nodes[node_index as usize];
                if node.level >= self.max_depth {
                    break;
                }

                let octant = Self::point_octant(&node.bounds.center(), &world_aabb.center());

                // Test the would-be child's loose bound before creating it,
                // so a failed descent allocates nothing
                let child_bounds = Self::octant_bounds(&node.bounds, octant);
                if !child_bounds.expanded(self.loose_factor).contains(world_aabb) {
                    break;
                }

                node_index = self.ensure_child(node_index, octant);
            }
        }

        self.nodes[node_index as usize].objects.push(key);
        self.locations.insert(key, (node_index, *world_aabb));
    }

    /// Remove a drawable. Returns `true` if it was placed.
    pub fn remove(&mut self, key: DrawableKey) -> bool {
        if let Some((node_index, _)) = self.locations.remove(&key) {
            let objects = &mut self.nodes[node_index as usize].objects;
            if let Some(position) = objects.iter().position(|&k| k == key) {
                objects.swap_remove(position);
            }
            true
        } else {
            false
        }
    }

    /// Forget all placed drawables; the node structure is kept.
    pub fn clear(&mut self) {
        for node in &mut self.nodes {
            node.objects.clear();
        }
        self.locations.clear();
    }

    // ===== INTERNALS =====

    /// Child arena index for `octant`, creating the node on first use.
    fn ensure_child(&mut self, node_index: u32, octant: u8) -> u32 {
        let existing = self.nodes[node_index as usize].children[octant as usize];
        if existing != NO_CHILD {
            return existing;
        }

        let level = self.nodes[node_index as usize].level + 1;
        let bounds = Self::octant_bounds(&self.nodes[node_index as usize].bounds, octant);
        let child_index = self.nodes.len() as u32;
        self.nodes.push(OctreeNode::new(level, bounds, self.loose_factor));
        self.nodes[node_index as usize].children[octant as usize] = child_index;
        child_index
    }

    /// Tight bound of a specific octant (0-7).
    ///
    /// Octant bit layout: bit0 = X, bit1 = Y, bit2 = Z.
    /// 0 = low, 1 = high for each axis.
    fn octant_bounds(parent: &Aabb, octant: u8) -> Aabb {
        let center = parent.center();
        Aabb {
            min: Vec3::new(
                if octant & 1 == 0 { parent.min.x } else { center.x },
                if octant & 2 == 0 { parent.min.y } else { center.y },
                if octant & 4 == 0 { parent.min.z } else { center.z },
            ),
            max: Vec3::new(
                if octant & 1 == 0 { center.x } else { parent.max.x },
                if octant & 2 == 0 { center.y } else { parent.max.y },
                if octant & 4 == 0 { center.z } else { parent.max.z },
            ),
        }
    }

    /// Octant of `point` relative to `center`.
    ///
    /// Bit layout: bit0 = X, bit1 = Y, bit2 = Z (0 = low, 1 = high).
    fn point_octant(center: &Vec3, point: &Vec3) -> u8 {
        ((point.x >= center.x) as u8)
            | (((point.y >= center.y) as u8) << 1)
            | (((point.z >= center.z) as u8) << 2)
    }
}
