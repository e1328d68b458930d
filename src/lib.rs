/*!
# Vista 3D Scene

Spatial query core for a real-time 3D scene.

This crate provides the CPU-side structures a renderer consults every frame:
bounding volumes, rays with precomputed intersection state, a lazily updated
view frustum, a loose octree over the scene's drawables, and the visitors
that walk it (frustum culling into sortable render queues, ray picking).

## Architecture

- **Aabb / Ray**: math primitives; the ray caches slope-test state at
  construction so per-box tests stay branch-light
- **Camera / Frustum**: view and projection matrices with plane and corner
  extraction deferred until a query needs them
- **Scene / Octree**: slotmap-keyed drawable storage with an optional loose
  octree index kept in sync on every transform or bounds change
- **CullVisitor / RaycastVisitor**: traversals that prune whole octree
  subtrees before ever looking at individual drawables

Matrix conventions follow `glam`: right-handed view space, 0..1 NDC depth.
*/

// Internal modules
mod error;
pub mod log;
pub mod math;
pub mod camera;
pub mod scene;

// Main vista3d namespace module
pub mod vista3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
        // Note: scene_* macros are NOT re-exported here - they are internal only
    }

    // Math sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
