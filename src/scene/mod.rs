//! Scene management module
//!
//! Provides the drawable container, its loose-octree spatial index, and the
//! traversal visitors (frustum culling into render queues, ray picking).

mod cull_visitor;
mod drawable;
mod octree;
mod raycast_visitor;
mod render_queue;
mod scene;

pub use cull_visitor::{CullStats, CullVisitor, PostCullHook};
pub use drawable::{Drawable, DrawableFlags, DrawableKey};
pub use octree::{Octree, OctreeConfig, OctreeNode};
pub use raycast_visitor::{RaycastHit, RaycastVisitor};
pub use render_queue::{QueueEntry, RenderPassType, RenderQueue, SortedRenderQueue};
pub use scene::Scene;
