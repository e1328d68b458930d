//! Math module
//!
//! Provides the spatial primitives consumed by the culling and
//! raycasting systems: axis-aligned bounding boxes and rays with
//! precomputed intersection state.

mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;
