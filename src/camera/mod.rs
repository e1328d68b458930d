//! Camera module
//!
//! The camera is a passive container: the caller derives view and
//! projection matrices and stores them here. The frustum tracks the
//! combined matrix and recomputes its planes and corners lazily.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::{
    ClipState, Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
    CORNER_LEFT_BOTTOM_NEAR, CORNER_RIGHT_BOTTOM_NEAR,
    CORNER_LEFT_TOP_NEAR, CORNER_RIGHT_TOP_NEAR,
    CORNER_LEFT_BOTTOM_FAR, CORNER_RIGHT_BOTTOM_FAR,
    CORNER_LEFT_TOP_FAR, CORNER_RIGHT_TOP_FAR,
};
