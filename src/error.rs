//! Error types for the Vista3D scene library
//!
//! This module defines the error types used throughout the library.
//! Errors are only produced at construction time (octree and scene
//! setup); per-frame queries and traversals are infallible.

use std::fmt;

/// Result type for Vista3D scene operations
pub type Result<T> = std::result::Result<T, Error>;

/// Vista3D scene errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid bounds (empty or non-finite AABB)
    InvalidBounds(String),

    /// Invalid configuration value (cell size, loose factor, depth)
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
