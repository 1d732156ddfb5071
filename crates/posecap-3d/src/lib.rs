#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Pinhole camera model and screen-space ray construction.
pub mod camera;

/// Error types for the 3d module.
pub mod error;

/// Spatial query capability and hit-test result types.
pub mod query;

/// Rays and their intersection with horizontal planes.
pub mod ray;

/// Prioritized fallback chain resolving a world position for a screen point.
pub mod resolver;

/// Geometric spatial query source built from planes and feature points.
pub mod scene;

pub use crate::error::{GeometryError, ResolveError};
