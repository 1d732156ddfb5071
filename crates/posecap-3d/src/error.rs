/// Errors raised while building geometric primitives.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GeometryError {
    /// The ray direction is zero or not finite and cannot be normalized.
    #[error("Degenerate ray direction {0:?}")]
    DegenerateDirection([f32; 3]),

    /// A focal length is zero or not finite.
    #[error("Invalid focal length ({0}, {1})")]
    InvalidFocalLength(f32, f32),
}

/// Errors raised by the screen-to-world resolver.
///
/// Finding nothing is not an error: it is reported as
/// [`SpatialQueryResult::NoHit`](crate::query::SpatialQueryResult::NoHit).
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ResolveError {
    /// No current frame or camera is available to run queries against.
    #[error("No current camera frame, cannot resolve now")]
    QueryUnavailable,
}
