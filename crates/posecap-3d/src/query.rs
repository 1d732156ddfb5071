use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Identifier of a tracked planar surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// A hit against a tracked planar surface, within its known extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    /// World position of the hit.
    pub position: Vec3,
    /// The surface that was hit.
    pub surface_id: SurfaceId,
    /// Distance from the camera to the hit.
    pub distance: f32,
}

/// A hit against the dense feature point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureHit {
    /// World position of the hit, on the query ray.
    pub position: Vec3,
    /// The feature point backing the hit.
    pub feature: Vec3,
    /// Distance from the ray origin to `position`.
    pub distance_to_origin: f32,
    /// Distance from `feature` to the ray.
    pub distance_to_ray: f32,
}

/// Acceptance cone and distance band for feature hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureFilter {
    /// Full opening angle of the acceptance cone in degrees.
    pub cone_angle_deg: f32,
    /// Minimum accepted distance along the ray.
    pub min_distance: f32,
    /// Maximum accepted distance along the ray.
    pub max_distance: f32,
}

impl FeatureFilter {
    /// The narrow filter used for high-quality feature hits: 18°, 0.2 to 2.0 units.
    pub const HIGH_QUALITY: FeatureFilter = FeatureFilter {
        cone_angle_deg: 18.0,
        min_distance: 0.2,
        max_distance: 2.0,
    };
}

impl Default for FeatureFilter {
    fn default() -> Self {
        Self::HIGH_QUALITY
    }
}

/// Spatial queries answered by the tracking backend for the current frame.
///
/// Implementations may be a live sensor session, a recorded scene or a test fake.
pub trait SpatialQuery {
    /// The camera of the current frame, or `None` if no frame is available.
    fn camera(&self) -> Option<Camera>;

    /// Hit test the tracked planar surfaces, restricted to their extents.
    ///
    /// Results are ordered nearest first.
    fn hit_test_planes(&self, screen_point: Vec2) -> Vec<PlaneHit>;

    /// Hit test the feature point cloud.
    ///
    /// With a filter, only features inside the acceptance cone and distance band are reported.
    /// Without one, the best effort result is reported. Results are ordered best first.
    fn hit_test_features(&self, screen_point: Vec2, filter: Option<FeatureFilter>)
        -> Vec<FeatureHit>;
}

impl<Q: SpatialQuery + ?Sized> SpatialQuery for &Q {
    fn camera(&self) -> Option<Camera> {
        (**self).camera()
    }

    fn hit_test_planes(&self, screen_point: Vec2) -> Vec<PlaneHit> {
        (**self).hit_test_planes(screen_point)
    }

    fn hit_test_features(
        &self,
        screen_point: Vec2,
        filter: Option<FeatureFilter>,
    ) -> Vec<FeatureHit> {
        (**self).hit_test_features(screen_point, filter)
    }
}

/// The outcome of resolving a screen point to a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpatialQueryResult {
    /// Hit a tracked planar surface.
    PlaneHit {
        /// World position of the hit.
        position: Vec3,
        /// The surface that was hit.
        surface_id: SurfaceId,
    },
    /// Hit the feature point cloud.
    FeatureHit {
        /// World position of the hit.
        position: Vec3,
        /// Whether the hit passed the narrow acceptance filter.
        high_quality: bool,
    },
    /// Hit the infinite horizontal plane through the caller's hint.
    InfinitePlaneHit {
        /// World position of the hit.
        position: Vec3,
    },
    /// Nothing was hit.
    NoHit,
}

impl SpatialQueryResult {
    /// The resolved world position, if any.
    pub fn position(&self) -> Option<Vec3> {
        match *self {
            SpatialQueryResult::PlaneHit { position, .. }
            | SpatialQueryResult::FeatureHit { position, .. }
            | SpatialQueryResult::InfinitePlaneHit { position } => Some(position),
            SpatialQueryResult::NoHit => None,
        }
    }

    /// The tracked surface that was hit, only set for plane hits.
    pub fn surface_id(&self) -> Option<SurfaceId> {
        match *self {
            SpatialQueryResult::PlaneHit { surface_id, .. } => Some(surface_id),
            _ => None,
        }
    }

    /// Whether the position lies on a surface usable for placement.
    ///
    /// True for tracked planes and for the infinite plane fallback.
    pub fn hit_known_surface(&self) -> bool {
        matches!(
            self,
            SpatialQueryResult::PlaneHit { .. } | SpatialQueryResult::InfinitePlaneHit { .. }
        )
    }

    /// Split into `(position, surface_id, hit_known_surface)`.
    pub fn into_parts(self) -> (Option<Vec3>, Option<SurfaceId>, bool) {
        (self.position(), self.surface_id(), self.hit_known_surface())
    }
}
