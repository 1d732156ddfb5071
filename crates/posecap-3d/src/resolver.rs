use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    camera::Camera,
    error::ResolveError,
    query::{FeatureFilter, SpatialQuery, SpatialQueryResult},
    ray::{intersect_horizontal_plane, HorizontalPlane},
};

/// Configuration of the [`FallbackResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Allow callers to request the infinite plane even when a good feature hit exists.
    pub drag_on_infinite_planes: bool,
    /// Acceptance filter for high-quality feature hits.
    pub feature_filter: FeatureFilter,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            drag_on_infinite_planes: false,
            feature_filter: FeatureFilter::HIGH_QUALITY,
        }
    }
}

/// Resolves a world position for a screen point through a prioritized chain of hit tests.
///
/// The chain, stopping at the first stage that produces a position:
///
/// 1. tracked planes within their extent,
/// 2. high-quality feature hit (recorded, not returned yet),
/// 3. the infinite horizontal plane through the object position hint, when requested and
///    enabled or when stage 2 found nothing,
/// 4. the high-quality feature hit from stage 2,
/// 5. an unfiltered feature hit.
#[derive(Debug, Clone, Default)]
pub struct FallbackResolver {
    config: ResolverConfig,
}

impl FallbackResolver {
    /// Creates a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The resolver configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the world position under `screen_point`.
    ///
    /// # Arguments
    ///
    /// * `scene` - The spatial query source of the current frame.
    /// * `screen_point` - The screen point in image pixels.
    /// * `object_position_hint` - The current position of the object being placed, if any.
    ///   Its height defines the infinite plane fallback.
    /// * `allow_infinite_plane` - Prefer the infinite plane over feature hits, if enabled in the
    ///   configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::QueryUnavailable`] if the scene has no current camera.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::{Mat4, Vec2, Vec3};
    /// use posecap_3d::camera::{Camera, CameraIntrinsics};
    /// use posecap_3d::query::SpatialQueryResult;
    /// use posecap_3d::resolver::FallbackResolver;
    /// use posecap_3d::scene::SceneSnapshot;
    ///
    /// let scene = SceneSnapshot {
    ///     camera: Some(Camera::new(
    ///         Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0)),
    ///         CameraIntrinsics::new(500.0, 500.0, 320.0, 240.0),
    ///     )),
    ///     ..Default::default()
    /// };
    ///
    /// let resolver = FallbackResolver::default();
    /// let result = resolver
    ///     .resolve(&scene, Vec2::new(320.0, 480.0), Some(Vec3::ZERO), false)
    ///     .unwrap();
    ///
    /// assert!(matches!(result, SpatialQueryResult::InfinitePlaneHit { .. }));
    /// assert!(result.hit_known_surface());
    /// ```
    pub fn resolve<Q: SpatialQuery + ?Sized>(
        &self,
        scene: &Q,
        screen_point: Vec2,
        object_position_hint: Option<Vec3>,
        allow_infinite_plane: bool,
    ) -> Result<SpatialQueryResult, ResolveError> {
        let Some(camera) = scene.camera() else {
            log::warn!("resolve called without a current camera frame");
            return Err(ResolveError::QueryUnavailable);
        };

        // 1. tracked planes are the most trustworthy answer
        if let Some(hit) = scene.hit_test_planes(screen_point).first() {
            return Ok(SpatialQueryResult::PlaneHit {
                position: hit.position,
                surface_id: hit.surface_id,
            });
        }

        // 2. look for a high-quality feature hit, keep it for later
        let feature_position = scene
            .hit_test_features(screen_point, Some(self.config.feature_filter))
            .first()
            .map(|hit| hit.position);

        // 3. infinite plane through the hint
        let wants_infinite_plane = allow_infinite_plane && self.config.drag_on_infinite_planes;
        if wants_infinite_plane || feature_position.is_none() {
            if let Some(position) = object_position_hint
                .and_then(|hint| infinite_plane_position(&camera, screen_point, hint))
            {
                return Ok(SpatialQueryResult::InfinitePlaneHit { position });
            }
        }

        // 4. the high-quality feature hit
        if let Some(position) = feature_position {
            return Ok(SpatialQueryResult::FeatureHit {
                position,
                high_quality: true,
            });
        }

        // 5. best effort, unfiltered
        if let Some(hit) = scene.hit_test_features(screen_point, None).first() {
            return Ok(SpatialQueryResult::FeatureHit {
                position: hit.position,
                high_quality: false,
            });
        }

        Ok(SpatialQueryResult::NoHit)
    }
}

fn infinite_plane_position(camera: &Camera, screen_point: Vec2, hint: Vec3) -> Option<Vec3> {
    let ray = match camera.ray_through(screen_point) {
        Ok(ray) => ray,
        Err(e) => {
            log::warn!("cannot build ray through {screen_point}: {e}");
            return None;
        }
    };
    intersect_horizontal_plane(&ray, &HorizontalPlane::through(hint))
}
