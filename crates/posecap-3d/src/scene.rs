use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    camera::Camera,
    query::{FeatureFilter, FeatureHit, PlaneHit, SpatialQuery, SurfaceId},
    ray::{intersect_horizontal_plane, HorizontalPlane, Ray},
};

/// A tracked horizontal plane bounded by a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneAnchor {
    /// Identifier of the surface.
    pub id: SurfaceId,
    /// Center of the rectangle in world coordinates.
    pub center: Vec3,
    /// Full size of the rectangle along world x and z.
    pub extent: Vec2,
}

impl PlaneAnchor {
    /// Whether a point of the anchor's plane lies inside its extent.
    pub fn contains(&self, point: Vec3) -> bool {
        let half = self.extent * 0.5;
        (point.x - self.center.x).abs() <= half.x && (point.z - self.center.z).abs() <= half.y
    }
}

/// A snapshot of the tracked scene: the current camera, plane anchors and feature points.
///
/// Answers [`SpatialQuery`] purely geometrically, which makes recorded or synthetic scenes
/// usable wherever a live tracking session is expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// The camera of the current frame.
    pub camera: Option<Camera>,
    /// Tracked horizontal planes.
    pub planes: Vec<PlaneAnchor>,
    /// Dense feature points in world coordinates.
    pub features: Vec<Vec3>,
}

impl SceneSnapshot {
    fn ray_through(&self, screen_point: Vec2) -> Option<Ray> {
        let camera = self.camera?;
        match camera.ray_through(screen_point) {
            Ok(ray) => Some(ray),
            Err(e) => {
                log::debug!("cannot build hit test ray: {e}");
                None
            }
        }
    }

    fn filtered_feature_hits(&self, ray: &Ray, filter: &FeatureFilter) -> Vec<FeatureHit> {
        let max_angle = (filter.cone_angle_deg.min(360.0) / 2.0).to_radians();
        let (origin, direction) = (ray.origin(), ray.direction());

        let mut hits = self
            .features
            .iter()
            .filter_map(|&feature| {
                let origin_to_feature = feature - origin;
                let position = origin + direction * direction.dot(origin_to_feature);
                let distance_to_origin = (position - origin).length();
                if distance_to_origin < filter.min_distance
                    || distance_to_origin > filter.max_distance
                {
                    return None;
                }

                let angle = direction
                    .dot(origin_to_feature.try_normalize()?)
                    .clamp(-1.0, 1.0)
                    .acos();
                if angle > max_angle {
                    return None;
                }

                Some(FeatureHit {
                    position,
                    feature,
                    distance_to_origin,
                    distance_to_ray: origin_to_feature.cross(direction).length(),
                })
            })
            .collect::<Vec<_>>();

        hits.sort_by(|a, b| a.distance_to_origin.total_cmp(&b.distance_to_origin));
        hits
    }

    fn closest_feature_hit(&self, ray: &Ray) -> Option<FeatureHit> {
        let (origin, direction) = (ray.origin(), ray.direction());

        self.features
            .iter()
            .filter(|&&feature| direction.dot(feature - origin) >= 0.0)
            .map(|&feature| {
                let origin_to_feature = feature - origin;
                let position = origin + direction * direction.dot(origin_to_feature);
                FeatureHit {
                    position,
                    feature,
                    distance_to_origin: (position - origin).length(),
                    distance_to_ray: origin_to_feature.cross(direction).length(),
                }
            })
            .min_by(|a, b| a.distance_to_ray.total_cmp(&b.distance_to_ray))
    }
}

impl SpatialQuery for SceneSnapshot {
    fn camera(&self) -> Option<Camera> {
        self.camera
    }

    fn hit_test_planes(&self, screen_point: Vec2) -> Vec<PlaneHit> {
        let Some(ray) = self.ray_through(screen_point) else {
            return Vec::new();
        };

        let mut hits = self
            .planes
            .iter()
            .filter_map(|plane| {
                let position =
                    intersect_horizontal_plane(&ray, &HorizontalPlane::through(plane.center))?;
                plane.contains(position).then(|| PlaneHit {
                    position,
                    surface_id: plane.id,
                    distance: (position - ray.origin()).length(),
                })
            })
            .collect::<Vec<_>>();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn hit_test_features(
        &self,
        screen_point: Vec2,
        filter: Option<FeatureFilter>,
    ) -> Vec<FeatureHit> {
        let Some(ray) = self.ray_through(screen_point) else {
            return Vec::new();
        };

        match filter {
            Some(filter) => self.filtered_feature_hits(&ray, &filter),
            None => self.closest_feature_hit(&ray).into_iter().collect(),
        }
    }
}
