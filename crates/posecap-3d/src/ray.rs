use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A half-line starting at `origin` and extending along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing the direction.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateDirection`] if the direction is zero or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use glam::Vec3;
    /// use posecap_3d::ray::Ray;
    ///
    /// let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -2.0, 0.0)).unwrap();
    /// assert_eq!(ray.direction(), Vec3::NEG_Y);
    /// ```
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        let direction = direction
            .try_normalize()
            .ok_or(GeometryError::DegenerateDirection(direction.to_array()))?;
        Ok(Self { origin, direction })
    }

    /// The start point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// The point at distance `t` along the ray.
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An infinite plane with normal (0, 1, 0) at height `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPlane {
    /// Height of the plane.
    pub y: f32,
}

impl HorizontalPlane {
    /// Create the horizontal plane passing through `point`.
    pub fn through(point: Vec3) -> Self {
        Self { y: point.y }
    }
}

/// Compute where a ray meets a horizontal plane.
///
/// A horizontal ray lying on the plane returns its origin as the representative point.
/// Intersections behind the ray origin are discarded.
///
/// # Arguments
///
/// * `ray` - The ray to intersect.
/// * `plane` - The horizontal plane.
///
/// # Returns
///
/// The intersection point, or `None` if the ray never reaches the plane.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use posecap_3d::ray::{intersect_horizontal_plane, HorizontalPlane, Ray};
///
/// let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y).unwrap();
/// let hit = intersect_horizontal_plane(&ray, &HorizontalPlane { y: 0.0 });
///
/// assert_eq!(hit, Some(Vec3::ZERO));
/// ```
pub fn intersect_horizontal_plane(ray: &Ray, plane: &HorizontalPlane) -> Option<Vec3> {
    let origin = ray.origin();
    let direction = ray.direction();

    if direction.y == 0.0 {
        return (origin.y == plane.y).then_some(origin);
    }

    // with the plane normal fixed to +Y the distance reduces to a single division
    let t = (plane.y - origin.y) / direction.y;
    if t < 0.0 {
        return None;
    }

    Some(ray.point_at(t))
}
