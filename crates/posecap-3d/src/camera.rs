use glam::{Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{error::GeometryError, ray::Ray};

/// A 3x3 pinhole camera matrix.
///
/// The matrix is stored column-major:
///
/// ```text
/// | fx  s  cx |
/// | 0   fy cy |
/// | 0   0  1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics(pub Mat3);

impl CameraIntrinsics {
    /// Creates the camera matrix from focal lengths and principal point, with zero skew.
    ///
    /// # Example
    ///
    /// ```
    /// use posecap_3d::camera::CameraIntrinsics;
    ///
    /// let k = CameraIntrinsics::new(1000.0, 1000.0, 640.0, 360.0);
    /// assert_eq!(k.fx(), 1000.0);
    /// assert_eq!(k.cy(), 360.0);
    /// ```
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self(Mat3::from_cols(
            Vec3::new(fx, 0.0, 0.0),
            Vec3::new(0.0, fy, 0.0),
            Vec3::new(cx, cy, 1.0),
        ))
    }

    /// The underlying 3x3 matrix.
    #[inline]
    pub fn matrix(&self) -> &Mat3 {
        &self.0
    }

    /// Focal length along x in pixels.
    #[inline]
    pub fn fx(&self) -> f32 {
        self.0.x_axis.x
    }

    /// Focal length along y in pixels.
    #[inline]
    pub fn fy(&self) -> f32 {
        self.0.y_axis.y
    }

    /// Principal point x coordinate in pixels.
    #[inline]
    pub fn cx(&self) -> f32 {
        self.0.z_axis.x
    }

    /// Principal point y coordinate in pixels.
    #[inline]
    pub fn cy(&self) -> f32 {
        self.0.z_axis.y
    }

    /// Skew term coupling the y axis into image x.
    #[inline]
    pub fn skew(&self) -> f32 {
        self.0.y_axis.x
    }

    /// Returns the matrix describing the same camera for an image resampled by `(sx, sy)`.
    ///
    /// The first row (fx, skew, cx) follows the width scale and the second row (fy, cy) the
    /// height scale.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        let mut m = self.0;
        m.x_axis.x *= sx;
        m.y_axis.x *= sx;
        m.z_axis.x *= sx;
        m.y_axis.y *= sy;
        m.z_axis.y *= sy;
        Self(m)
    }
}

/// The tracked camera of the current frame.
///
/// The camera follows the ARKit convention: it looks down its local -Z axis with +Y up.
/// Screen points are pixel coordinates with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Camera-to-world rigid transform.
    pub transform: Mat4,
    /// Pinhole intrinsics of the captured image.
    pub intrinsics: CameraIntrinsics,
}

impl Camera {
    /// Creates a camera from its pose and intrinsics.
    pub fn new(transform: Mat4, intrinsics: CameraIntrinsics) -> Self {
        Self {
            transform,
            intrinsics,
        }
    }

    /// Position of the camera center in world coordinates.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    /// Build the world-space ray leaving the camera center through `screen_point`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidFocalLength`] if the intrinsics cannot be inverted.
    pub fn ray_through(&self, screen_point: Vec2) -> Result<Ray, GeometryError> {
        let (fx, fy) = (self.intrinsics.fx(), self.intrinsics.fy());
        if fx == 0.0 || fy == 0.0 || !fx.is_finite() || !fy.is_finite() {
            return Err(GeometryError::InvalidFocalLength(fx, fy));
        }

        // normalized image coordinates: +x right, +y down, +z forward
        let xy1 = self.intrinsics.matrix().inverse() * screen_point.extend(1.0);

        // flip into the camera frame: +y up, looking down -z
        let direction = Vec3::new(xy1.x, -xy1.y, -1.0);

        Ray::new(self.position(), self.transform.transform_vector3(direction))
    }

    /// Project a world point onto the image plane.
    ///
    /// Returns `None` for points on or behind the camera plane.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let p = self.transform.inverse().transform_point3(point);
        if p.z >= 0.0 {
            return None;
        }
        let depth = -p.z;
        let uv = *self.intrinsics.matrix() * Vec3::new(p.x / depth, -p.y / depth, 1.0);
        Some(uv.truncate())
    }
}
