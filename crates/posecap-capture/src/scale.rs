use posecap_3d::camera::CameraIntrinsics;
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Per-axis factors applied to captured images before they are stored.
///
/// Both factors are positive finite numbers; values above one upsample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScaleFactors")]
pub struct ScaleFactors {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawScaleFactors {
    #[serde(default = "unit")]
    width: f32,
    #[serde(default = "unit")]
    height: f32,
}

fn unit() -> f32 {
    1.0
}

impl TryFrom<RawScaleFactors> for ScaleFactors {
    type Error = CaptureError;

    fn try_from(raw: RawScaleFactors) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl ScaleFactors {
    /// Stores images at native resolution.
    pub const UNIT: ScaleFactors = ScaleFactors {
        width: 1.0,
        height: 1.0,
    };

    /// Creates scale factors for the width and the height.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidScaleFactors`] if a factor is not positive and finite.
    pub fn new(width: f32, height: f32) -> Result<Self, CaptureError> {
        let valid = |s: f32| s.is_finite() && s > 0.0;
        if !valid(width) || !valid(height) {
            return Err(CaptureError::InvalidScaleFactors(width, height));
        }
        Ok(Self { width, height })
    }

    /// Scale factor along the width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Scale factor along the height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Whether images are stored at native resolution.
    pub fn is_unit(&self) -> bool {
        *self == Self::UNIT
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Adjusts camera matrices to the resolution of the stored images.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntrinsicsScaler {
    factors: ScaleFactors,
}

impl IntrinsicsScaler {
    /// Creates a scaler for images resampled by `factors`.
    pub fn new(factors: ScaleFactors) -> Self {
        Self { factors }
    }

    /// The factors the scaler applies.
    pub fn factors(&self) -> ScaleFactors {
        self.factors
    }

    /// Returns the camera matrix matching an image resampled by the scaler's factors.
    ///
    /// `fx`, the skew and `cx` follow the width factor; `fy` and `cy` follow the height
    /// factor. The last row is untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use posecap_3d::camera::CameraIntrinsics;
    /// use posecap_capture::scale::{IntrinsicsScaler, ScaleFactors};
    ///
    /// let scaler = IntrinsicsScaler::new(ScaleFactors::new(0.5, 0.5).unwrap());
    /// let k = scaler.scale(&CameraIntrinsics::new(1000.0, 1000.0, 640.0, 360.0));
    /// assert_eq!(k.fx(), 500.0);
    /// assert_eq!(k.cy(), 180.0);
    /// ```
    pub fn scale(&self, intrinsics: &CameraIntrinsics) -> CameraIntrinsics {
        if self.factors.is_unit() {
            return *intrinsics;
        }
        intrinsics.scaled(self.factors.width, self.factors.height)
    }
}
