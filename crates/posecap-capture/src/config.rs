use std::path::{Path, PathBuf};

use posecap_imgproc::interpolation::InterpolationMode;
use serde::{Deserialize, Serialize};

use crate::{error::CaptureError, scale::ScaleFactors};

/// Configuration of a [`CaptureManager`](crate::manager::CaptureManager).
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```json
/// {
///   "root": "/data/captures",
///   "scale": { "width": 0.5, "height": 0.5 },
///   "interpolation": "bilinear",
///   "clear_root_on_start": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory holding one subdirectory per session.
    pub root: PathBuf,
    /// Scale applied to stored images and their intrinsics.
    pub scale: ScaleFactors,
    /// Resampling filter used when the scale is not unit.
    pub interpolation: InterpolationMode,
    /// Delete everything under `root` when the manager starts.
    pub clear_root_on_start: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("captures"),
            scale: ScaleFactors::default(),
            interpolation: InterpolationMode::default(),
            clear_root_on_start: false,
        }
    }
}

impl CaptureConfig {
    /// Default configuration storing sessions under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Set the image scale factors.
    pub fn with_scale(mut self, scale: ScaleFactors) -> Self {
        self.scale = scale;
        self
    }

    /// Set the resampling filter.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set whether the storage root is emptied on start.
    pub fn with_clear_root_on_start(mut self, clear: bool) -> Self {
        self.clear_root_on_start = clear;
        self
    }

    /// Load the configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
