use fast_image_resize as fr;
use serde::{Deserialize, Serialize};

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Catmull-Rom bicubic convolution
    Bicubic,
    /// Lanczos windowed sinc with three lobes
    #[default]
    Lanczos3,
}

impl InterpolationMode {
    /// Map the mode onto the resampling algorithm of [fast_image_resize](https://crates.io/crates/fast_image_resize).
    pub(crate) fn resize_alg(self) -> fr::ResizeAlg {
        match self {
            InterpolationMode::Nearest => fr::ResizeAlg::Nearest,
            InterpolationMode::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            InterpolationMode::Bicubic => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            InterpolationMode::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterpolationMode;

    #[test]
    fn default_is_high_quality() {
        assert_eq!(InterpolationMode::default(), InterpolationMode::Lanczos3);
    }

    #[test]
    fn deserialize_snake_case() {
        let mode: InterpolationMode = serde_json::from_str("\"bilinear\"").unwrap();
        assert_eq!(mode, InterpolationMode::Bilinear);
    }
}
