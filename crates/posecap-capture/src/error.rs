use posecap_image::ImageError;
use posecap_io::IoError;

/// An error type for the capture module.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    /// Error to create or inspect the storage directories.
    #[error("Failed to manipulate the storage. {0}")]
    Io(#[from] std::io::Error),

    /// The scale factors are not positive finite numbers.
    #[error("Invalid scale factors ({0}, {1}), expected positive finite values")]
    InvalidScaleFactors(f32, f32),

    /// A frame was recorded before any session was started.
    #[error("No active capture session")]
    NoActiveSession,

    /// The directory of a new session is already taken.
    #[error("Session directory already exists: {0}")]
    SessionExists(std::path::PathBuf),

    /// Error to parse the configuration.
    #[error("Failed to parse the configuration. {0}")]
    Config(#[from] serde_json::Error),
}

/// A failure while persisting one part of a frame.
///
/// These errors never reach the capture thread; they are logged and counted in the
/// session's [`WriteReport`](crate::writer::WriteReport).
#[derive(thiserror::Error, Debug)]
pub enum FrameWriteError {
    /// The image could not be resampled to the output resolution.
    #[error("Failed to resample the image. {0}")]
    Resample(#[from] ImageError),

    /// The image could not be encoded.
    #[error("Failed to encode the image. {0}")]
    Encoding(#[source] IoError),

    /// The encoded data could not be written to storage.
    #[error("Failed to write to storage. {0}")]
    Write(#[source] IoError),
}
