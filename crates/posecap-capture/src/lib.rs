#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Capture configuration loaded from JSON.
pub mod config;

/// Error types for the capture module.
pub mod error;

/// Captured frames and frame sources.
pub mod frame;

/// On-disk layout of a capture session.
pub mod layout;

/// Capture manager owning the session lifecycle.
pub mod manager;

/// Single-writer, FIFO append logs.
pub mod ordered_log;

/// Image scale factors and the matching intrinsics adjustment.
pub mod scale;

/// A capture session: identity, frame counter and writer.
pub mod session;

/// Asynchronous persistence of captured frames.
pub mod writer;

pub use crate::config::CaptureConfig;
pub use crate::error::{CaptureError, FrameWriteError};
pub use crate::frame::{Frame, FrameSource};
pub use crate::layout::{SessionId, SessionLayout};
pub use crate::manager::CaptureManager;
pub use crate::scale::{IntrinsicsScaler, ScaleFactors};
pub use crate::session::CaptureSession;
pub use crate::writer::{FrameWriter, PendingWrites, WriteReport};
