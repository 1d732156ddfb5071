#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, encoding/decoding failures
/// and malformed log lines.
pub mod error;

/// Append-or-create line logs.
///
/// Every append is a single, complete write of one line; see [`log_file::append_line`].
pub mod log_file;

/// Text encoding of pose and intrinsics matrices, one matrix per line.
pub mod matrix_log;

/// PNG image encoding and decoding.
pub mod png;

pub use crate::error::IoError;
