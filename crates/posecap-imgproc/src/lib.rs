#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// interpolation modes used when resampling images.
pub mod interpolation;

/// utility functions for resizing images.
pub mod resize;
