use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CaptureError;

/// Directory holding the images of a session.
pub const IMAGES_DIR: &str = "images";

/// Directory holding the pose log of a session.
pub const POSES_DIR: &str = "poses";

/// Directory holding the intrinsics log of a session.
pub const INTRINSICS_DIR: &str = "intrinsics";

/// File name of the pose log.
pub const POSES_LOG: &str = "poses.txt";

/// File name of the intrinsics log.
pub const INTRINSICS_LOG: &str = "intrinsics.txt";

/// Identifier of a capture session, also the name of its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The on-disk layout of one session:
///
/// ```text
/// <root>/<session id>/
///     images/frame_<n>.png
///     poses/poses.txt
///     intrinsics/intrinsics.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLayout {
    id: SessionId,
    root: PathBuf,
}

impl SessionLayout {
    /// Layout of session `id` under the storage root.
    pub fn new(storage_root: impl AsRef<Path>, id: SessionId) -> Self {
        Self {
            id,
            root: storage_root.as_ref().join(id.to_string()),
        }
    }

    /// The session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The session directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the stored images.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    /// Directory of the pose log.
    pub fn poses_dir(&self) -> PathBuf {
        self.root.join(POSES_DIR)
    }

    /// Directory of the intrinsics log.
    pub fn intrinsics_dir(&self) -> PathBuf {
        self.root.join(INTRINSICS_DIR)
    }

    /// Path of the image of frame `sequence`.
    pub fn image_path(&self, sequence: u64) -> PathBuf {
        self.images_dir().join(format!("frame_{sequence}.png"))
    }

    /// Path of the pose log.
    pub fn poses_log(&self) -> PathBuf {
        self.poses_dir().join(POSES_LOG)
    }

    /// Path of the intrinsics log.
    pub fn intrinsics_log(&self) -> PathBuf {
        self.intrinsics_dir().join(INTRINSICS_LOG)
    }

    /// Create the session directory and its subdirectories.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::SessionExists`] if the session directory is already present,
    /// so two sessions never share storage.
    pub fn create(&self) -> Result<(), CaptureError> {
        if self.root.exists() {
            return Err(CaptureError::SessionExists(self.root.clone()));
        }
        if let Some(parent) = self.root.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir(&self.root)?;
        for dir in [self.images_dir(), self.poses_dir(), self.intrinsics_dir()] {
            std::fs::create_dir(dir)?;
        }
        Ok(())
    }
}
