use std::{
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
};

use crate::{
    config::CaptureConfig,
    error::CaptureError,
    frame::{Frame, FrameSource},
    layout::SessionId,
    session::CaptureSession,
    writer::{PendingWrites, WriteReport},
};

/// Owns the capture session lifecycle under one storage root.
///
/// At most one session is active. Starting a new session closes the previous one, whose
/// dispatched writes keep running in the background into its own directory.
///
/// # Example
///
/// ```no_run
/// use glam::Mat4;
/// use posecap_3d::camera::CameraIntrinsics;
/// use posecap_capture::{CaptureConfig, CaptureManager, Frame};
/// use posecap_image::{Image, ImageSize};
///
/// let mut manager = CaptureManager::new(CaptureConfig::new("/tmp/captures")).unwrap();
/// manager.start_new_session().unwrap();
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 64, height: 48 }, 0).unwrap();
/// let frame = Frame::new(image, Mat4::IDENTITY, CameraIntrinsics::new(50.0, 50.0, 32.0, 24.0));
/// assert_eq!(manager.record_frame(frame).unwrap(), 0);
///
/// for (id, report) in manager.finish() {
///     println!("session {id}: {report:?}");
/// }
/// ```
pub struct CaptureManager {
    config: CaptureConfig,
    next_id: u64,
    active: Option<CaptureSession>,
    closing: Vec<PendingWrites>,
    finished: Vec<(SessionId, WriteReport)>,
}

impl CaptureManager {
    /// Prepare the storage root and return a manager without an active session.
    ///
    /// With `clear_root_on_start` the root is emptied. Otherwise session ids continue after
    /// the largest numeric directory name found under the root.
    pub fn new(config: CaptureConfig) -> Result<Self, CaptureError> {
        std::fs::create_dir_all(&config.root)?;
        if config.clear_root_on_start {
            clear_directory(&config.root)?;
        }
        let next_id = next_session_id(&config.root)?;
        log::debug!(
            "capture root {} ready, next session {next_id}",
            config.root.display()
        );

        Ok(Self {
            config,
            next_id,
            active: None,
            closing: Vec::new(),
            finished: Vec::new(),
        })
    }

    /// The manager configuration.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// The active session, if any.
    pub fn active_session(&self) -> Option<&CaptureSession> {
        self.active.as_ref()
    }

    /// Close the active session, if any, and start a new one with a fresh frame counter and
    /// a disjoint storage directory.
    pub fn start_new_session(&mut self) -> Result<SessionId, CaptureError> {
        if let Some(previous) = self.active.take() {
            self.closing.push(previous.close());
        }
        self.reap_finished();

        let id = SessionId(self.next_id);
        self.next_id += 1;

        let session = CaptureSession::create(
            &self.config.root,
            id,
            self.config.scale,
            self.config.interpolation,
        )?;
        self.active = Some(session);

        Ok(id)
    }

    /// Record a frame into the active session and return its sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NoActiveSession`] if no session was started.
    pub fn record_frame(&mut self, frame: Frame) -> Result<u64, CaptureError> {
        let session = self.active.as_mut().ok_or(CaptureError::NoActiveSession)?;
        Ok(session.record_frame(frame))
    }

    /// Record frames from `source` until it is exhausted or `cancel` is set.
    ///
    /// Returns the number of frames recorded by this call.
    pub fn record_from<S: FrameSource + ?Sized>(
        &mut self,
        source: &mut S,
        cancel: &AtomicBool,
    ) -> Result<u64, CaptureError> {
        let session = self.active.as_mut().ok_or(CaptureError::NoActiveSession)?;

        let mut recorded = 0;
        while !cancel.load(Ordering::SeqCst) {
            let Some(frame) = source.next_frame() else {
                break;
            };
            session.record_frame(frame);
            recorded += 1;
        }

        log::debug!("recorded {recorded} frames into session {}", session.id());
        Ok(recorded)
    }

    /// Release the writer resources of closed sessions whose writes are all done, keeping
    /// only their reports.
    ///
    /// Called on every [`CaptureManager::start_new_session`]. Returns the number of closed
    /// sessions still writing.
    pub fn reap_finished(&mut self) -> usize {
        let (done, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.closing)
            .into_iter()
            .partition(PendingWrites::is_finished);

        for pending in done {
            let id = pending.session_id();
            let report = pending.wait();
            log::debug!("session {id} writes done: {report:?}");
            self.finished.push((id, report));
        }
        self.closing = running;

        self.closing.len()
    }

    /// Close the active session and wait for the writes of every session started by this
    /// manager.
    ///
    /// Reports are returned in the order the sessions were started.
    pub fn finish(mut self) -> Vec<(SessionId, WriteReport)> {
        if let Some(active) = self.active.take() {
            self.closing.push(active.close());
        }

        let mut reports = self.finished;
        reports.extend(
            self.closing
                .into_iter()
                .map(|pending| (pending.session_id(), pending.wait())),
        );
        // ids grow with every started session
        reports.sort_by_key(|(id, _)| *id);
        reports
    }
}

fn clear_directory(dir: &Path) -> Result<(), CaptureError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
        log::info!("removed {}", path.display());
    }
    Ok(())
}

fn next_session_id(root: &Path) -> Result<u64, CaptureError> {
    let mut next = 0;
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(id) = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<u64>().ok())
        {
            next = next.max(id.saturating_add(1));
        }
    }
    Ok(next)
}
