use std::{path::Path, sync::Arc};

use posecap_imgproc::interpolation::InterpolationMode;

use crate::{
    error::CaptureError,
    frame::Frame,
    layout::{SessionId, SessionLayout},
    scale::ScaleFactors,
    writer::{FrameWriter, PendingWrites, WriteReport},
};

/// One capture session: an identity, a frame counter and a writer into its own directory.
///
/// Sequence numbers start at zero and increase by one per recorded frame, in the order
/// [`CaptureSession::record_frame`] is called.
pub struct CaptureSession {
    id: SessionId,
    frame_counter: u64,
    writer: FrameWriter,
}

impl CaptureSession {
    /// Create the storage of session `id` under `storage_root` and start its writers.
    ///
    /// # Errors
    ///
    /// Fails if the session directory already exists or cannot be created.
    pub fn create(
        storage_root: impl AsRef<Path>,
        id: SessionId,
        scale: ScaleFactors,
        interpolation: InterpolationMode,
    ) -> Result<Self, CaptureError> {
        let layout = SessionLayout::new(storage_root, id);
        layout.create()?;
        log::info!("started capture session {id} in {}", layout.root().display());

        let writer = FrameWriter::new(Arc::new(layout), scale, interpolation)?;

        Ok(Self {
            id,
            frame_counter: 0,
            writer,
        })
    }

    /// The session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The on-disk layout of the session.
    pub fn layout(&self) -> &SessionLayout {
        self.writer.layout()
    }

    /// Number of frames recorded so far, also the sequence number of the next frame.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Assign the next sequence number to `frame` and hand it to the writer.
    ///
    /// Returns the assigned sequence number. Never blocks on storage.
    pub fn record_frame(&mut self, frame: Frame) -> u64 {
        let sequence = self.frame_counter;
        self.frame_counter += 1;
        self.writer.write(sequence, frame);
        sequence
    }

    /// A snapshot of the writes completed so far.
    pub fn report(&self) -> WriteReport {
        self.writer.report()
    }

    /// Stop recording. The returned handle waits for the writes still running.
    pub fn close(self) -> PendingWrites {
        log::info!(
            "closing capture session {} after {} frames",
            self.id,
            self.frame_counter
        );
        self.writer.close()
    }
}
