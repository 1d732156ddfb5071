use std::{
    path::Path,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Condvar, Mutex, PoisonError,
    },
    thread::JoinHandle,
};

use posecap_image::Image;
use posecap_imgproc::interpolation::InterpolationMode;
use posecap_io::matrix_log::{encode_mat3_line, encode_mat4_line};

use crate::{
    error::{CaptureError, FrameWriteError},
    frame::Frame,
    layout::{SessionId, SessionLayout},
    ordered_log::OrderedLog,
    scale::{IntrinsicsScaler, ScaleFactors},
};

/// Success and failure counts of one kind of write.
#[derive(Debug, Default)]
pub struct WriteCounters {
    written: AtomicU64,
    failed: AtomicU64,
}

impl WriteCounters {
    /// Number of completed writes.
    pub fn written(&self) -> u64 {
        self.written.load(Ordering::Acquire)
    }

    /// Number of dropped writes.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Acquire)
    }

    pub(crate) fn record_written(&self) {
        self.written.fetch_add(1, Ordering::AcqRel);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::AcqRel);
    }
}

#[derive(Debug, Clone, Default)]
struct WriteStats {
    images: Arc<WriteCounters>,
    poses: Arc<WriteCounters>,
    intrinsics: Arc<WriteCounters>,
}

/// Outcome of the writes of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Frames handed to the writer.
    pub frames: u64,
    /// Images stored.
    pub images_written: u64,
    /// Images dropped after a resample, encoding or storage failure.
    pub images_failed: u64,
    /// Pose lines appended.
    pub poses_written: u64,
    /// Pose lines dropped.
    pub poses_failed: u64,
    /// Intrinsics lines appended.
    pub intrinsics_written: u64,
    /// Intrinsics lines dropped.
    pub intrinsics_failed: u64,
}

impl WriteReport {
    /// Whether every component of every frame reached storage.
    pub fn is_complete(&self) -> bool {
        self.images_written == self.frames
            && self.poses_written == self.frames
            && self.intrinsics_written == self.frames
    }

    fn snapshot(frames: u64, stats: &WriteStats) -> Self {
        Self {
            frames,
            images_written: stats.images.written(),
            images_failed: stats.images.failed(),
            poses_written: stats.poses.written(),
            poses_failed: stats.poses.failed(),
            intrinsics_written: stats.intrinsics.written(),
            intrinsics_failed: stats.intrinsics.failed(),
        }
    }
}

// number of image writes still running on the pool
#[derive(Debug, Default)]
struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    fn begin(self: &Arc<Self>) -> InFlightGuard {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        InFlightGuard(Arc::clone(self))
    }

    fn is_idle(&self) -> bool {
        *self.count.lock().unwrap_or_else(PoisonError::into_inner) == 0
    }

    fn wait_idle(&self) {
        let count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        let _count = self
            .idle
            .wait_while(count, |count| *count > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut count = self.0.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count -= 1;
        if *count == 0 {
            self.0.idle.notify_all();
        }
    }
}

/// Persists the frames of one session without blocking the capture thread.
///
/// Each frame is split into three independent writes:
///
/// * the image, resampled and encoded as PNG on the rayon thread pool, stored at
///   [`SessionLayout::image_path`],
/// * the pose, appended to the pose log,
/// * the scaled camera matrix, appended to the intrinsics log.
///
/// Log lines appear in the order frames were handed to [`FrameWriter::write`]. A failure of
/// one write is logged and counted, and affects neither the other writes of the same frame
/// nor later frames.
pub struct FrameWriter {
    layout: Arc<SessionLayout>,
    scaler: IntrinsicsScaler,
    interpolation: InterpolationMode,
    poses: OrderedLog,
    intrinsics: OrderedLog,
    in_flight: Arc<InFlight>,
    stats: WriteStats,
    frames: u64,
}

impl FrameWriter {
    /// Creates a writer for the session stored at `layout`.
    ///
    /// The session directories are expected to exist.
    pub fn new(
        layout: Arc<SessionLayout>,
        scale: ScaleFactors,
        interpolation: InterpolationMode,
    ) -> Result<Self, CaptureError> {
        let stats = WriteStats::default();
        let poses = OrderedLog::spawn(layout.poses_log(), stats.poses.clone())?;
        let intrinsics = OrderedLog::spawn(layout.intrinsics_log(), stats.intrinsics.clone())?;

        Ok(Self {
            layout,
            scaler: IntrinsicsScaler::new(scale),
            interpolation,
            poses,
            intrinsics,
            in_flight: Arc::default(),
            stats,
            frames: 0,
        })
    }

    /// The layout the writer stores into.
    pub fn layout(&self) -> &SessionLayout {
        &self.layout
    }

    /// Dispatch the writes of frame `sequence` and return immediately.
    pub fn write(&mut self, sequence: u64, frame: Frame) {
        let Frame {
            image,
            pose,
            intrinsics,
        } = frame;
        self.frames += 1;

        self.poses.push(sequence, encode_mat4_line(&pose));
        self.intrinsics.push(
            sequence,
            encode_mat3_line(self.scaler.scale(&intrinsics).matrix()),
        );

        let guard = self.in_flight.begin();
        let path = self.layout.image_path(sequence);
        let counters = self.stats.images.clone();
        let scale = self.scaler.factors();
        let interpolation = self.interpolation;

        rayon::spawn(move || {
            let _guard = guard;
            match write_image(&path, &image, scale, interpolation) {
                Ok(()) => {
                    counters.record_written();
                    log::trace!("stored {}", path.display());
                }
                Err(e) => {
                    counters.record_failed();
                    log::error!("dropped image of frame {sequence}: {e}");
                }
            }
        });
    }

    /// A snapshot of the writes completed so far.
    pub fn report(&self) -> WriteReport {
        WriteReport::snapshot(self.frames, &self.stats)
    }

    /// Stop accepting frames. Writes already dispatched keep running.
    pub fn close(self) -> PendingWrites {
        PendingWrites {
            session_id: self.layout.id(),
            frames: self.frames,
            logs: vec![self.poses.close(), self.intrinsics.close()],
            in_flight: self.in_flight,
            stats: self.stats,
        }
    }
}

/// The writes of a closed session that may still be running.
pub struct PendingWrites {
    session_id: SessionId,
    frames: u64,
    logs: Vec<JoinHandle<()>>,
    in_flight: Arc<InFlight>,
    stats: WriteStats,
}

impl PendingWrites {
    /// The session the writes belong to.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Whether every dispatched write has completed or failed, so [`PendingWrites::wait`]
    /// returns without blocking.
    pub fn is_finished(&self) -> bool {
        self.logs.iter().all(|handle| handle.is_finished()) && self.in_flight.is_idle()
    }

    /// Block until every dispatched write has completed or failed.
    pub fn wait(self) -> WriteReport {
        for handle in self.logs {
            if handle.join().is_err() {
                log::error!("log writer of session {} panicked", self.session_id);
            }
        }
        self.in_flight.wait_idle();

        let report = WriteReport::snapshot(self.frames, &self.stats);
        if !report.is_complete() {
            log::warn!("session {} finished with dropped writes: {report:?}", self.session_id);
        }
        report
    }
}

fn write_image(
    path: &Path,
    image: &Image<u8, 3>,
    scale: ScaleFactors,
    interpolation: InterpolationMode,
) -> Result<(), FrameWriteError> {
    let encoded = if scale.is_unit() {
        posecap_io::png::encode_image_png_rgb8(image)
    } else {
        let resized = posecap_imgproc::resize::resize_scaled(
            image,
            scale.width(),
            scale.height(),
            interpolation,
        )?;
        posecap_io::png::encode_image_png_rgb8(&resized)
    }
    .map_err(FrameWriteError::Encoding)?;

    std::fs::write(path, encoded).map_err(|e| FrameWriteError::Write(e.into()))?;

    Ok(())
}
