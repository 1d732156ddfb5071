use std::{
    path::PathBuf,
    sync::{mpsc, Arc},
    thread::JoinHandle,
};

use crate::{
    error::{CaptureError, FrameWriteError},
    writer::WriteCounters,
};

struct LogEntry {
    sequence: u64,
    line: String,
}

/// An append-only text log fed by a single writer thread.
///
/// Lines are appended in the order they are pushed, whatever the thread pushing them is
/// doing afterwards. Pushing never blocks on storage: failures are logged and counted, and
/// never reach the caller.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use posecap_capture::{ordered_log::OrderedLog, writer::WriteCounters};
///
/// let counters = Arc::new(WriteCounters::default());
/// let log = OrderedLog::spawn("poses.txt", counters.clone()).unwrap();
/// log.push(0, "first".to_string());
/// log.push(1, "second".to_string());
/// log.close().join().unwrap();
/// assert_eq!(counters.written(), 2);
/// ```
pub struct OrderedLog {
    path: PathBuf,
    sender: mpsc::Sender<LogEntry>,
    handle: JoinHandle<()>,
    counters: Arc<WriteCounters>,
}

impl OrderedLog {
    /// Start the writer thread of the log at `path`.
    ///
    /// The file is created on the first append.
    pub fn spawn(
        path: impl Into<PathBuf>,
        counters: Arc<WriteCounters>,
    ) -> Result<Self, CaptureError> {
        let path = path.into();
        let (sender, receiver) = mpsc::channel::<LogEntry>();

        let handle = std::thread::Builder::new()
            .name("posecap-log".to_string())
            .spawn({
                let path = path.clone();
                let counters = counters.clone();
                move || {
                    // drains every queued entry once all senders are gone
                    for entry in receiver {
                        match posecap_io::log_file::append_line(&path, &entry.line) {
                            Ok(()) => counters.record_written(),
                            Err(e) => {
                                counters.record_failed();
                                log::error!(
                                    "dropped entry of frame {} in {}: {}",
                                    entry.sequence,
                                    path.display(),
                                    FrameWriteError::Write(e)
                                );
                            }
                        }
                    }
                    log::debug!("log writer for {} finished", path.display());
                }
            })?;

        Ok(Self {
            path,
            sender,
            handle,
            counters,
        })
    }

    /// Queue the line of frame `sequence` for appending.
    pub fn push(&self, sequence: u64, line: String) {
        if self.sender.send(LogEntry { sequence, line }).is_err() {
            self.counters.record_failed();
            log::error!(
                "log writer for {} has stopped, dropped entry of frame {sequence}",
                self.path.display()
            );
        }
    }

    /// Stop accepting lines. The returned handle finishes once every queued line is written.
    pub fn close(self) -> JoinHandle<()> {
        drop(self.sender);
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_in_push_order() -> Result<(), Box<dyn std::error::Error>> {
        let _ = env_logger::builder().is_test(true).try_init();
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("log.txt");

        let counters = Arc::new(WriteCounters::default());
        let log = OrderedLog::spawn(&path, counters.clone())?;
        for i in 0..500u64 {
            log.push(i, format!("line {i}"));
        }
        log.close().join().map_err(|_| "writer thread panicked")?;

        let lines = posecap_io::log_file::read_lines(&path)?;
        let expected = (0..500).map(|i| format!("line {i}")).collect::<Vec<_>>();
        assert_eq!(lines, expected);
        assert_eq!(counters.written(), 500);
        assert_eq!(counters.failed(), 0);
        Ok(())
    }

    #[test]
    fn failures_are_counted() -> Result<(), Box<dyn std::error::Error>> {
        let _ = env_logger::builder().is_test(true).try_init();
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("missing").join("log.txt");

        let counters = Arc::new(WriteCounters::default());
        let log = OrderedLog::spawn(&path, counters.clone())?;
        log.push(0, "lost".to_string());
        log.push(1, "lost too".to_string());
        log.close().join().map_err(|_| "writer thread panicked")?;

        assert_eq!(counters.written(), 0);
        assert_eq!(counters.failed(), 2);
        Ok(())
    }
}
