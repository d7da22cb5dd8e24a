//! Watch notification port
//!
//! Callbacks for the directory watcher's lifecycle. Implementations live in
//! the presentation layer (console output) or in tests (recorders).

use localcrew_domain::FileRecord;
use std::path::Path;

pub trait WatchNotifier: Send + Sync {
    /// The watch loop is about to start polling `dir`
    fn on_watch_start(&self, _dir: &Path) {}

    /// A new file was detected and classified
    fn on_file_detected(&self, record: &FileRecord);

    /// A polling cycle failed; the loop continues
    fn on_scan_error(&self, _message: &str) {}

    /// The watch loop exited after processing `processed` files in total
    fn on_watch_stop(&self, _processed: usize) {}
}

/// No-op notifier for when nobody is listening
pub struct NoWatchProgress;

impl WatchNotifier for NoWatchProgress {
    fn on_file_detected(&self, _record: &FileRecord) {}
}
