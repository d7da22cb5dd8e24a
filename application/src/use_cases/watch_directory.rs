//! Directory watching use case.
//!
//! Polls a directory for files that have not been seen before, classifies
//! each one and reports it to a [`WatchNotifier`].
//!
//! ```text
//!  Idle ──run()──▶ Watching ──new files──▶ Processing ──▶ Watching
//!                     │                                      │
//!                     └────────── cancel ◀───────────────────┘
//!                                   │
//!                                   ▼
//!                                Stopped
//! ```
//!
//! Stopping is driven by a [`CancellationToken`]. The wait between polls is
//! raced against the token, so a stop request takes effect immediately
//! instead of after the current poll interval.

use crate::ports::directory_scanner::{DirectoryScanner, ScanError};
use crate::ports::watch_notifier::WatchNotifier;
use localcrew_domain::{Classification, Classifier, FileRecord};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle of a watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Idle,
    Watching,
    Processing,
    Stopped,
}

/// Input for the [`WatchDirectoryUseCase`].
#[derive(Debug, Clone)]
pub struct WatchDirectoryInput {
    pub dir: PathBuf,
    pub poll_interval: Duration,
}

impl WatchDirectoryInput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            poll_interval: Duration::from_secs(5),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Use case for watching a directory for new files.
pub struct WatchDirectoryUseCase {
    input: WatchDirectoryInput,
    scanner: Arc<dyn DirectoryScanner>,
    classifier: Arc<dyn Classifier>,
    notifier: Arc<dyn WatchNotifier>,
    processed: HashSet<PathBuf>,
    state: WatchState,
}

impl WatchDirectoryUseCase {
    pub fn new(
        input: WatchDirectoryInput,
        scanner: Arc<dyn DirectoryScanner>,
        classifier: Arc<dyn Classifier>,
        notifier: Arc<dyn WatchNotifier>,
    ) -> Self {
        Self {
            input,
            scanner,
            classifier,
            notifier,
            processed: HashSet::new(),
            state: WatchState::Idle,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.input.dir
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Watch until `cancel` fires. Returns the number of files processed.
    ///
    /// Only a failure to create the directory ends the loop with an error;
    /// a failed poll is reported and retried on the next cycle.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<usize, ScanError> {
        if self.scanner.ensure_dir(&self.input.dir).await? {
            info!("Created watch directory: {}", self.input.dir.display());
        }

        self.state = WatchState::Watching;
        info!("Started watching directory: {}", self.input.dir.display());
        self.notifier.on_watch_start(&self.input.dir);

        while !cancel.is_cancelled() {
            if let Err(e) = self.scan_once().await {
                warn!("Error watching files: {}", e);
                self.notifier.on_scan_error(&e.to_string());
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.input.poll_interval) => {}
            }
        }

        self.state = WatchState::Stopped;
        info!("Stopped watching directory: {}", self.input.dir.display());
        self.notifier.on_watch_stop(self.processed.len());
        Ok(self.processed.len())
    }

    /// Run a single polling cycle and return the records of new files.
    pub async fn scan_once(&mut self) -> Result<Vec<FileRecord>, ScanError> {
        let mut current = self.scanner.list_files(&self.input.dir).await?;
        current.sort();

        let new_files: Vec<PathBuf> = current
            .into_iter()
            .filter(|path| !self.processed.contains(path))
            .collect();

        if new_files.is_empty() {
            return Ok(Vec::new());
        }

        let previous = self.state;
        self.state = WatchState::Processing;

        let mut records = Vec::with_capacity(new_files.len());
        for path in new_files {
            debug!("New file detected: {}", path.display());
            match self.process_file(&path).await {
                Ok(record) => {
                    info!(
                        "Classified {} as {} (hashtags: {:?})",
                        record.filename,
                        record.content_type(),
                        record.classification.hashtags
                    );
                    self.notifier.on_file_detected(&record);
                    records.push(record);
                }
                Err(e) => warn!("Error processing file {}: {}", path.display(), e),
            }
            self.processed.insert(path);
        }

        self.state = previous;
        Ok(records)
    }

    async fn process_file(&self, path: &Path) -> Result<FileRecord, ScanError> {
        let stat = self.scanner.stat(path).await?;

        let record = FileRecord::new(path, stat.size).with_times(stat.modified, stat.created);

        let classification = match self.scanner.read_to_string(path).await {
            Ok(content) => self.classifier.classify(path, &content),
            Err(e) => {
                warn!("Could not read {} for classification: {}", path.display(), e);
                Classification::unreadable(&record.extension)
            }
        };

        Ok(record.with_classification(classification))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::directory_scanner::FileStat;
    use async_trait::async_trait;
    use localcrew_domain::{ContentType, HashtagClassifier, StorageRouting};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory directory; `None` content means the file cannot be read
    #[derive(Default)]
    struct MemoryScanner {
        files: Mutex<BTreeMap<PathBuf, Option<String>>>,
        created_dirs: Mutex<Vec<PathBuf>>,
    }

    impl MemoryScanner {
        fn add(&self, path: &str, content: Option<&str>) {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), content.map(String::from));
        }
    }

    #[async_trait]
    impl DirectoryScanner for MemoryScanner {
        async fn ensure_dir(&self, dir: &Path) -> Result<bool, ScanError> {
            self.created_dirs.lock().unwrap().push(dir.to_path_buf());
            Ok(true)
        }

        async fn list_files(&self, _dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
            Ok(self.files.lock().unwrap().keys().cloned().collect())
        }

        async fn stat(&self, path: &Path) -> Result<FileStat, ScanError> {
            let size = self
                .files
                .lock()
                .unwrap()
                .get(path)
                .and_then(|c| c.as_ref().map(|c| c.len() as u64))
                .unwrap_or(0);
            Ok(FileStat {
                size,
                modified: None,
                created: None,
            })
        }

        async fn read_to_string(&self, path: &Path) -> Result<String, ScanError> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .flatten()
                .ok_or_else(|| ScanError::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8"),
                })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        detected: Mutex<Vec<FileRecord>>,
        stopped: Mutex<Option<usize>>,
    }

    impl WatchNotifier for RecordingNotifier {
        fn on_file_detected(&self, record: &FileRecord) {
            self.detected.lock().unwrap().push(record.clone());
        }

        fn on_watch_stop(&self, processed: usize) {
            *self.stopped.lock().unwrap() = Some(processed);
        }
    }

    fn watcher(
        scanner: &Arc<MemoryScanner>,
        notifier: &Arc<RecordingNotifier>,
        poll_interval: Duration,
    ) -> WatchDirectoryUseCase {
        WatchDirectoryUseCase::new(
            WatchDirectoryInput::new("/inbox").with_poll_interval(poll_interval),
            scanner.clone(),
            Arc::new(HashtagClassifier),
            notifier.clone(),
        )
    }

    #[tokio::test]
    async fn test_new_note_is_classified() {
        let scanner = Arc::new(MemoryScanner::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut watcher = watcher(&scanner, &notifier, Duration::from_secs(5));

        scanner.add("/inbox/note.md", Some("#video this is content"));
        let records = watcher.scan_once().await.unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.filename, "note.md");
        assert_eq!(record.extension, ".md");
        assert_eq!(record.size, 22);
        assert_eq!(record.content_type(), ContentType::Video);
        assert_eq!(record.classification.hashtags, vec!["video"]);
        assert_eq!(
            record.classification.storage,
            StorageRouting {
                obsidian: true,
                vector_db: true,
                sql_db: false
            }
        );
        assert_eq!(notifier.detected.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_files_are_processed_once() {
        let scanner = Arc::new(MemoryScanner::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut watcher = watcher(&scanner, &notifier, Duration::from_secs(5));

        scanner.add("/inbox/a.md", Some("first"));
        assert_eq!(watcher.scan_once().await.unwrap().len(), 1);
        assert!(watcher.scan_once().await.unwrap().is_empty());

        scanner.add("/inbox/b.txt", Some("second"));
        let records = watcher.scan_once().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "b.txt");
        assert_eq!(watcher.processed_count(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_classified_by_extension() {
        let scanner = Arc::new(MemoryScanner::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut watcher = watcher(&scanner, &notifier, Duration::from_secs(5));

        scanner.add("/inbox/scan.pdf", None);
        scanner.add("/inbox/photo.png", None);
        let records = watcher.scan_once().await.unwrap();
        let by_name = |name: &str| {
            records
                .iter()
                .find(|r| r.filename == name)
                .unwrap()
                .clone()
        };

        let pdf = by_name("scan.pdf");
        assert_eq!(pdf.content_type(), ContentType::Document);
        assert!(pdf.classification.hashtags.is_empty());
        assert!(pdf.classification.frontmatter.is_empty());
        assert_eq!(pdf.classification.storage, StorageRouting::default());

        assert_eq!(by_name("photo.png").content_type(), ContentType::Unknown);
    }

    #[tokio::test]
    async fn test_run_stops_without_waiting_for_poll_interval() {
        let scanner = Arc::new(MemoryScanner::default());
        let notifier = Arc::new(RecordingNotifier::default());
        scanner.add("/inbox/a.md", Some("#process step"));
        let mut watcher = watcher(&scanner, &notifier, Duration::from_secs(3600));
        assert_eq!(watcher.state(), WatchState::Idle);

        let cancel = CancellationToken::new();
        let stopper = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            stopper.cancel();
        });

        let processed = tokio::time::timeout(Duration::from_secs(5), watcher.run(cancel))
            .await
            .expect("watcher should stop promptly")
            .unwrap();

        assert_eq!(processed, 1);
        assert_eq!(watcher.state(), WatchState::Stopped);
        assert_eq!(*notifier.stopped.lock().unwrap(), Some(1));
        assert_eq!(scanner.created_dirs.lock().unwrap()[0], PathBuf::from("/inbox"));
    }

    #[tokio::test]
    async fn test_run_with_cancelled_token_does_not_scan() {
        let scanner = Arc::new(MemoryScanner::default());
        let notifier = Arc::new(RecordingNotifier::default());
        scanner.add("/inbox/a.md", Some("x"));
        let mut watcher = watcher(&scanner, &notifier, Duration::from_secs(5));

        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(watcher.run(cancel).await.unwrap(), 0);
        assert!(notifier.detected.lock().unwrap().is_empty());
    }
}
