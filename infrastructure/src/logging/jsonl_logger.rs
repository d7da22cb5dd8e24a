//! JSONL file writer for tool invocations.
//!
//! Each [`InvocationRecord`] is serialized as a single JSON line and
//! appended to the file, so one log can span many runs.

use localcrew_application::{InvocationLogger, InvocationRecord};
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Invocation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlInvocationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlInvocationLogger {
    /// Open `path` for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create invocation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open invocation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InvocationLogger for JsonlInvocationLogger {
    fn log(&self, record: InvocationRecord) {
        let line = json!({
            "type": "tool_invocation",
            "timestamp": record
                .started_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "tool": record.tool_name,
            "variant": record.variant,
            "success": record.success,
            "error": record.error,
            "duration_ms": record.duration_ms,
        });

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlInvocationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(tool: &str, success: bool) -> InvocationRecord {
        InvocationRecord {
            tool_name: tool.to_string(),
            variant: None,
            success,
            error: (!success).then(|| "Unknown tool: x".to_string()),
            duration_ms: 12,
            started_at: Utc::now(),
        }
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("invocations.jsonl");
        let logger = JsonlInvocationLogger::new(&path).unwrap();

        logger.log(InvocationRecord {
            variant: Some("technical".into()),
            ..record("analyze_code", true)
        });
        logger.log(record("x", false));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "tool_invocation");
        assert_eq!(lines[0]["tool"], "analyze_code");
        assert_eq!(lines[0]["variant"], "technical");
        assert_eq!(lines[0]["duration_ms"], 12);
        assert!(lines[0]["error"].is_null());
        assert_eq!(lines[1]["success"], false);
        assert_eq!(lines[1]["error"], "Unknown tool: x");
    }

    #[test]
    fn test_appends_across_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invocations.jsonl");

        JsonlInvocationLogger::new(&path).unwrap().log(record("a", true));
        JsonlInvocationLogger::new(&path).unwrap().log(record("b", true));

        let tools: Vec<_> = read_lines(&path)
            .into_iter()
            .map(|v| v["tool"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(tools, vec!["a", "b"]);
    }

    #[test]
    fn test_unwritable_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlInvocationLogger::new(blocker.join("log.jsonl")).is_none());
    }
}
