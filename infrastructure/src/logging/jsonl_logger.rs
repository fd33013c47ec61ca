//! JSONL file writer for generation events.
//!
//! Each [`GenerationEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use qgen_application::ports::generation_logger::{GenerationEvent, GenerationLogger};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL generation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`. Opens the
/// file in append mode so runs accumulate in one log.
pub struct JsonlGenerationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlGenerationLogger {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if needed. Returns `None` if the file
    /// cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create generation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open generation log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GenerationLogger for JsonlGenerationLogger {
    fn log(&self, event: GenerationEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = if let serde_json::Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                serde_json::Value::String(event.event_type.to_string()),
            );
            map.insert("timestamp".to_string(), serde_json::Value::String(timestamp));
            serde_json::Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlGenerationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("generation.jsonl");
        let logger = JsonlGenerationLogger::new(&path).unwrap();

        logger.log(GenerationEvent::new(
            "generation_request",
            serde_json::json!({"model": "gemini-2.0-flash", "batch_size": 6}),
        ));
        logger.log(GenerationEvent::new(
            "generation_result",
            serde_json::json!({"added": 5, "discarded": 1}),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "generation_request");
        assert_eq!(lines[0]["batch_size"], 6);
        assert_eq!(lines[1]["added"], 5);
        assert!(lines.iter().all(|l| l.get("timestamp").is_some()));
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generation.jsonl");

        for n in 0..2 {
            let logger = JsonlGenerationLogger::new(&path).unwrap();
            logger.log(GenerationEvent::new("quota_blocked", serde_json::json!({"run": n})));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["run"], 1);
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generation.jsonl");
        let logger = JsonlGenerationLogger::new(&path).unwrap();

        logger.log(GenerationEvent::new("translation", serde_json::json!("fr")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "translation");
        assert_eq!(lines[0]["data"], "fr");
    }
}
