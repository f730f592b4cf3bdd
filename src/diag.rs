use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

const LOG_FILE: &str = "diagnostics.jsonl";
const MAX_RECENT: usize = 200;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagEntry {
    pub timestamp: String,
    pub level: String,
    pub message: String,
}

/// Append-only JSONL diagnostics log in the data directory. Write failures
/// are swallowed; diagnostics must never take the app down.
pub struct Diagnostics {
    path: PathBuf,
}

impl Diagnostics {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            path: base_dir.join(LOG_FILE),
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.append("info", message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.append("warn", message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.append("error", message.into());
    }

    fn append(&self, level: &str, message: String) {
        let entry = DiagEntry {
            timestamp: Utc::now().to_rfc3339(),
            level: level.to_string(),
            message,
        };
        let Ok(line) = serde_json::to_string(&entry) else {
            return;
        };
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        {
            let _ = writeln!(file, "{line}");
        }
    }

    pub fn read_recent(&self) -> Result<Vec<DiagEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let mut entries: Vec<DiagEntry> = content
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();
        if entries.len() > MAX_RECENT {
            entries = entries.split_off(entries.len() - MAX_RECENT);
        }
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let diag = Diagnostics::new(dir.path());
        diag.info("session started");
        diag.error("generation failed");

        let entries = diag.read_recent().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "info");
        assert_eq!(entries[1].message, "generation failed");
    }

    #[test]
    fn test_read_empty_when_no_file() {
        let dir = TempDir::new().unwrap();
        let diag = Diagnostics::new(dir.path());
        assert!(diag.read_recent().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let dir = TempDir::new().unwrap();
        let diag = Diagnostics::new(dir.path());
        diag.info("good line");
        fs::write(
            dir.path().join(LOG_FILE),
            "not json\n{\"timestamp\":\"t\",\"level\":\"info\",\"message\":\"kept\"}\n",
        )
        .unwrap();
        let entries = diag.read_recent().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept");
    }

    #[test]
    fn test_clear_removes_log() {
        let dir = TempDir::new().unwrap();
        let diag = Diagnostics::new(dir.path());
        diag.info("x");
        diag.clear().unwrap();
        assert!(diag.read_recent().unwrap().is_empty());
    }
}
