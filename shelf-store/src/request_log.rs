//! Append-only request log.
//!
//! One plain-text line per handled request:
//! `<timestamp> <METHOD> <path+query>`, timestamps in UTC with millisecond
//! precision. The file (and its directory) is created on first append.

use crate::config::StoreConfig;
use crate::error::StoreError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Plain-text request log
#[derive(Debug, Clone)]
pub struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    /// Create a log writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a log at the configured location
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.request_log.clone())
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format a single log line (without the trailing newline).
    pub fn format_entry(timestamp: DateTime<Utc>, method: &str, target: &str) -> String {
        format!(
            "{} {} {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            method,
            target
        )
    }

    /// Append an entry stamped with the current time.
    pub async fn append(&self, method: &str, target: &str) -> Result<(), StoreError> {
        self.append_at(Utc::now(), method, target).await
    }

    /// Append an entry with an explicit timestamp.
    pub async fn append_at(
        &self,
        timestamp: DateTime<Utc>,
        method: &str,
        target: &str,
    ) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::unavailable(parent, e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;

        let mut line = Self::format_entry(timestamp, method, target);
        line.push('\n');

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| StoreError::unavailable(&self.path, e))
    }
}

// =============================================================================
// Tests
// =============================================================================
