//! File-backed chat log.
//!
//! Newline-delimited JSON, one message per line, strict append order.
//! Replaying the file from empty reproduces the exact chronological
//! sequence every flush has seen. The log is the sole persisted state;
//! there is no index or sidecar metadata file.

use dcore::{ChatHistory, Error, Message, Result};
use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// A durable append log of serialized messages.
///
/// Exactly one logical owner should hold write access per path at a
/// time. Concurrent readers are safe because every read replays the
/// whole file rather than tailing it.
#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    /// Create a log handle for the given path.
    ///
    /// No I/O happens here; a missing file is created on first replay.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild the full history from the start of the file.
    ///
    /// A missing file is created empty and yields an empty history. A
    /// line that fails to parse fails the whole load; replay never
    /// skips a record.
    pub fn replay(&self) -> Result<ChatHistory> {
        if !self.path.exists() {
            File::create(&self.path)?;
            tracing::debug!(path = %self.path.display(), "created empty chat log");
            return Ok(ChatHistory::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let body = content.trim();
        if body.is_empty() {
            return Ok(ChatHistory::new());
        }

        let mut messages = Vec::new();
        for (index, line) in body.lines().enumerate() {
            let message =
                serde_json::from_str(line).map_err(|source| Error::MalformedLogRecord {
                    line: index + 1,
                    source,
                })?;
            messages.push(message);
        }
        tracing::debug!(
            path = %self.path.display(),
            messages = messages.len(),
            "replayed chat log"
        );
        Ok(ChatHistory::from_messages(messages))
    }

    /// Append records to the end of the file without reading it.
    ///
    /// The records are serialized into one buffer and flushed with a
    /// single write against an append-mode handle.
    pub fn append(&self, messages: &[Message]) -> Result<()> {
        let buffer = encode(messages)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&buffer)?;
        tracing::debug!(
            path = %self.path.display(),
            messages = messages.len(),
            "appended to chat log"
        );
        Ok(())
    }

    /// Replace the whole file with the given sequence.
    ///
    /// The records are materialized into a temporary file in the log's
    /// directory which is then renamed over the path, so either the old
    /// or the new complete log is visible, never a partial one.
    pub fn rewrite(&self, messages: &[Message]) -> Result<()> {
        let buffer = encode(messages)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&buffer)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(
            path = %self.path.display(),
            messages = messages.len(),
            "rewrote chat log"
        );
        Ok(())
    }
}

/// Serialize messages as newline-delimited JSON.
fn encode(messages: &[Message]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for message in messages {
        serde_json::to_writer(&mut buffer, message)?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}
