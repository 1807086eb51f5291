//! Log-backed conversational memory.
//!
//! The persisted variant: an append-only on-disk transcript replayed
//! in full on every read, truncated to a turn window for rendering,
//! and annotatable after the fact. Reads and writes are deliberately
//! asymmetric — a read replays the entire log, a write appends only
//! the new turn's two records.

use crate::{ChatLog, Memory, MemoryConfig, MemoryValue, RenderMode, keys};
use dcore::{ChatHistory, Error, Message, Result, transcript};
use serde_json::Value;
use std::{collections::BTreeMap, path::PathBuf};

/// Windowed, file-persisted conversational memory.
///
/// Every read reloads authoritative state from the log, so a fresh
/// instance pointed at an existing file picks up every prior turn, and
/// a long-lived instance picks up appends it did not make itself.
/// Writes append exactly the two records of the new turn; only
/// [`add_score`](Self::add_score) rewrites the file.
pub struct SerializingMemory {
    log: ChatLog,
    history: ChatHistory,
    window: usize,
    config: MemoryConfig,
}

impl SerializingMemory {
    /// Create a memory over the given log path.
    ///
    /// `window` is the number of most recent turns exposed on read.
    /// No I/O happens until the first read or write; a missing log
    /// file is created empty at that point.
    pub fn new(path: impl Into<PathBuf>, window: usize, config: MemoryConfig) -> Self {
        Self {
            log: ChatLog::new(path),
            history: ChatHistory::new(),
            window,
            config,
        }
    }

    /// The underlying log.
    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Annotate the chronologically last message with a score.
    ///
    /// Replays the full log, sets `metadata["score"]` on the last
    /// message and rewrites the file with the amended sequence, either
    /// fully or not at all. Every other record keeps its role, content
    /// and metadata unchanged.
    pub fn add_score(&mut self, score: impl Into<Value>) -> Result<()> {
        self.history = self.log.replay()?;
        let last = self.history.last_mut().ok_or(Error::EmptyHistory)?;
        last.metadata.insert("score".into(), score.into());
        self.log.rewrite(self.history.messages())
    }
}

impl Memory for SerializingMemory {
    fn memory_variables(&self) -> Vec<String> {
        vec![self.config.memory_key.to_string()]
    }

    fn load_memory_variables(
        &mut self,
        _inputs: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, MemoryValue>> {
        // The log is authoritative: writers this instance does not
        // control may have appended since the last read.
        self.history = self.log.replay()?;
        let window = self.history.window(self.window);
        let value = match self.config.render_mode {
            RenderMode::Messages => MemoryValue::Messages(window.to_vec()),
            RenderMode::Text => MemoryValue::Text(transcript(
                window,
                &self.config.human_prefix,
                &self.config.ai_prefix,
            )),
        };
        Ok(BTreeMap::from([(self.config.memory_key.to_string(), value)]))
    }

    fn save_context(
        &mut self,
        inputs: &BTreeMap<String, String>,
        outputs: &BTreeMap<String, String>,
    ) -> Result<()> {
        let (human, ai) = keys::resolve_turn(inputs, outputs, &self.config)?;
        let turn = [Message::human(human), Message::ai(ai)];
        // Flush before touching the live view: a failed write must
        // leave the in-memory tail matching what is on disk.
        self.log.append(&turn)?;
        let [human, ai] = turn;
        self.history.append(human);
        self.history.append(ai);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        // Live view only. The durable log is never truncated here.
        self.history.clear();
        Ok(())
    }
}
