//! Conversational memory for LLM pipelines.
//!
//! A memory hands prior dialogue turns back to a prompt-building
//! pipeline: the caller invokes
//! [`load_memory_variables`](Memory::load_memory_variables) before a
//! model request and [`save_context`](Memory::save_context) after the
//! reply. Four variants share the contract:
//!
//! - [`BufferMemory`] — the full in-memory history, nothing persisted.
//! - [`WindowMemory`] — the last *k* turns of the in-memory history.
//! - [`StringBufferMemory`] — a flattened text transcript, text-only.
//! - [`SerializingMemory`] — windowed and persisted to an append-only
//!   newline-delimited JSON log, replayed in full on every read and
//!   annotatable after the fact. The only durable variant.
//!
//! # Example
//!
//! ```rust,ignore
//! use driftlog_memory::{Memory, MemoryConfig, SerializingMemory};
//!
//! let mut memory = SerializingMemory::new("chat_log.log", 2, MemoryConfig::new());
//! memory.save_context(&inputs, &outputs)?;
//! let vars = memory.load_memory_variables(&inputs)?;
//! // vars["history"] holds the last two turns.
//! ```

use std::collections::BTreeMap;

pub use {
    buffer::BufferMemory,
    config::{MemoryConfig, RenderMode},
    dcore::{ChatHistory, Error, Message, Result, Role},
    log::ChatLog,
    serializing::SerializingMemory,
    string::StringBufferMemory,
    window::WindowMemory,
};

mod buffer;
mod config;
mod keys;
mod log;
mod serializing;
mod string;
mod window;

/// Conversational memory contract.
///
/// Every variant exposes a single memory key and injects one value
/// under it: either the ordered messages or a flattened transcript,
/// depending on the configured [`RenderMode`].
pub trait Memory {
    /// The key name(s) this variant injects into a prompt context.
    fn memory_variables(&self) -> Vec<String>;

    /// Read the history for the next request.
    ///
    /// Returns a mapping with exactly one entry, keyed by the
    /// configured memory key.
    fn load_memory_variables(
        &mut self,
        inputs: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, MemoryValue>>;

    /// Record one completed turn.
    ///
    /// Resolves which field of `inputs` holds the human utterance and
    /// which field of `outputs` holds the model reply, then appends
    /// exactly one human and one ai message, in that order. Persisted
    /// variants flush the pair durably before returning.
    fn save_context(
        &mut self,
        inputs: &BTreeMap<String, String>,
        outputs: &BTreeMap<String, String>,
    ) -> Result<()>;

    /// Empty the live view.
    fn clear(&mut self) -> Result<()>;
}

/// A value injected into the prompt context.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryValue {
    /// Ordered messages, oldest first.
    Messages(Vec<Message>),
    /// A flattened `<prefix>: <content>` transcript.
    Text(String),
}

impl MemoryValue {
    /// The messages, when rendered in message mode.
    pub fn as_messages(&self) -> Option<&[Message]> {
        match self {
            Self::Messages(messages) => Some(messages),
            Self::Text(_) => None,
        }
    }

    /// The transcript, when rendered in text mode.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Messages(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}
