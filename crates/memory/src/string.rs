//! Flattened-transcript variant

use crate::{Memory, MemoryConfig, MemoryValue, RenderMode, keys};
use dcore::{Error, Result};
use std::collections::BTreeMap;

/// In-memory buffer that accumulates a flat transcript.
///
/// Stores `<prefix>: <content>` lines directly instead of message
/// objects, so it can only ever render text: construction rejects a
/// configuration asking for message output, since a flattened string
/// cannot be split back into structured turns.
#[derive(Debug, Clone)]
pub struct StringBufferMemory {
    buffer: String,
    config: MemoryConfig,
}

impl StringBufferMemory {
    /// Create an empty string buffer.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when the config
    /// requests [`RenderMode::Messages`].
    pub fn new(config: MemoryConfig) -> Result<Self> {
        if config.render_mode == RenderMode::Messages {
            return Err(Error::InvalidConfiguration(
                "string buffer memory cannot render messages",
            ));
        }
        Ok(Self {
            buffer: String::new(),
            config,
        })
    }

    /// The accumulated transcript.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }
}

impl Memory for StringBufferMemory {
    fn memory_variables(&self) -> Vec<String> {
        vec![self.config.memory_key.to_string()]
    }

    fn load_memory_variables(
        &mut self,
        _inputs: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, MemoryValue>> {
        Ok(BTreeMap::from([(
            self.config.memory_key.to_string(),
            MemoryValue::Text(self.buffer.clone()),
        )]))
    }

    fn save_context(
        &mut self,
        inputs: &BTreeMap<String, String>,
        outputs: &BTreeMap<String, String>,
    ) -> Result<()> {
        let (human, ai) = keys::resolve_turn(inputs, outputs, &self.config)?;
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(&format!(
            "{}: {human}\n{}: {ai}",
            self.config.human_prefix, self.config.ai_prefix,
        ));
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.buffer.clear();
        Ok(())
    }
}
