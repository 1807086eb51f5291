//! Full-history in-memory variant

use crate::{Memory, MemoryConfig, MemoryValue, RenderMode, keys};
use dcore::{ChatHistory, Result, transcript};
use std::collections::BTreeMap;

/// Unbounded in-memory conversation buffer.
///
/// Keeps every turn of the live session; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct BufferMemory {
    history: ChatHistory,
    config: MemoryConfig,
}

impl BufferMemory {
    /// Create an empty buffer.
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            history: ChatHistory::new(),
            config,
        }
    }

    /// The live history.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }
}

impl Memory for BufferMemory {
    fn memory_variables(&self) -> Vec<String> {
        vec![self.config.memory_key.to_string()]
    }

    fn load_memory_variables(
        &mut self,
        _inputs: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, MemoryValue>> {
        let value = match self.config.render_mode {
            RenderMode::Messages => MemoryValue::Messages(self.history.messages().to_vec()),
            RenderMode::Text => MemoryValue::Text(transcript(
                self.history.messages(),
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
        self.history.append_human(human);
        self.history.append_ai(ai);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }
}
