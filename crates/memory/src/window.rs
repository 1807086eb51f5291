//! Sliding-window in-memory variant

use crate::{Memory, MemoryConfig, MemoryValue, RenderMode, keys};
use dcore::{ChatHistory, Result, transcript};
use std::collections::BTreeMap;

/// In-memory buffer exposing only the last *k* turns.
///
/// The full history stays in memory; the window is a view applied at
/// read time, never a destructive truncation.
#[derive(Debug, Clone)]
pub struct WindowMemory {
    history: ChatHistory,
    window: usize,
    config: MemoryConfig,
}

impl WindowMemory {
    /// Create an empty window buffer over the last `window` turns.
    pub fn new(window: usize, config: MemoryConfig) -> Self {
        Self {
            history: ChatHistory::new(),
            window,
            config,
        }
    }

    /// The live history, unwindowed.
    pub fn history(&self) -> &ChatHistory {
        &self.history
    }
}

impl Memory for WindowMemory {
    fn memory_variables(&self) -> Vec<String> {
        vec![self.config.memory_key.to_string()]
    }

    fn load_memory_variables(
        &mut self,
        _inputs: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, MemoryValue>> {
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
        self.history.append_human(human);
        self.history.append_ai(ai);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }
}
