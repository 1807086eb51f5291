//! Configuration shared by the memory variants

use compact_str::CompactString;

/// How a memory renders its value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Ordered message objects
    Messages,
    /// A flattened `<prefix>: <content>` transcript
    #[default]
    Text,
}

/// Configuration for a memory variant
///
/// Window size and log path are not here: they are constructor
/// arguments of the variants that take them, never ambient defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryConfig {
    /// The key injected into the prompt context
    pub memory_key: CompactString,

    /// Prefix for human entries in text mode
    pub human_prefix: CompactString,

    /// Prefix for ai entries in text mode
    pub ai_prefix: CompactString,

    /// Explicit input key; `None` means auto-detect
    pub input_key: Option<CompactString>,

    /// Explicit output key; `None` means auto-detect
    pub output_key: Option<CompactString>,

    /// Whether to return messages or a transcript
    pub render_mode: RenderMode,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            memory_key: CompactString::const_new("history"),
            human_prefix: CompactString::const_new("Human"),
            ai_prefix: CompactString::const_new("AI"),
            input_key: None,
            output_key: None,
            render_mode: RenderMode::default(),
        }
    }
}

impl MemoryConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the memory key
    pub fn memory_key(mut self, key: impl Into<CompactString>) -> Self {
        self.memory_key = key.into();
        self
    }

    /// Set the human prefix
    pub fn human_prefix(mut self, prefix: impl Into<CompactString>) -> Self {
        self.human_prefix = prefix.into();
        self
    }

    /// Set the ai prefix
    pub fn ai_prefix(mut self, prefix: impl Into<CompactString>) -> Self {
        self.ai_prefix = prefix.into();
        self
    }

    /// Set an explicit input key
    pub fn input_key(mut self, key: impl Into<CompactString>) -> Self {
        self.input_key = Some(key.into());
        self
    }

    /// Set an explicit output key
    pub fn output_key(mut self, key: impl Into<CompactString>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    /// Set the render mode
    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }
}
