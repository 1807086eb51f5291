//! Chat message and role types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message in a conversation
///
/// Role and content are fixed at construction. Metadata is the only
/// field amended after the fact, through an explicit annotation
/// operation on the owning history.
///
/// The serde form of a `Message` doubles as one record of the on-disk
/// chat log:
///
/// ```text
/// {"type":"human","content":"Hi","kwargs":{}}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    /// The role of the speaker
    #[serde(rename = "type")]
    pub role: Role,

    /// The content of the message
    pub content: String,

    /// Annotations attached to the message
    #[serde(rename = "kwargs", default)]
    pub metadata: Map<String, Value>,
}

impl Message {
    /// Create a new human message
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Create a new ai message
    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// Create a new generic chat message
    pub fn other(content: impl Into<String>) -> Self {
        Self {
            role: Role::Other,
            content: content.into(),
            metadata: Map::new(),
        }
    }
}

/// The role of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Role {
    /// The human side of a turn
    #[serde(rename = "human")]
    Human,
    /// The model side of a turn
    #[serde(rename = "ai")]
    Ai,
    /// A system instruction
    #[serde(rename = "system")]
    System,
    /// A message outside the human/ai/system roles
    #[serde(rename = "chat")]
    Other,
}

/// Flatten messages into a prompt-ready transcript.
///
/// Each entry renders as `<prefix>: <content>`, joined by newlines in
/// chronological order. Human and ai prefixes are configurable; system
/// and generic chat messages use fixed prefixes.
pub fn transcript(messages: &[Message], human_prefix: &str, ai_prefix: &str) -> String {
    messages
        .iter()
        .map(|message| {
            let prefix = match message.role {
                Role::Human => human_prefix,
                Role::Ai => ai_prefix,
                Role::System => "System",
                Role::Other => "Chat",
            };
            format!("{prefix}: {}", message.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
