//! Ordered, append-only chat history

use crate::Message;

/// An ordered, append-only sequence of messages.
///
/// Insertion order is chronological order: for positions `i < j`,
/// message `i` occurred no later than message `j`. Truncation is only
/// ever a view operation ([`window`](Self::window)); the underlying
/// sequence loses entries through [`clear`](Self::clear) alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatHistory {
    messages: Vec<Message>,
}

impl ChatHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from already-ordered messages.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Append a human message.
    pub fn append_human(&mut self, content: impl Into<String>) {
        self.messages.push(Message::human(content));
    }

    /// Append an ai message.
    pub fn append_ai(&mut self, content: impl Into<String>) {
        self.messages.push(Message::ai(content));
    }

    /// Append an already-built message.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Mutable access to the most recent message.
    ///
    /// Only the metadata of the returned message may be amended; role
    /// and content stay fixed once appended.
    pub fn last_mut(&mut self) -> Option<&mut Message> {
        self.messages.last_mut()
    }

    /// Number of messages in the history.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// View of the last `turns` turns, two messages per turn.
    ///
    /// Returns the full sequence when it is shorter than the window.
    pub fn window(&self, turns: usize) -> &[Message] {
        let keep = turns.saturating_mul(2).min(self.messages.len());
        &self.messages[self.messages.len() - keep..]
    }

    /// Drop every message from the live view.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
