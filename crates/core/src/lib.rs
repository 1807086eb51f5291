//! Core types for driftlog conversational memory

pub use {
    error::{Error, Result},
    history::ChatHistory,
    message::{Message, Role, transcript},
};

mod error;
mod history;
mod message;
