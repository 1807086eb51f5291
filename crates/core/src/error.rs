//! Error taxonomy shared by the driftlog crates

use thiserror::Error;

/// Result alias for driftlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by memory operations.
///
/// None of these are retried internally; every variant propagates to
/// the caller. The only self-healing behavior in the workspace is lazy
/// creation of a missing log file on first use, which is not an error
/// path.
#[derive(Debug, Error)]
pub enum Error {
    /// `save_context` could not pick the human field from the inputs.
    #[error("expected exactly one input key, got {0:?}")]
    AmbiguousInputKey(Vec<String>),

    /// `save_context` was given several outputs and no explicit output
    /// key was configured.
    #[error("expected exactly one output key, got {0:?}")]
    AmbiguousOutputKey(Vec<String>),

    /// An explicitly configured key names a field the caller did not
    /// supply.
    #[error("configured key {0:?} not present in supplied fields")]
    MissingKey(String),

    /// A log line failed to parse during replay.
    ///
    /// Fatal to the whole load: skipping the line would drop a turn
    /// from chronological replay and shift every window derived from
    /// it.
    #[error("malformed log record at line {line}: {source}")]
    MalformedLogRecord {
        /// 1-based line number within the log file.
        line: usize,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Contradictory options, rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An annotation was requested but the log holds no messages.
    #[error("no message to annotate")]
    EmptyHistory,

    /// Serializing a message for the log failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying file I/O failed; surfaced verbatim.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
