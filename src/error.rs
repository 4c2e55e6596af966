//! Error taxonomy for prompts and surveys.
//!
//! Terminal failures propagate unchanged through `Io`; neither runner
//! catches or wraps them, so a failing question ends the whole sequence.

use std::io;

use thiserror::Error;

/// Everything a prompt or survey can fail with.
#[derive(Debug, Error)]
pub enum PromptError {
    /// A precondition on the arguments was violated (e.g. an empty item list).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The terminal collaborator failed, including input closing early.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The user pressed Ctrl-C or the cancel token was triggered.
    #[error("prompt aborted")]
    Aborted,

    /// A survey definition or answer set could not be (de)serialized.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PromptError {
    /// Shorthand for the empty-list precondition shared by radio and checkbox.
    pub(crate) fn empty_items(prompt: &str) -> Self {
        PromptError::InvalidArgument(format!("item list for {:?} must not be empty", prompt))
    }

    /// Whether this error is the out-of-band abort rather than a failure.
    pub fn is_aborted(&self) -> bool {
        matches!(self, PromptError::Aborted)
    }
}
