//! Cancellation: a shared flag plus an optional cleanup hook.
//!
//! Ctrl-C inside a keypress loop triggers the token. The prompter notices
//! at the top of its next loop iteration, runs the caller's hook, and
//! returns `PromptError::Aborted`. Terminating the process is left to the
//! caller (the `keyprompt` binary exits with 130).

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Caller-supplied cleanup, run once per observed abort.
pub type ShutdownHook = Box<dyn FnMut() + Send>;

/// Cloneable cancellation flag. All clones observe the same state.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
