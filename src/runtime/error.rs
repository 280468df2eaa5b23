//! Runtime-specific error types

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the runtime context and shutdown machinery
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The current-application accessor was used with an empty slot
    #[error("There is no started application")]
    NoStartedApplication,

    /// An application's stop signal did not resolve within the configured wait
    #[error("Shutdown did not complete within {waited:?}")]
    ShutdownTimeout {
        /// How long the context waited before giving up
        waited: Duration,
    },

    /// A shutdown hook failed while the registry was draining
    #[error("Shutdown hook '{hook}' failed: {message}")]
    HookFailed {
        /// Name the hook was registered under
        hook: String,
        /// Error message
        message: String,
    },
}

impl RuntimeError {
    /// Create a hook failure error
    pub fn hook_failed(hook: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HookFailed {
            hook: hook.into(),
            message: message.into(),
        }
    }
}

/// A specialized Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
