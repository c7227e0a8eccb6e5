//! Failure type for the recovery-execution path.
//!
//! Classification and localization never fail: every input, however
//! malformed, resolves to a default category or the universal fallback
//! string. [`RecoveryError`] covers the only fallible surface of the crate,
//! which is the environment-facing side of recovery execution and handler
//! configuration.
//!
//! # Result Type
//!
//! Use [`RecoveryResult<T>`] as a convenient alias for
//! `Result<T, RecoveryError>`.

use crate::logging::log_error;
use thiserror::Error;

/// Convenient result type for recovery operations.
pub type RecoveryResult<T> = std::result::Result<T, RecoveryError>;

/// Errors that can occur while configuring or executing recovery.
///
/// Note that [`RecoveryEngine::execute`](crate::recovery::RecoveryEngine::execute)
/// never surfaces these to the caller; a failing handler is logged and
/// contained there. The variants exist for the environment implementations
/// and for configuration validation.
#[derive(Error, Debug)]
pub enum RecoveryError {
    /// Handler configuration is invalid or incomplete.
    #[error("Handler configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// An environment capability (navigation, mail client, storage) failed.
    #[error("Environment operation failed: {message}")]
    Environment {
        /// Description of the failure.
        message: String,
    },

    /// A recovery action's handler failed.
    #[error("Recovery action '{action_id}' failed: {message}")]
    ActionFailed {
        /// The id of the action that failed.
        action_id: String,
        /// Details about the failure.
        message: String,
    },
}

impl RecoveryError {
    /// Create a configuration error (logs at ERROR level).
    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration",
            message = %message,
            "Recovery handler configuration invalid"
        );
        Self::Configuration { message }
    }

    /// Create an environment error (logs at ERROR level).
    pub fn environment(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "environment",
            message = %message,
            "Recovery environment operation failed"
        );
        Self::Environment { message }
    }

    pub fn action_failed(action_id: impl Into<String>, message: impl Into<String>) -> Self {
        let action_id = action_id.into();
        let message = message.into();
        log_error!(
            error_type = "action_failed",
            action_id = %action_id,
            message = %message,
            "Recovery action execution failed"
        );
        Self::ActionFailed { action_id, message }
    }
}
