//! # auth-recovery
//!
//! Error categorization, localized messaging, and recovery-action
//! orchestration for branded authentication UIs.
//!
//! ## Key Features
//!
//! - **Classification**: maps error codes, messages, HTTP statuses, and
//!   context flags to a `(category, severity)` pair through a strict
//!   priority chain; never fails, unmatched input is `unknown`
//! - **Localization**: static five-locale message table with a fallback
//!   chain that always terminates in the English `UNKNOWN_ERROR` text
//! - **Recovery**: derives an ordered, ranked list of executable recovery
//!   actions from the classified error and ambient context, and executes
//!   them with failure containment
//! - **Portability**: all side effects go through the injected
//!   [`RecoveryEnvironment`] capability trait, so the engine runs the same
//!   against a browser bridge or a test double
//!
//! ## Example
//!
//! ```rust,no_run
//! use auth_recovery::{
//!     ErrorController, ErrorSignal, HandlerConfig, RecoveryContext, RecoveryEngine,
//!     RecoveryEnvironment,
//! };
//! use std::sync::Arc;
//!
//! # async fn example(env: Arc<dyn RecoveryEnvironment>) -> auth_recovery::RecoveryResult<()> {
//! let engine = RecoveryEngine::new(env);
//! let mut controller = ErrorController::new(HandlerConfig::default(), engine)?;
//!
//! let context = RecoveryContext {
//!     current_page: Some("login".to_string()),
//!     base_url: Some("https://auth.example.com".to_string()),
//!     ..Default::default()
//! };
//! let signal = ErrorSignal {
//!     code: Some("INVALID_CREDENTIALS".to_string()),
//!     message: Some("Invalid credentials".to_string()),
//!     ..Default::default()
//! };
//!
//! let episode = controller.begin_episode(signal, &context, Some("es"), Vec::new());
//! // render episode.message and episode.actions, then:
//! controller.run_action(&episode, "reset-password").await;
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod controller;
pub mod environment;
pub mod error;
pub mod messages;
pub mod recovery;
pub mod types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use classifier::{classify, create_error_details, DetailsOptions};
pub use config::{HandlerConfig, MessageOverrides};
pub use controller::{AutoRetryTimer, ErrorController, ErrorEpisode, ErrorSignal};
pub use environment::RecoveryEnvironment;
pub use error::{RecoveryError, RecoveryResult};
pub use messages::{available_locales, get_localized_message, UNKNOWN_ERROR};
pub use recovery::{
    action_handler, mailto_uri, ActionHandler, ActionType, RecoveryAction, RecoveryContext,
    RecoveryEngine,
};
pub use types::{ErrorCategory, ErrorContext, ErrorDetails, ErrorSeverity};
