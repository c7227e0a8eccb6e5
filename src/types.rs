//! Core error model shared by the classifier, localizer, and recovery engine.
//!
//! [`ErrorDetails`] is created exactly once per error episode by
//! [`create_error_details`](crate::classifier::create_error_details) and is
//! treated as read-only input everywhere else. There is no shared mutable
//! error state: each episode builds its own details from the raw signal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// High-level categorization of authentication-flow errors.
///
/// The eight values are the complete taxonomy; anything that matches no
/// known pattern is [`Unknown`](Self::Unknown), never a panic or an error
/// return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Credential and account-state failures (wrong password, locked account).
    Authentication,
    /// Form-input failures the user can correct in place.
    Validation,
    /// Connectivity and transport failures.
    Network,
    /// Client/realm misconfiguration; requires administrator intervention.
    Configuration,
    /// Permission failures; requires administrator intervention.
    Authorization,
    /// Expired or missing session/token state.
    Session,
    /// Failures inside the identity provider itself.
    Server,
    /// Anything that matched no known pattern.
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::Network => "network",
            Self::Configuration => "configuration",
            Self::Authorization => "authorization",
            Self::Session => "session",
            Self::Server => "server",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form key/value bag passed through from the caller.
///
/// Boolean flags (`isNetworkError`, `isValidationError`,
/// `isAuthenticationError`) are read by the classifier as a last-resort
/// signal; everything else is carried opaquely.
pub type ErrorContext = HashMap<String, serde_json::Value>;

/// Standardized description of one error occurrence.
///
/// Immutable once created; `category`, `severity`, and `recoverable` are
/// assigned at construction and never change afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Unique error code for identification (e.g. `INVALID_CREDENTIALS`).
    pub code: String,
    /// Error category for classification.
    pub category: ErrorCategory,
    /// Severity level of the error.
    pub severity: ErrorSeverity,
    /// User-friendly error message.
    pub message: String,
    /// Technical error details for debugging; only shown when the handler
    /// configuration explicitly permits it.
    pub technical_details: Option<String>,
    /// Human-readable recovery suggestions (not executable actions).
    pub recovery_hints: Vec<String>,
    /// Whether the user can plausibly self-resolve the condition.
    pub recoverable: bool,
    /// When the error occurred.
    pub timestamp: DateTime<Utc>,
    /// Additional context data.
    pub context: ErrorContext,
}

impl ErrorDetails {
    /// Read a boolean flag from the context bag, treating anything other
    /// than JSON `true` as unset.
    pub fn context_flag(&self, key: &str) -> bool {
        context_flag(&self.context, key)
    }
}

pub(crate) fn context_flag(context: &ErrorContext, key: &str) -> bool {
    matches!(context.get(key), Some(serde_json::Value::Bool(true)))
}
