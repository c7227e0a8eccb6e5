//! Error classification.
//!
//! Maps an error code, free-text message, HTTP status, and/or context flags
//! to a `(category, severity)` pair. Resolution is a strict priority chain,
//! first match wins:
//!
//! 1. exact code match against the known-code table
//! 2. exact HTTP status match
//! 3. case-insensitive phrase match against the message
//! 4. boolean context flags
//! 5. default `(Unknown, Medium)`
//!
//! This module never fails; absent or unrecognized input always resolves to
//! a valid default.

use crate::logging::{log_debug, log_error, log_warn};
use crate::types::{context_flag, ErrorCategory, ErrorContext, ErrorDetails, ErrorSeverity};
use chrono::Utc;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use ErrorCategory::*;
use ErrorSeverity::*;

/// Known error codes and their classification.
static ERROR_PATTERNS: Lazy<HashMap<&'static str, (ErrorCategory, ErrorSeverity)>> =
    Lazy::new(|| {
        HashMap::from([
            // Authentication errors
            ("INVALID_CREDENTIALS", (Authentication, Medium)),
            ("INVALID_USER_CREDENTIALS", (Authentication, Medium)),
            ("ACCOUNT_DISABLED", (Authentication, High)),
            ("ACCOUNT_TEMPORARILY_DISABLED", (Authentication, High)),
            ("USER_NOT_FOUND", (Authentication, Medium)),
            ("LOGIN_TIMEOUT", (Session, Medium)),
            // Validation errors
            ("INVALID_EMAIL", (Validation, Low)),
            ("PASSWORD_TOO_WEAK", (Validation, Medium)),
            ("REQUIRED_FIELD_MISSING", (Validation, Low)),
            ("INVALID_PASSWORD_FORMAT", (Validation, Low)),
            ("EMAIL_ALREADY_EXISTS", (Validation, Medium)),
            ("USERNAME_ALREADY_EXISTS", (Validation, Medium)),
            // Network errors
            ("NETWORK_ERROR", (Network, Medium)),
            ("CONNECTION_TIMEOUT", (Network, Medium)),
            ("SERVICE_UNAVAILABLE", (Network, High)),
            ("REQUEST_TIMEOUT", (Network, Medium)),
            // Configuration errors
            ("INVALID_CLIENT", (Configuration, Critical)),
            ("INVALID_REDIRECT_URI", (Configuration, High)),
            ("UNSUPPORTED_RESPONSE_TYPE", (Configuration, High)),
            ("INVALID_SCOPE", (Configuration, Medium)),
            // Authorization errors
            ("ACCESS_DENIED", (Authorization, High)),
            ("INSUFFICIENT_PERMISSIONS", (Authorization, High)),
            ("TOKEN_EXPIRED", (Session, Medium)),
            ("INVALID_TOKEN", (Session, Medium)),
            // Session errors
            ("SESSION_EXPIRED", (Session, Medium)),
            ("SESSION_NOT_FOUND", (Session, Medium)),
            ("CONCURRENT_SESSION_LIMIT", (Session, Medium)),
            // Server errors
            ("INTERNAL_SERVER_ERROR", (Server, Critical)),
            ("DATABASE_ERROR", (Server, Critical)),
            ("SERVICE_MAINTENANCE", (Server, High)),
        ])
    });

/// HTTP status code mappings.
fn http_status_pattern(status: u16) -> Option<(ErrorCategory, ErrorSeverity)> {
    match status {
        400 => Some((Validation, Low)),
        401 => Some((Authentication, Medium)),
        403 => Some((Authorization, High)),
        404 => Some((Configuration, Medium)),
        408 => Some((Network, Medium)),
        429 => Some((Server, Medium)),
        500 => Some((Server, Critical)),
        502 => Some((Network, High)),
        503 => Some((Server, High)),
        504 => Some((Network, High)),
        _ => None,
    }
}

/// Phrase matching against a lowercased message, in fixed priority order.
fn message_pattern(message: &str) -> Option<(ErrorCategory, ErrorSeverity)> {
    let message = message.to_lowercase();
    let contains_any = |phrases: &[&str]| phrases.iter().any(|p| message.contains(p));

    // Authentication patterns
    if contains_any(&["invalid credentials", "wrong password"]) {
        return Some((Authentication, Medium));
    }
    if contains_any(&["account locked", "account disabled"]) {
        return Some((Authentication, High));
    }
    if contains_any(&["user not found", "unknown user"]) {
        return Some((Authentication, Medium));
    }

    // Validation patterns
    if contains_any(&["invalid email", "email format"]) {
        return Some((Validation, Low));
    }
    if message.contains("password") && contains_any(&["weak", "requirements"]) {
        return Some((Validation, Medium));
    }
    if contains_any(&["required field", "missing field"]) {
        return Some((Validation, Low));
    }

    // Network patterns
    if contains_any(&["network", "connection"]) {
        return Some((Network, Medium));
    }
    if message.contains("timeout") {
        return Some((Network, Medium));
    }
    if contains_any(&["service unavailable", "server unavailable"]) {
        return Some((Server, High));
    }

    // Session patterns
    if contains_any(&["session expired", "session timeout"]) {
        return Some((Session, Medium));
    }
    if contains_any(&["token expired", "invalid token"]) {
        return Some((Session, Medium));
    }

    // Authorization patterns
    if contains_any(&["access denied", "forbidden"]) {
        return Some((Authorization, High));
    }
    if contains_any(&["insufficient permissions", "not authorized"]) {
        return Some((Authorization, High));
    }

    None
}

/// Classify an error from whatever signals are available.
///
/// Each signal source is consulted in turn; the first that matches decides
/// both category and severity. With no usable signal the result is
/// `(Unknown, Medium)`.
pub fn classify(
    code: Option<&str>,
    message: Option<&str>,
    http_status: Option<u16>,
    context: Option<&ErrorContext>,
) -> (ErrorCategory, ErrorSeverity) {
    if let Some(pattern) = code.and_then(|c| ERROR_PATTERNS.get(c)) {
        return *pattern;
    }

    if let Some(pattern) = http_status.and_then(http_status_pattern) {
        return pattern;
    }

    if let Some(pattern) = message.and_then(message_pattern) {
        return pattern;
    }

    if let Some(context) = context {
        if context_flag(context, "isNetworkError") {
            return (Network, Medium);
        }
        if context_flag(context, "isValidationError") {
            return (Validation, Low);
        }
        if context_flag(context, "isAuthenticationError") {
            return (Authentication, Medium);
        }
    }

    (Unknown, Medium)
}

/// Determines if an error is recoverable based on category and severity.
fn is_recoverable(category: ErrorCategory, severity: ErrorSeverity) -> bool {
    // Critical errors are not recoverable regardless of category
    if severity == Critical {
        return false;
    }

    match category {
        Network | Session | Validation => true,
        // Account locked/disabled is not immediately recoverable
        Authentication => severity != High,
        // Temporary server issues might be recoverable
        Server => severity == Medium,
        // Require admin intervention
        Configuration | Authorization => false,
        Unknown => severity == Low || severity == Medium,
    }
}

/// Default recovery suggestions for an error category.
fn default_recovery_hints(category: ErrorCategory) -> Vec<String> {
    let hints: &[&str] = match category {
        Authentication => &[
            "Check your credentials and try again",
            "Reset your password if needed",
        ],
        Validation => &[
            "Review the form fields and correct any errors",
            "Ensure all required fields are filled",
        ],
        Network => &["Check your internet connection", "Try again in a few moments"],
        Session => &["Log in again", "Clear your browser cache and cookies"],
        Server => &["Try again later", "Contact support if the problem persists"],
        Configuration => &["Contact your system administrator"],
        Authorization => &["Contact support for access permissions"],
        Unknown => &["Try again", "Contact support if the problem continues"],
    };
    hints.iter().map(|h| (*h).to_string()).collect()
}

/// Optional inputs for [`create_error_details`].
#[derive(Debug, Clone, Default)]
pub struct DetailsOptions {
    /// Diagnostic details (e.g. a backtrace), shown only when configured.
    pub technical_details: Option<String>,
    /// HTTP status accompanying the error, if any.
    pub http_status: Option<u16>,
    /// Caller-supplied context bag.
    pub context: Option<ErrorContext>,
    /// Explicit recovery suggestions; defaults per category when absent.
    pub recovery_hints: Option<Vec<String>>,
}

/// Creates a standardized [`ErrorDetails`] from an error signal.
///
/// Classification, recoverability, and default recovery hints are all
/// computed here, once; the returned value is read-only input for the
/// localizer and recovery engine. Logs the classification at a level
/// matching the derived severity.
pub fn create_error_details(code: &str, message: &str, options: DetailsOptions) -> ErrorDetails {
    let (category, severity) = classify(
        Some(code),
        Some(message),
        options.http_status,
        options.context.as_ref(),
    );

    match severity {
        Critical | High => log_error!(
            code = %code,
            category = %category,
            severity = %severity,
            "Classified error"
        ),
        Medium => log_warn!(
            code = %code,
            category = %category,
            severity = %severity,
            "Classified error"
        ),
        Low => log_debug!(
            code = %code,
            category = %category,
            severity = %severity,
            "Classified error"
        ),
    }

    ErrorDetails {
        code: code.to_string(),
        category,
        severity,
        message: message.to_string(),
        technical_details: options.technical_details,
        recovery_hints: options
            .recovery_hints
            .unwrap_or_else(|| default_recovery_hints(category)),
        recoverable: is_recoverable(category, severity),
        timestamp: Utc::now(),
        context: options.context.unwrap_or_default(),
    }
}
