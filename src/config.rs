//! Handler configuration.

use crate::error::{RecoveryError, RecoveryResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message overrides keyed by error code, then locale.
pub type MessageOverrides = HashMap<String, HashMap<String, String>>;

/// Configuration for one error controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Default locale for error messages.
    pub default_locale: String,
    /// Whether technical details may be shown to users.
    pub show_technical_details: bool,
    /// Maximum number of retry attempts per episode.
    pub max_retry_attempts: u32,
    /// Support email for contact actions.
    pub support_email: Option<String>,
    /// Custom error message overrides, consulted before the built-in table.
    pub custom_messages: MessageOverrides,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            show_technical_details: false,
            max_retry_attempts: 3,
            support_email: None,
            custom_messages: MessageOverrides::new(),
        }
    }
}

impl HandlerConfig {
    /// Validate the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RecoveryError::Configuration`] if the default locale is
    /// empty, the retry ceiling is zero, or a support email is present but
    /// not addressable.
    pub fn validate(&self) -> RecoveryResult<()> {
        if self.default_locale.is_empty() {
            return Err(RecoveryError::configuration("default locale is empty"));
        }
        if self.max_retry_attempts == 0 {
            return Err(RecoveryError::configuration(
                "max retry attempts must be at least 1",
            ));
        }
        if let Some(email) = &self.support_email {
            if !email.contains('@') {
                return Err(RecoveryError::configuration(format!(
                    "support email '{email}' is not a valid address"
                )));
            }
        }
        Ok(())
    }

    /// Look up a message override for `(code, locale)`, falling back to the
    /// override's English entry.
    pub(crate) fn message_override(&self, code: &str, locale: &str) -> Option<&str> {
        let entry = self.custom_messages.get(code)?;
        entry
            .get(locale)
            .or_else(|| entry.get("en"))
            .map(String::as_str)
    }
}
