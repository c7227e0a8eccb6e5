//! Recovery-action derivation and execution.
//!
//! [`RecoveryEngine::create_recovery_actions`] turns classified
//! [`ErrorDetails`] plus ambient context into an ordered list of executable
//! [`RecoveryAction`]s; [`RecoveryEngine::execute`] runs one with failure
//! containment. The engine holds no platform globals; every side effect goes
//! through the injected [`RecoveryEnvironment`].

use crate::environment::RecoveryEnvironment;
use crate::error::RecoveryResult;
use crate::logging::{log_debug, log_error};
use crate::types::{ErrorCategory, ErrorDetails, ErrorSeverity};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Kind of recovery an action performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Retry,
    Navigate,
    Contact,
    Refresh,
    Custom,
}

/// Zero-argument, possibly-asynchronous side-effecting operation bound to a
/// recovery action.
pub type ActionHandler = Arc<dyn Fn() -> BoxFuture<'static, RecoveryResult<()>> + Send + Sync>;

/// Wrap an async closure as an [`ActionHandler`].
pub fn action_handler<F, Fut>(f: F) -> ActionHandler
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RecoveryResult<()>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// One executable recovery option offered to the user.
///
/// `primary` marks the action a single-button UI should surface by default.
/// Primary is not unique within a list; callers pick by id or take the first
/// primary in order.
#[derive(Clone)]
pub struct RecoveryAction {
    /// Action identifier, unique within one produced list.
    pub id: String,
    /// Display label for the action.
    pub label: String,
    /// Action type.
    pub action_type: ActionType,
    /// Action handler function.
    pub handler: ActionHandler,
    /// Whether this is the primary action.
    pub primary: bool,
    /// Icon name to display with the action; opaque to this crate.
    pub icon: Option<String>,
}

impl fmt::Debug for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("action_type", &self.action_type)
            .field("primary", &self.primary)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// Ambient state for one error-handling episode, supplied by the
/// presentation layer from host-provided state.
#[derive(Clone, Default)]
pub struct RecoveryContext {
    /// Current page/route.
    pub current_page: Option<String>,
    /// Support email address.
    pub support_email: Option<String>,
    /// Base URL for navigation.
    pub base_url: Option<String>,
    /// Whether the user is authenticated.
    pub is_authenticated: bool,
    /// Custom recovery handlers, keyed by action id.
    pub custom_handlers: HashMap<String, ActionHandler>,
}

impl fmt::Debug for RecoveryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryContext")
            .field("current_page", &self.current_page)
            .field("support_email", &self.support_email)
            .field("base_url", &self.base_url)
            .field("is_authenticated", &self.is_authenticated)
            .field(
                "custom_handlers",
                &self.custom_handlers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl RecoveryContext {
    fn base_url_or_root(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| "/".to_string())
    }
}

/// Build a `mailto:` URI with URL-encoded subject and body.
pub fn mailto_uri(address: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{address}?subject={}&body={}",
        utf8_percent_encode(subject, NON_ALPHANUMERIC),
        utf8_percent_encode(body, NON_ALPHANUMERIC)
    )
}

/// Structured support-mail body: code, message, ISO-8601 timestamp,
/// category, severity, and technical details when present, one per line.
fn support_mail_body(details: &ErrorDetails) -> String {
    let mut body = format!(
        "Hello Support,\n\n\
         I encountered an error while using the platform:\n\n\
         Error Code: {}\n\
         Error Message: {}\n\
         Time: {}\n\
         Category: {}\n\
         Severity: {}\n",
        details.code,
        details.message,
        details.timestamp.to_rfc3339(),
        details.category,
        details.severity,
    );
    if let Some(technical) = &details.technical_details {
        body.push_str(&format!("Technical Details: {technical}\n"));
    }
    body.push_str("\nPlease help me resolve this issue.\n");
    body
}

/// Derives and executes recovery actions against an injected environment.
pub struct RecoveryEngine {
    env: Arc<dyn RecoveryEnvironment>,
    network_retry_delay: Duration,
}

impl fmt::Debug for RecoveryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryEngine")
            .field("network_retry_delay", &self.network_retry_delay)
            .finish_non_exhaustive()
    }
}

impl RecoveryEngine {
    /// Create an engine over the given environment with the default
    /// 1-second network-retry delay.
    pub fn new(env: Arc<dyn RecoveryEnvironment>) -> Self {
        Self {
            env,
            network_retry_delay: Duration::from_secs(1),
        }
    }

    /// Override the pre-reload delay used by the network retry action.
    pub fn with_network_retry_delay(mut self, delay: Duration) -> Self {
        self.network_retry_delay = delay;
        self
    }

    /// Creates recovery actions based on error details and context.
    ///
    /// Actions are appended in a fixed order: category-specific actions,
    /// then a generic retry when the error is recoverable, then navigation
    /// actions, then the support contact when an address is known. The list
    /// is not de-duplicated and may hold more than one primary action;
    /// first-appended primary wins for default-button binding.
    pub fn create_recovery_actions(
        &self,
        details: &ErrorDetails,
        context: &RecoveryContext,
    ) -> Vec<RecoveryAction> {
        let mut actions = Vec::new();

        match details.category {
            ErrorCategory::Authentication => {
                self.push_authentication_actions(&mut actions, details, context);
            }
            ErrorCategory::Validation => self.push_validation_actions(&mut actions),
            ErrorCategory::Network => self.push_network_actions(&mut actions),
            ErrorCategory::Session => self.push_session_actions(&mut actions, context),
            ErrorCategory::Server => self.push_server_actions(&mut actions, details),
            ErrorCategory::Configuration | ErrorCategory::Authorization => {
                self.push_admin_contact_action(&mut actions, details, context);
            }
            ErrorCategory::Unknown => self.push_generic_actions(&mut actions),
        }

        if details.recoverable {
            // Keep a single primary retry per list; the category-specific
            // retry (network) already claimed the slot when present
            let has_retry = actions.iter().any(|a| a.action_type == ActionType::Retry);
            actions.push(self.retry_action(!has_retry));
        }

        self.push_navigation_actions(&mut actions, context);

        if let Some(support_email) = &context.support_email {
            actions.push(self.support_action(support_email, details));
        }

        log_debug!(
            code = %details.code,
            category = %details.category,
            action_count = actions.len(),
            "Built recovery action list"
        );

        actions
    }

    fn navigate_action(
        &self,
        id: &str,
        label: &str,
        url: String,
        primary: bool,
        icon: Option<&str>,
    ) -> RecoveryAction {
        let env = Arc::clone(&self.env);
        RecoveryAction {
            id: id.to_string(),
            label: label.to_string(),
            action_type: ActionType::Navigate,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                let url = url.clone();
                async move { env.navigate(&url).await }
            }),
            primary,
            icon: icon.map(str::to_string),
        }
    }

    fn push_authentication_actions(
        &self,
        actions: &mut Vec<RecoveryAction>,
        details: &ErrorDetails,
        context: &RecoveryContext,
    ) {
        let base = context.base_url.clone().unwrap_or_default();

        if details.code == "INVALID_CREDENTIALS" {
            actions.push(self.navigate_action(
                "reset-password",
                "Reset Password",
                format!("{base}/reset-password"),
                false,
                Some("refresh-cw"),
            ));
        }

        if details.code == "USER_NOT_FOUND" {
            actions.push(self.navigate_action(
                "register",
                "Create Account",
                format!("{base}/register"),
                true,
                None,
            ));
        }
    }

    fn push_validation_actions(&self, actions: &mut Vec<RecoveryAction>) {
        // The primary move for a validation error is correcting the form
        let env = Arc::clone(&self.env);
        actions.push(RecoveryAction {
            id: "correct-form".to_string(),
            label: "Correct Form".to_string(),
            action_type: ActionType::Custom,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                async move { env.focus_first_invalid_field().await }
            }),
            primary: true,
            icon: None,
        });
    }

    fn push_network_actions(&self, actions: &mut Vec<RecoveryAction>) {
        // Wait a moment before retrying to allow network recovery
        let env = Arc::clone(&self.env);
        let delay = self.network_retry_delay;
        actions.push(RecoveryAction {
            id: "retry-connection".to_string(),
            label: "Check Connection & Retry".to_string(),
            action_type: ActionType::Retry,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                async move {
                    tokio::time::sleep(delay).await;
                    env.reload().await
                }
            }),
            primary: true,
            icon: Some("refresh-cw".to_string()),
        });
    }

    fn push_session_actions(&self, actions: &mut Vec<RecoveryAction>, context: &RecoveryContext) {
        // Session errors require re-authentication; stored tokens are
        // cleared before navigating so the login page starts clean
        let env = Arc::clone(&self.env);
        let base = context.base_url.clone().unwrap_or_default();
        actions.push(RecoveryAction {
            id: "login-again".to_string(),
            label: "Log In Again".to_string(),
            action_type: ActionType::Navigate,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                let url = format!("{base}/login");
                async move {
                    env.clear_auth_storage().await?;
                    env.navigate(&url).await
                }
            }),
            primary: true,
            icon: Some("log-in".to_string()),
        });
    }

    fn push_server_actions(&self, actions: &mut Vec<RecoveryAction>, details: &ErrorDetails) {
        if details.severity >= ErrorSeverity::High {
            let env = Arc::clone(&self.env);
            actions.push(RecoveryAction {
                id: "wait-and-retry".to_string(),
                label: "Try Again Later".to_string(),
                action_type: ActionType::Custom,
                handler: action_handler(move || {
                    let env = Arc::clone(&env);
                    async move {
                        env.show_notice(
                            "Please wait a few minutes before trying again. \
                             The service may be temporarily unavailable.",
                        )
                        .await
                    }
                }),
                primary: true,
                icon: None,
            });
        }
    }

    fn push_admin_contact_action(
        &self,
        actions: &mut Vec<RecoveryAction>,
        details: &ErrorDetails,
        context: &RecoveryContext,
    ) {
        let env = Arc::clone(&self.env);
        let uri = context.support_email.as_ref().map(|address| {
            mailto_uri(
                address,
                &format!("Configuration Error: {}", details.code),
                &format!("Error details: {}", details.message),
            )
        });
        actions.push(RecoveryAction {
            id: "contact-admin".to_string(),
            label: "Contact Administrator".to_string(),
            action_type: ActionType::Contact,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                let uri = uri.clone();
                async move {
                    // Without a support address there is nowhere to send
                    // the report; succeed quietly
                    match uri {
                        Some(uri) => env.open_mail_client(&uri).await,
                        None => Ok(()),
                    }
                }
            }),
            primary: true,
            icon: Some("alert-triangle".to_string()),
        });
    }

    fn push_generic_actions(&self, actions: &mut Vec<RecoveryAction>) {
        let env = Arc::clone(&self.env);
        actions.push(RecoveryAction {
            id: "refresh-page".to_string(),
            label: "Refresh Page".to_string(),
            action_type: ActionType::Refresh,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                async move { env.reload().await }
            }),
            primary: true,
            icon: Some("refresh-cw".to_string()),
        });
    }

    fn retry_action(&self, primary: bool) -> RecoveryAction {
        let env = Arc::clone(&self.env);
        RecoveryAction {
            id: "retry".to_string(),
            label: "Try Again".to_string(),
            action_type: ActionType::Retry,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                async move { env.reload().await }
            }),
            primary,
            icon: Some("refresh-cw".to_string()),
        }
    }

    fn push_navigation_actions(
        &self,
        actions: &mut Vec<RecoveryAction>,
        context: &RecoveryContext,
    ) {
        actions.push(self.navigate_action(
            "go-home",
            "Go to Homepage",
            context.base_url_or_root(),
            false,
            Some("home"),
        ));

        // Back action only makes sense off the main page
        let on_home = matches!(context.current_page.as_deref(), None | Some("home"));
        if !on_home {
            let env = Arc::clone(&self.env);
            let base = context.base_url_or_root();
            actions.push(RecoveryAction {
                id: "go-back".to_string(),
                label: "Go Back".to_string(),
                action_type: ActionType::Navigate,
                handler: action_handler(move || {
                    let env = Arc::clone(&env);
                    let base = base.clone();
                    async move {
                        if env.history_len() > 1 {
                            env.go_back().await
                        } else {
                            env.navigate(&base).await
                        }
                    }
                }),
                primary: false,
                icon: Some("arrow-left".to_string()),
            });
        }
    }

    fn support_action(&self, support_email: &str, details: &ErrorDetails) -> RecoveryAction {
        let env = Arc::clone(&self.env);
        let uri = mailto_uri(
            support_email,
            &format!("Error Report: {}", details.code),
            &support_mail_body(details),
        );
        RecoveryAction {
            id: "contact-support".to_string(),
            label: "Contact Support".to_string(),
            action_type: ActionType::Contact,
            handler: action_handler(move || {
                let env = Arc::clone(&env);
                let uri = uri.clone();
                async move { env.open_mail_client(&uri).await }
            }),
            primary: false,
            icon: Some("mail".to_string()),
        }
    }

    /// Open an external status page in a new browsing context.
    ///
    /// Used by the maintenance presentation's "status updates" affordance.
    /// Failures are logged and swallowed; there is no sensible fallback.
    pub async fn open_status_page(&self, url: &str) {
        if let Err(error) = self.env.open_external(url).await {
            log_error!(url = %url, error = %error, "Failed to open status page");
        }
    }

    /// Executes a recovery action with failure containment.
    ///
    /// A failing handler is logged and, unless the action itself was a
    /// retry, papered over with a full page reload so the user is never left
    /// on a dead screen. A failing retry performs no fallback; reloading
    /// again would just loop on the same failure.
    pub async fn execute(&self, action: &RecoveryAction) {
        log_debug!(
            action_id = %action.id,
            action_type = ?action.action_type,
            "Executing recovery action"
        );

        if let Err(error) = (action.handler)().await {
            log_error!(
                action_id = %action.id,
                error = %error,
                "Failed to execute recovery action"
            );

            if action.action_type != ActionType::Retry {
                if let Err(reload_error) = self.env.reload().await {
                    log_error!(
                        action_id = %action.id,
                        error = %reload_error,
                        "Fallback reload failed"
                    );
                }
            }
        }
    }
}
