//! Episode orchestration.
//!
//! The controller is the consuming side of the classifier, localizer, and
//! recovery engine: it turns a raw error signal into an [`ErrorEpisode`]
//! (details, localized message, ranked actions) and runs user-chosen actions
//! with the retry-count ceiling applied. One controller instance owns one
//! episode's retry state; create a fresh one per error occurrence.

use crate::classifier::{create_error_details, DetailsOptions};
use crate::config::HandlerConfig;
use crate::error::RecoveryResult;
use crate::logging::{log_debug, log_warn};
use crate::messages::get_localized_message;
use crate::recovery::{ActionType, RecoveryAction, RecoveryContext, RecoveryEngine};
use crate::types::{ErrorContext, ErrorDetails};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

/// Raw error signal as received from the host, before classification.
#[derive(Debug, Clone, Default)]
pub struct ErrorSignal {
    /// Error code if available.
    pub code: Option<String>,
    /// Human or technical message text.
    pub message: Option<String>,
    /// HTTP status code if available.
    pub http_status: Option<u16>,
    /// Diagnostic details (e.g. a backtrace).
    pub technical_details: Option<String>,
    /// Additional context for classification and recovery.
    pub context: ErrorContext,
}

/// One error occurrence, fully prepared for presentation: classified
/// details, display text, and the ordered action list.
#[derive(Debug)]
pub struct ErrorEpisode {
    /// Correlation id for logs.
    pub id: Uuid,
    /// Classified, immutable error details.
    pub details: ErrorDetails,
    /// Localized display message.
    pub message: String,
    /// Ordered recovery actions; custom actions first, then engine defaults.
    pub actions: Vec<RecoveryAction>,
}

impl ErrorEpisode {
    /// First-appended primary action, the one a single-button UI surfaces.
    pub fn primary_action(&self) -> Option<&RecoveryAction> {
        self.actions.iter().find(|a| a.primary)
    }

    /// Look up an action by id.
    pub fn action(&self, id: &str) -> Option<&RecoveryAction> {
        self.actions.iter().find(|a| a.id == id)
    }
}

/// Drives one error episode from raw signal to executed recovery.
pub struct ErrorController {
    config: HandlerConfig,
    engine: RecoveryEngine,
    retry_count: u32,
}

impl ErrorController {
    /// Create a controller after validating its configuration.
    pub fn new(config: HandlerConfig, engine: RecoveryEngine) -> RecoveryResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine,
            retry_count: 0,
        })
    }

    /// Build an episode from a raw signal.
    ///
    /// Missing code and message fall back to `UNKNOWN_ERROR` and a generic
    /// text before classification. `custom_actions` are prepended ahead of
    /// the engine-built defaults; the handler config's support email fills
    /// the recovery context when the caller left it unset.
    pub fn begin_episode(
        &self,
        signal: ErrorSignal,
        recovery_context: &RecoveryContext,
        locale: Option<&str>,
        custom_actions: Vec<RecoveryAction>,
    ) -> ErrorEpisode {
        let code = signal.code.as_deref().unwrap_or("UNKNOWN_ERROR");
        let message = signal
            .message
            .as_deref()
            .unwrap_or("An unexpected error occurred");

        let details = create_error_details(
            code,
            message,
            DetailsOptions {
                technical_details: signal.technical_details,
                http_status: signal.http_status,
                context: Some(signal.context),
                recovery_hints: None,
            },
        );

        let locale = locale.unwrap_or(self.config.default_locale.as_str());
        let message = self
            .config
            .message_override(&details.code, locale)
            .map(str::to_string)
            .unwrap_or_else(|| {
                get_localized_message(&details.code, locale, Some(&details.message))
            });

        let mut context = recovery_context.clone();
        if context.support_email.is_none() {
            context.support_email = self.config.support_email.clone();
        }

        let mut actions = custom_actions;
        actions.extend(self.engine.create_recovery_actions(&details, &context));

        let episode = ErrorEpisode {
            id: Uuid::new_v4(),
            details,
            message,
            actions,
        };
        log_debug!(
            episode_id = %episode.id,
            code = %episode.details.code,
            category = %episode.details.category,
            locale = %locale,
            "Began error episode"
        );
        episode
    }

    /// Technical details for display, gated on configuration.
    pub fn technical_details<'a>(&self, episode: &'a ErrorEpisode) -> Option<&'a str> {
        if self.config.show_technical_details {
            episode.details.technical_details.as_deref()
        } else {
            None
        }
    }

    /// Retry-type executions so far in this episode.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Execute the episode's action with the given id.
    ///
    /// Retry-type actions count against the configured ceiling; once it is
    /// reached, further retry requests run the episode's `contact-support`
    /// action instead of the retry handler. Unknown ids are logged and
    /// ignored. Never fails; the engine contains handler errors.
    pub async fn run_action(&mut self, episode: &ErrorEpisode, action_id: &str) {
        let Some(action) = episode.action(action_id) else {
            log_warn!(
                episode_id = %episode.id,
                action_id = %action_id,
                "Requested recovery action not in episode"
            );
            return;
        };

        if action.action_type == ActionType::Retry {
            if self.retry_count >= self.config.max_retry_attempts {
                log_warn!(
                    episode_id = %episode.id,
                    retry_count = self.retry_count,
                    max_retry_attempts = self.config.max_retry_attempts,
                    "Retry ceiling reached, redirecting to support contact"
                );
                if let Some(support) = episode.action("contact-support") {
                    self.engine.execute(support).await;
                }
                return;
            }
            self.retry_count += 1;
        }

        self.engine.execute(action).await;
    }
}

/// Cancelable countdown used by the maintenance-mode presentation.
///
/// Ticks once per second while enabled; when the countdown reaches zero the
/// retry callback fires and the countdown resets. Clearing the enabled flag
/// stops the loop with no further side effects.
pub struct AutoRetryTimer {
    interval_secs: u32,
    enabled: Arc<AtomicBool>,
    remaining_tx: watch::Sender<u32>,
}

impl AutoRetryTimer {
    /// Create a timer that fires every `interval_secs` seconds.
    pub fn new(interval_secs: u32) -> Self {
        let (remaining_tx, _) = watch::channel(interval_secs);
        Self {
            interval_secs,
            enabled: Arc::new(AtomicBool::new(true)),
            remaining_tx,
        }
    }

    /// Enable or disable auto-retry. Disabling stops a running loop at its
    /// next tick boundary without firing the callback again.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Observe the remaining seconds for countdown display.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining_tx.subscribe()
    }

    /// Run the countdown loop until disabled.
    ///
    /// `on_retry` is invoked (and awaited) each time the countdown reaches
    /// zero. Returns once the enabled flag is cleared.
    pub async fn run<F, Fut>(&self, mut on_retry: F)
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let mut remaining = self.interval_secs;
        let _ = self.remaining_tx.send(remaining);

        loop {
            if !self.is_enabled() {
                return;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
            // Re-check after sleeping so a toggle during the tick wins
            if !self.is_enabled() {
                return;
            }

            remaining = remaining.saturating_sub(1);
            let _ = self.remaining_tx.send(remaining);

            if remaining == 0 {
                log_debug!(interval_secs = self.interval_secs, "Auto-retry firing");
                on_retry().await;
                remaining = self.interval_secs;
                let _ = self.remaining_tx.send(remaining);
            }
        }
    }
}
