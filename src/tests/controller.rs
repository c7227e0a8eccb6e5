// Unit Tests for Episode Orchestration
//
// UNIT UNDER TEST: ErrorController, AutoRetryTimer
//
// BUSINESS RESPONSIBILITY:
//   - Builds presentable episodes from raw error signals (classification,
//     localization with overrides, ranked actions with custom prepends)
//   - Enforces the per-episode retry ceiling, redirecting exhausted retries
//     to the support contact
//   - Gates technical details on configuration
//   - Runs the cancelable maintenance-mode auto-retry countdown
//
// TEST COVERAGE:
//   - Configuration validation failure modes
//   - Signal defaulting, localization, and override precedence
//   - Retry ceiling behavior at and past the limit
//   - Auto-retry firing cadence and cancellation semantics

use crate::config::HandlerConfig;
use crate::controller::{AutoRetryTimer, ErrorController, ErrorSignal};
use crate::environment::MockRecoveryEnvironment;
use crate::recovery::{action_handler, ActionType, RecoveryAction, RecoveryContext, RecoveryEngine};
use crate::types::{ErrorCategory, ErrorSeverity};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn controller_with(mock: MockRecoveryEnvironment, config: HandlerConfig) -> ErrorController {
    let engine = RecoveryEngine::new(Arc::new(mock)).with_network_retry_delay(Duration::ZERO);
    ErrorController::new(config, engine).expect("config should validate")
}

fn signal(code: &str) -> ErrorSignal {
    ErrorSignal {
        code: Some(code.to_string()),
        message: Some("raw message".to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod configuration_tests {
    use super::*;

    fn engine() -> RecoveryEngine {
        RecoveryEngine::new(Arc::new(MockRecoveryEnvironment::new()))
    }

    #[test]
    fn test_default_configuration_validates() {
        assert!(ErrorController::new(HandlerConfig::default(), engine()).is_ok());
    }

    #[test]
    fn test_empty_locale_is_rejected() {
        let config = HandlerConfig {
            default_locale: String::new(),
            ..Default::default()
        };
        assert!(ErrorController::new(config, engine()).is_err());
    }

    #[test]
    fn test_zero_retry_ceiling_is_rejected() {
        let config = HandlerConfig {
            max_retry_attempts: 0,
            ..Default::default()
        };
        assert!(ErrorController::new(config, engine()).is_err());
    }

    #[test]
    fn test_unaddressable_support_email_is_rejected() {
        let config = HandlerConfig {
            support_email: Some("not-an-address".to_string()),
            ..Default::default()
        };
        assert!(ErrorController::new(config, engine()).is_err());
    }
}

#[cfg(test)]
mod episode_tests {
    use super::*;

    #[test]
    fn test_episode_classifies_and_localizes() {
        // Arrange
        let controller = controller_with(MockRecoveryEnvironment::new(), HandlerConfig::default());
        let context = RecoveryContext::default();

        // Act
        let episode = controller.begin_episode(
            signal("INVALID_CREDENTIALS"),
            &context,
            Some("es"),
            Vec::new(),
        );

        // Assert
        assert_eq!(episode.details.category, ErrorCategory::Authentication);
        assert_eq!(episode.details.severity, ErrorSeverity::Medium);
        assert!(episode.details.recoverable);
        assert!(episode
            .message
            .starts_with("Nombre de usuario o contraseña inválidos"));
    }

    #[test]
    fn test_missing_code_and_message_fall_back_to_defaults() {
        let controller = controller_with(MockRecoveryEnvironment::new(), HandlerConfig::default());

        let episode = controller.begin_episode(
            ErrorSignal::default(),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );

        assert_eq!(episode.details.code, "UNKNOWN_ERROR");
        assert_eq!(episode.details.category, ErrorCategory::Unknown);
        assert!(episode.message.starts_with("An unexpected error occurred"));
    }

    #[test]
    fn test_custom_message_override_wins_over_table() {
        // Arrange
        let mut config = HandlerConfig::default();
        config.custom_messages.insert(
            "INVALID_CREDENTIALS".to_string(),
            [("en".to_string(), "Branded credentials text".to_string())]
                .into_iter()
                .collect(),
        );
        let controller = controller_with(MockRecoveryEnvironment::new(), config);

        // Act
        let episode = controller.begin_episode(
            signal("INVALID_CREDENTIALS"),
            &RecoveryContext::default(),
            Some("en"),
            Vec::new(),
        );

        // Assert
        assert_eq!(episode.message, "Branded credentials text");
    }

    #[test]
    fn test_custom_actions_are_prepended() {
        let controller = controller_with(MockRecoveryEnvironment::new(), HandlerConfig::default());
        let custom = RecoveryAction {
            id: "custom-help".to_string(),
            label: "Open Help".to_string(),
            action_type: ActionType::Custom,
            handler: action_handler(|| async { Ok(()) }),
            primary: false,
            icon: None,
        };

        let episode = controller.begin_episode(
            signal("NETWORK_ERROR"),
            &RecoveryContext::default(),
            None,
            vec![custom],
        );

        assert_eq!(episode.actions[0].id, "custom-help");
        assert!(episode.actions.iter().any(|a| a.id == "retry-connection"));
    }

    #[test]
    fn test_config_support_email_fills_recovery_context() {
        // Support address comes from the handler config when the caller's
        // context leaves it unset, so contact-support is still offered
        let config = HandlerConfig {
            support_email: Some("help@example.com".to_string()),
            ..Default::default()
        };
        let controller = controller_with(MockRecoveryEnvironment::new(), config);

        let episode = controller.begin_episode(
            signal("NETWORK_ERROR"),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );

        assert!(episode.actions.iter().any(|a| a.id == "contact-support"));
    }

    #[test]
    fn test_primary_action_is_first_appended_primary() {
        let controller = controller_with(MockRecoveryEnvironment::new(), HandlerConfig::default());

        let episode = controller.begin_episode(
            signal("NETWORK_ERROR"),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );

        let primary = episode.primary_action().expect("a primary action exists");
        assert_eq!(primary.id, "retry-connection");
    }

    #[test]
    fn test_technical_details_are_gated_on_config() {
        let mut raw = signal("INTERNAL_SERVER_ERROR");
        raw.technical_details = Some("stack trace".to_string());

        let hidden = controller_with(MockRecoveryEnvironment::new(), HandlerConfig::default());
        let episode = hidden.begin_episode(
            raw.clone(),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );
        assert_eq!(hidden.technical_details(&episode), None);

        let shown = controller_with(
            MockRecoveryEnvironment::new(),
            HandlerConfig {
                show_technical_details: true,
                ..Default::default()
            },
        );
        let episode = shown.begin_episode(raw, &RecoveryContext::default(), None, Vec::new());
        assert_eq!(shown.technical_details(&episode), Some("stack trace"));
    }
}

#[cfg(test)]
mod retry_ceiling_tests {
    use super::*;

    #[tokio::test]
    async fn test_retries_redirect_to_support_at_ceiling() {
        // Test verifies the maximum-retries condition redirects the user to
        // the support contact instead of silently repeating a failing retry

        // Arrange: two allowed retries, then the third request must open
        // the mail composer instead of reloading again
        let mut mock = MockRecoveryEnvironment::new();
        mock.expect_reload().times(2).returning(|| Ok(()));
        mock.expect_open_mail_client().times(1).returning(|_| Ok(()));
        let config = HandlerConfig {
            max_retry_attempts: 2,
            support_email: Some("help@example.com".to_string()),
            ..Default::default()
        };
        let mut controller = controller_with(mock, config);
        let episode = controller.begin_episode(
            signal("SESSION_EXPIRED"),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );

        // Act
        controller.run_action(&episode, "retry").await;
        controller.run_action(&episode, "retry").await;
        controller.run_action(&episode, "retry").await;

        // Assert
        assert_eq!(controller.retry_count(), 2);
    }

    #[tokio::test]
    async fn test_non_retry_actions_ignore_the_ceiling() {
        let mut mock = MockRecoveryEnvironment::new();
        mock.expect_navigate().times(3).returning(|_| Ok(()));
        let config = HandlerConfig {
            max_retry_attempts: 1,
            ..Default::default()
        };
        let mut controller = controller_with(mock, config);
        let episode = controller.begin_episode(
            signal("NETWORK_ERROR"),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );

        for _ in 0..3 {
            controller.run_action(&episode, "go-home").await;
        }
        assert_eq!(controller.retry_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_action_id_is_ignored() {
        let mut controller =
            controller_with(MockRecoveryEnvironment::new(), HandlerConfig::default());
        let episode = controller.begin_episode(
            signal("NETWORK_ERROR"),
            &RecoveryContext::default(),
            None,
            Vec::new(),
        );

        // Must not panic and must not touch the environment
        controller.run_action(&episode, "no-such-action").await;
    }
}

#[cfg(test)]
mod auto_retry_timer_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_on_interval_and_resets() {
        // Arrange
        let timer = Arc::new(AutoRetryTimer::new(3));
        let fired = Arc::new(AtomicU32::new(0));
        let run_timer = Arc::clone(&timer);
        let run_fired = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            run_timer
                .run(move || {
                    let fired = Arc::clone(&run_fired);
                    async move {
                        fired.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .await;
        });

        // Act & Assert: first firing after the full interval
        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        // Countdown resets and fires again
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        timer.set_enabled(false);
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.await.expect("timer task should exit cleanly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabling_stops_ticks_with_no_further_side_effects() {
        // Arrange
        let timer = Arc::new(AutoRetryTimer::new(5));
        let fired = Arc::new(AtomicU32::new(0));
        let run_timer = Arc::clone(&timer);
        let run_fired = Arc::clone(&fired);
        let handle = tokio::spawn(async move {
            run_timer
                .run(move || {
                    let fired = Arc::clone(&run_fired);
                    async move {
                        fired.fetch_add(1, Ordering::SeqCst);
                    }
                })
                .await;
        });

        // Act: disable mid-countdown
        tokio::time::sleep(Duration::from_secs(2)).await;
        timer.set_enabled(false);
        tokio::time::sleep(Duration::from_secs(30)).await;

        // Assert: the callback never fired and the loop exited
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        handle.await.expect("timer task should exit cleanly");
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_is_observable() {
        let timer = Arc::new(AutoRetryTimer::new(3));
        let mut remaining = timer.subscribe();
        let run_timer = Arc::clone(&timer);
        let handle = tokio::spawn(async move {
            run_timer.run(|| async {}).await;
        });

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(*remaining.borrow_and_update(), 2);

        timer.set_enabled(false);
        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.await.expect("timer task should exit cleanly");
    }
}
