//! Host environment capabilities used by recovery actions.
//!
//! The recovery engine itself never touches platform globals (location,
//! history, storage, mail client); everything side-effecting goes through
//! this trait so the engine stays independently testable and portable
//! across host shells.

use crate::error::RecoveryResult;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Side-effecting operations a recovery action may perform.
///
/// Implementations wrap whatever the host UI exposes: a browser window, a
/// webview bridge, or a test double. All operations report failures as
/// [`RecoveryError`](crate::RecoveryError); the engine contains them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecoveryEnvironment: Send + Sync {
    /// Navigate the current browsing context to `url`.
    async fn navigate(&self, url: &str) -> RecoveryResult<()>;

    /// Reload the current page.
    async fn reload(&self) -> RecoveryResult<()>;

    /// Open the user's mail client on a `mailto:` URI.
    async fn open_mail_client(&self, uri: &str) -> RecoveryResult<()>;

    /// Remove the persisted auth token and clear session storage.
    async fn clear_auth_storage(&self) -> RecoveryResult<()>;

    /// Focus the first form element marked invalid, if any.
    async fn focus_first_invalid_field(&self) -> RecoveryResult<()>;

    /// Surface a short notice to the user (e.g. a wait-before-retry hint).
    async fn show_notice(&self, message: &str) -> RecoveryResult<()>;

    /// Open `url` in a new browsing context (status pages and the like).
    async fn open_external(&self, url: &str) -> RecoveryResult<()>;

    /// Go back one entry in the navigation history.
    async fn go_back(&self) -> RecoveryResult<()>;

    /// Number of entries in the navigation history.
    fn history_len(&self) -> usize;
}
