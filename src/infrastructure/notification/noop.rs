//! No-op notifier adapter
//!
//! Used when desktop notifications are disabled.

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Notifier that shows nothing
pub struct NoOpNotifier;

impl NoOpNotifier {
    /// Create a new no-op notifier
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(
        &self,
        _title: &str,
        _message: &str,
        _icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_returns_ok() {
        let notifier = NoOpNotifier::new();
        assert!(notifier
            .notify("Voice Recorder", "Recording failed", NotificationIcon::Error)
            .await
            .is_ok());
    }
}
