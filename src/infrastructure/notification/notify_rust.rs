//! Desktop alert adapter using notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// How long error alerts stay on screen
const ERROR_TIMEOUT_MS: u32 = 10_000;

/// How long informational notifications stay on screen
const INFO_TIMEOUT_MS: u32 = 4_000;

/// Desktop notifier backed by notify-rust
pub struct NotifyRustNotifier {
    app_name: String,
}

impl NotifyRustNotifier {
    /// Create a notifier named after the application
    pub fn new() -> Self {
        Self::with_app_name("Voice Recorder")
    }

    /// Create with custom app name
    pub fn with_app_name(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    fn timeout_for(icon: NotificationIcon) -> Timeout {
        match icon {
            NotificationIcon::Error => Timeout::Milliseconds(ERROR_TIMEOUT_MS),
            NotificationIcon::Info | NotificationIcon::Recording => {
                Timeout::Milliseconds(INFO_TIMEOUT_MS)
            }
        }
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(message)
            .icon(icon.icon_name())
            .timeout(Self::timeout_for(icon));

        // show() talks to the notification daemon synchronously
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_name() {
        let notifier = NotifyRustNotifier::default();
        assert_eq!(notifier.app_name, "Voice Recorder");
    }

    #[test]
    fn errors_stay_longer() {
        assert!(matches!(
            NotifyRustNotifier::timeout_for(NotificationIcon::Error),
            Timeout::Milliseconds(ERROR_TIMEOUT_MS)
        ));
        assert!(matches!(
            NotifyRustNotifier::timeout_for(NotificationIcon::Recording),
            Timeout::Milliseconds(INFO_TIMEOUT_MS)
        ));
    }

    #[tokio::test]
    #[ignore = "Requires a notification daemon"]
    async fn shows_notification() {
        let notifier = NotifyRustNotifier::new();
        let result = notifier
            .notify("Voice Recorder", "test", NotificationIcon::Info)
            .await;
        assert!(result.is_ok());
    }
}
