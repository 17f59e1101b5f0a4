//! Notification infrastructure module
//!
//! Alerts can additionally be shown as desktop notifications via notify-rust.

mod noop;
mod notify_rust;

pub use noop::NoOpNotifier;
pub use notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

/// Create a notifier based on whether desktop notifications are enabled
pub fn create_notifier(enabled: bool) -> Box<dyn Notifier> {
    if enabled {
        Box::new(NotifyRustNotifier::new())
    } else {
        Box::new(NoOpNotifier::new())
    }
}
