//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clock;
pub mod config;
pub mod media;
pub mod notifier;
pub mod permission;
pub mod storage;
pub mod view;

// Re-export common types
pub use clock::Clock;
pub use config::ConfigStore;
pub use media::{Completion, MediaCapture, MediaPlayer};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use permission::{Capability, CaptureProbe, PermissionFacility};
pub use storage::OutputDirectory;
pub use view::RecorderView;
