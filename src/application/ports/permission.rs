//! Permission port interfaces

use async_trait::async_trait;

use crate::domain::error::PermissionError;

/// Capabilities the recorder needs permission for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Audio capture from the default input device
    Microphone,
}

impl Capability {
    /// Human readable name used in prompts
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Microphone => "record audio from your microphone",
        }
    }
}

/// Port for the platform permission facility
#[async_trait]
pub trait PermissionFacility: Send + Sync {
    /// Check whether the capability has already been granted.
    async fn check_granted(&self, capability: Capability) -> Result<bool, PermissionError>;

    /// Ask the user for the capability.
    ///
    /// # Returns
    /// Ok(true) if granted, Ok(false) if the user declined
    async fn request(&self, capability: Capability) -> Result<bool, PermissionError>;
}

/// Port for probing capture availability when no permission facility exists.
///
/// A successful probe counts as an implicit grant.
#[async_trait]
pub trait CaptureProbe: Send + Sync {
    async fn probe(&self) -> Result<(), PermissionError>;
}

/// Blanket implementation for boxed permission facilities
#[async_trait]
impl PermissionFacility for Box<dyn PermissionFacility> {
    async fn check_granted(&self, capability: Capability) -> Result<bool, PermissionError> {
        self.as_ref().check_granted(capability).await
    }

    async fn request(&self, capability: Capability) -> Result<bool, PermissionError> {
        self.as_ref().request(capability).await
    }
}

/// Blanket implementation for boxed probes
#[async_trait]
impl CaptureProbe for Box<dyn CaptureProbe> {
    async fn probe(&self) -> Result<(), PermissionError> {
        self.as_ref().probe().await
    }
}
