//! Capture permission acquisition

use tracing::{debug, warn};

use crate::domain::error::PermissionError;

use super::ports::{Capability, CaptureProbe, PermissionFacility};

/// Obtains capture permission from the permission facility, falling back
/// to a direct capture probe when no facility is available.
pub struct PermissionGate {
    facility: Option<Box<dyn PermissionFacility>>,
    probe: Option<Box<dyn CaptureProbe>>,
}

impl PermissionGate {
    /// Create a gate from an optional facility and an optional fallback probe
    pub fn new(
        facility: Option<Box<dyn PermissionFacility>>,
        probe: Option<Box<dyn CaptureProbe>>,
    ) -> Self {
        Self { facility, probe }
    }

    /// Gate backed by a permission facility only
    pub fn with_facility(facility: impl PermissionFacility + 'static) -> Self {
        Self::new(Some(Box::new(facility)), None)
    }

    /// Gate with no permission facility, relying on the probe
    pub fn probe_only(probe: impl CaptureProbe + 'static) -> Self {
        Self::new(None, Some(Box::new(probe)))
    }

    /// Make sure `capability` is granted, asking the user if needed.
    ///
    /// No retry: a denial is final for this call.
    pub async fn ensure(&self, capability: Capability) -> Result<(), PermissionError> {
        if let Some(facility) = &self.facility {
            if facility.check_granted(capability).await? {
                debug!(?capability, "Permission already granted");
                return Ok(());
            }
            return if facility.request(capability).await? {
                debug!(?capability, "Permission granted");
                Ok(())
            } else {
                Err(PermissionError::Denied)
            };
        }

        warn!("Permission facility not found, probing capture device directly");
        match &self.probe {
            Some(probe) => probe.probe().await,
            None => Err(PermissionError::Unavailable),
        }
    }
}
