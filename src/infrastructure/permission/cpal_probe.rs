//! Capture probe using cpal
//!
//! Used when no permission facility is available: if the default input
//! device can be opened for configuration, capture is assumed to be allowed.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait};

use crate::application::ports::CaptureProbe;
use crate::domain::error::PermissionError;

/// Probes the default cpal input device
pub struct CpalCaptureProbe;

impl CpalCaptureProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpalCaptureProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe synchronously (called from spawn_blocking)
fn probe_sync() -> Result<(), PermissionError> {
    let host = cpal::default_host();
    let device = host.default_input_device().ok_or_else(|| {
        PermissionError::ProbeFailed("No audio input device available".to_string())
    })?;

    device
        .default_input_config()
        .map_err(|e| PermissionError::ProbeFailed(e.to_string()))?;

    Ok(())
}

#[async_trait]
impl CaptureProbe for CpalCaptureProbe {
    async fn probe(&self) -> Result<(), PermissionError> {
        // Device enumeration can block on some hosts
        tokio::task::spawn_blocking(probe_sync)
            .await
            .map_err(|e| PermissionError::ProbeFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn probe_finds_input_device() {
        let probe = CpalCaptureProbe::new();
        assert!(probe.probe().await.is_ok());
    }
}
