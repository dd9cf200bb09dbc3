//! Biometric verifier port - fingerprint check contract.
//!
//! Only the verification contract is consumed here; the sensor driver and
//! enrollment live behind the adapter.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::VoterId;
use crate::domain::vote::BiometricError;

/// Verifies that the person at the sensor is `voter_id`.
///
/// `timeout` is advisory for the adapter; callers also bound the call
/// themselves and treat expiry as [`BiometricError::Timeout`]. A call may be
/// dropped mid-flight when the voter aborts, so implementations must not
/// leave shared state half-updated across an `.await`.
#[async_trait]
pub trait BiometricVerifier: Send + Sync {
    async fn verify(&self, voter_id: &VoterId, timeout: Duration) -> Result<(), BiometricError>;
}
