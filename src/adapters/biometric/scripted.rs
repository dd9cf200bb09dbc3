//! Scripted biometric verifier.
//!
//! Plays back a queue of outcomes, each after an optional delay. Stands in
//! for the fingerprint sensor in development wiring and tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::foundation::VoterId;
use crate::domain::vote::BiometricError;
use crate::ports::BiometricVerifier;

/// One scripted sensor reading.
#[derive(Debug, Clone)]
pub struct ScriptedReading {
    pub delay: Duration,
    pub outcome: Result<(), BiometricError>,
}

impl ScriptedReading {
    pub fn accept() -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(()),
        }
    }

    pub fn reject() -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(BiometricError::Rejected),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(BiometricError::SensorUnavailable(reason.into())),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Verifier that replays [`ScriptedReading`]s in order, then falls back to
/// a default reading once the script runs out.
#[derive(Debug, Clone)]
pub struct ScriptedBiometricVerifier {
    script: Arc<Mutex<VecDeque<ScriptedReading>>>,
    fallback: ScriptedReading,
    calls: Arc<AtomicUsize>,
}

impl ScriptedBiometricVerifier {
    pub fn new(script: impl IntoIterator<Item = ScriptedReading>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into_iter().collect())),
            fallback: ScriptedReading::accept(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Accepts every fingerprint immediately.
    pub fn always_accept() -> Self {
        Self::new([])
    }

    pub fn with_fallback(mut self, fallback: ScriptedReading) -> Self {
        self.fallback = fallback;
        self
    }

    /// Appends a reading to the script.
    pub fn push(&self, reading: ScriptedReading) {
        self.script
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push_back(reading);
    }

    /// Number of times the sensor was triggered.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BiometricVerifier for ScriptedBiometricVerifier {
    async fn verify(&self, voter_id: &VoterId, _timeout: Duration) -> Result<(), BiometricError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reading = self
            .script
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        tracing::debug!(voter_id = %voter_id, delay_ms = reading.delay.as_millis() as u64, "sensor triggered");
        if !reading.delay.is_zero() {
            tokio::time::sleep(reading.delay).await;
        }
        reading.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter() -> VoterId {
        VoterId::new("etu-1").unwrap()
    }

    #[tokio::test]
    async fn replays_script_then_falls_back() {
        let verifier =
            ScriptedBiometricVerifier::new([ScriptedReading::reject(), ScriptedReading::accept()])
                .with_fallback(ScriptedReading::unavailable("unplugged"));
        let t = Duration::from_secs(1);

        assert_eq!(
            verifier.verify(&voter(), t).await,
            Err(BiometricError::Rejected)
        );
        assert_eq!(verifier.verify(&voter(), t).await, Ok(()));
        assert!(matches!(
            verifier.verify(&voter(), t).await,
            Err(BiometricError::SensorUnavailable(_))
        ));
        assert_eq!(verifier.calls(), 3);
    }

    #[tokio::test]
    async fn delayed_reading_waits() {
        let verifier = ScriptedBiometricVerifier::new([
            ScriptedReading::accept().after(Duration::from_millis(30))
        ]);
        let started = tokio::time::Instant::now();

        verifier.verify(&voter(), Duration::from_secs(1)).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn clones_share_script_and_counter() {
        let verifier = ScriptedBiometricVerifier::always_accept();
        let clone = verifier.clone();
        clone.push(ScriptedReading::reject());

        assert!(verifier.verify(&voter(), Duration::from_secs(1)).await.is_err());
        assert_eq!(clone.calls(), 1);
    }
}
