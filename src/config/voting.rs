//! Voting configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_BIOMETRIC_TIMEOUT_SECS: u64 = 300;

/// Vote session settings
#[derive(Debug, Clone, Deserialize)]
pub struct VotingConfig {
    /// How long a fingerprint read may take before it counts as failed
    #[serde(default = "default_biometric_timeout")]
    pub biometric_timeout_secs: u64,
}

impl VotingConfig {
    pub fn biometric_timeout(&self) -> Duration {
        Duration::from_secs(self.biometric_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.biometric_timeout_secs == 0
            || self.biometric_timeout_secs > MAX_BIOMETRIC_TIMEOUT_SECS
        {
            return Err(ValidationError::InvalidBiometricTimeout(
                self.biometric_timeout_secs,
            ));
        }
        Ok(())
    }
}

impl Default for VotingConfig {
    fn default() -> Self {
        Self {
            biometric_timeout_secs: default_biometric_timeout(),
        }
    }
}

fn default_biometric_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_thirty_seconds() {
        let config = VotingConfig::default();
        assert_eq!(config.biometric_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_and_excessive_timeouts() {
        for secs in [0, 301] {
            let config = VotingConfig {
                biometric_timeout_secs: secs,
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidBiometricTimeout(secs))
            );
        }
        assert!(VotingConfig {
            biometric_timeout_secs: 300
        }
        .validate()
        .is_ok());
    }
}
