//! Runtime settings for the `univote` binary.
//!
//! Values come from `UNIVOTE__<SECTION>__<KEY>` environment variables, with a
//! `.env` file read first when one exists. Every key has a default.
//!
//! ```no_run
//! use univote::config::AppConfig;
//!
//! let settings = AppConfig::load().expect("readable environment");
//! settings.validate().expect("settings in range");
//! let timeout = settings.voting.biometric_timeout();
//! ```

mod error;
mod telemetry;
mod voting;

pub use error::{ConfigError, ValidationError};
pub use telemetry::TelemetryConfig;
pub use voting::VotingConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "UNIVOTE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub voting: VotingConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Reads the environment. Fails only when a value has the wrong type;
    /// range checks live in [`AppConfig::validate`].
    ///
    /// `UNIVOTE__VOTING__BIOMETRIC_TIMEOUT_SECS=45` sets
    /// `voting.biometric_timeout_secs`.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();

        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.voting.validate()?;
        self.telemetry.validate()
    }
}
