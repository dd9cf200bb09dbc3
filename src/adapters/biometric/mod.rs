//! Biometric verifier adapters.

mod scripted;

pub use scripted::{ScriptedBiometricVerifier, ScriptedReading};
