use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Errors raised when journey configuration invariants are violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JourneyConfigError {
    #[error("passphrase must not be empty")]
    EmptyPassphrase,
    #[error("passphrase must be a single word (got {0:?})")]
    MultiWordPassphrase(String),
    #[error("total stages must be between 1 and {max} (got {value})")]
    StageRange { value: u8, max: u8 },
    #[error("loading swap at {swap_ms}ms must happen before completion at {complete_ms}ms")]
    LoadingOrder { swap_ms: u64, complete_ms: u64 },
    #[error("{field} must be at least {min} (got {value})")]
    MinViolation {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("ambient density at full bloom exceeds {max} particles")]
    AmbientOverflow { max: usize },
    #[error("journey config is not valid JSON: {0}")]
    Json(String),
}

/// Timings, density and the gate secret for one journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyConfig {
    #[serde(default = "JourneyConfig::default_passphrase")]
    pub passphrase: String,
    #[serde(default = "JourneyConfig::default_total_stages")]
    pub total_stages: u8,
    #[serde(default = "JourneyConfig::default_loading_swap_ms")]
    pub loading_swap_ms: u64,
    #[serde(default = "JourneyConfig::default_loading_complete_ms")]
    pub loading_complete_ms: u64,
    #[serde(default = "JourneyConfig::default_gate_error_ms")]
    pub gate_error_ms: u64,
    #[serde(default = "JourneyConfig::default_unlock_hold_ms")]
    pub unlock_hold_ms: u64,
    #[serde(default = "JourneyConfig::default_unlock_pulse_ms")]
    pub unlock_pulse_ms: u64,
    #[serde(default = "JourneyConfig::default_envelope_reveal_ms")]
    pub envelope_reveal_ms: u64,
    #[serde(default = "JourneyConfig::default_envelope_open_ms")]
    pub envelope_open_ms: u64,
    #[serde(default = "JourneyConfig::default_burst_lifetime_ms")]
    pub burst_lifetime_ms: u64,
    #[serde(default = "JourneyConfig::default_ambient_base")]
    pub ambient_base: usize,
    #[serde(default = "JourneyConfig::default_ambient_per_stage")]
    pub ambient_per_stage: usize,
}

impl JourneyConfig {
    fn default_passphrase() -> String {
        constants::DEFAULT_PASSPHRASE.to_string()
    }

    const fn default_total_stages() -> u8 {
        constants::TOTAL_STAGES
    }

    const fn default_loading_swap_ms() -> u64 {
        constants::LOADING_SWAP_MS
    }

    const fn default_loading_complete_ms() -> u64 {
        constants::LOADING_COMPLETE_MS
    }

    const fn default_gate_error_ms() -> u64 {
        constants::GATE_ERROR_MS
    }

    const fn default_unlock_hold_ms() -> u64 {
        constants::UNLOCK_HOLD_MS
    }

    const fn default_unlock_pulse_ms() -> u64 {
        constants::UNLOCK_PULSE_MS
    }

    const fn default_envelope_reveal_ms() -> u64 {
        constants::ENVELOPE_REVEAL_MS
    }

    const fn default_envelope_open_ms() -> u64 {
        constants::ENVELOPE_OPEN_MS
    }

    const fn default_burst_lifetime_ms() -> u64 {
        constants::BURST_LIFETIME_MS
    }

    const fn default_ambient_base() -> usize {
        constants::AMBIENT_BASE_COUNT
    }

    const fn default_ambient_per_stage() -> usize {
        constants::AMBIENT_PER_STAGE
    }

    /// Configuration matching the shipped experience.
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values break an invariant.
    pub fn from_json(json: &str) -> Result<Self, JourneyConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|err| JourneyConfigError::Json(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the state machine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), JourneyConfigError> {
        let secret = self.passphrase.trim();
        if secret.is_empty() {
            return Err(JourneyConfigError::EmptyPassphrase);
        }
        if secret.split_whitespace().count() > 1 {
            return Err(JourneyConfigError::MultiWordPassphrase(secret.to_string()));
        }
        if self.total_stages == 0 || self.total_stages > constants::MAX_BLOOM_STAGE {
            return Err(JourneyConfigError::StageRange {
                value: self.total_stages,
                max: constants::MAX_BLOOM_STAGE,
            });
        }
        if self.loading_swap_ms >= self.loading_complete_ms {
            return Err(JourneyConfigError::LoadingOrder {
                swap_ms: self.loading_swap_ms,
                complete_ms: self.loading_complete_ms,
            });
        }
        if self.ambient_base == 0 {
            return Err(JourneyConfigError::MinViolation {
                field: "ambient_base",
                min: 1,
                value: 0,
            });
        }
        let peak = self
            .ambient_per_stage
            .checked_mul(usize::from(constants::MAX_BLOOM_STAGE))
            .and_then(|growth| growth.checked_add(self.ambient_base));
        if peak.is_none_or(|peak| peak > constants::MAX_AMBIENT_PARTICLES) {
            return Err(JourneyConfigError::AmbientOverflow {
                max: constants::MAX_AMBIENT_PARTICLES,
            });
        }
        if self.burst_lifetime_ms == 0 {
            return Err(JourneyConfigError::MinViolation {
                field: "burst_lifetime_ms",
                min: 1,
                value: 0,
            });
        }
        Ok(())
    }

    /// Ambient particle target for a journey step; the step is clamped to the bloom range.
    #[must_use]
    pub fn ambient_target(&self, step: u8) -> usize {
        let stage = usize::from(step.min(constants::MAX_BLOOM_STAGE));
        self.ambient_base
            .saturating_add(stage.saturating_mul(self.ambient_per_stage))
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            passphrase: Self::default_passphrase(),
            total_stages: Self::default_total_stages(),
            loading_swap_ms: Self::default_loading_swap_ms(),
            loading_complete_ms: Self::default_loading_complete_ms(),
            gate_error_ms: Self::default_gate_error_ms(),
            unlock_hold_ms: Self::default_unlock_hold_ms(),
            unlock_pulse_ms: Self::default_unlock_pulse_ms(),
            envelope_reveal_ms: Self::default_envelope_reveal_ms(),
            envelope_open_ms: Self::default_envelope_open_ms(),
            burst_lifetime_ms: Self::default_burst_lifetime_ms(),
            ambient_base: Self::default_ambient_base(),
            ambient_per_stage: Self::default_ambient_per_stage(),
        }
    }
}
