use serde::{Deserialize, Serialize};

/// Local state of the passphrase gate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateState {
    pub input: String,
    /// Transient mismatch feedback; cleared by a timer or by editing.
    pub error: bool,
    /// The secret matched; further submissions are ignored.
    pub success: bool,
    /// The celebratory max-density pulse is running.
    pub pulsing: bool,
}

impl GateState {
    /// Whether a submit would be considered at all.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.success && !self.input.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Accepted,
    Rejected,
    /// Empty input, wrong phase, or already unlocked.
    Ignored,
}

/// Case-insensitive, whitespace-trimmed comparison against the secret.
#[must_use]
pub fn passphrase_matches(input: &str, secret: &str) -> bool {
    let input = input.trim();
    !input.is_empty() && input.to_lowercase() == secret.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_ignores_case_and_padding() {
        assert!(passphrase_matches("bintaro", "bintaro"));
        assert!(passphrase_matches("  BINTARO \n", "bintaro"));
        assert!(passphrase_matches("BinTaro", " Bintaro "));
        assert!(!passphrase_matches("bin taro", "bintaro"));
        assert!(!passphrase_matches("bintaro!", "bintaro"));
        assert!(!passphrase_matches("   ", "bintaro"));
    }

    #[test]
    fn submit_needs_text_and_no_prior_success() {
        let mut gate = GateState::default();
        assert!(!gate.can_submit());
        gate.input = " x ".into();
        assert!(gate.can_submit());
        gate.success = true;
        assert!(!gate.can_submit());
    }
}
