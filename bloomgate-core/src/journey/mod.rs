//! Journey domain primitives shared by the state machine and the session.

use serde::{Deserialize, Serialize};

pub mod gate;
pub mod machine;

pub use gate::{GateOutcome, GateState, passphrase_matches};
pub use machine::JourneyMachine;

/// Top-level phase of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Gate,
    Main,
}

/// The scene the presentation should show, derived from phase and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scene", content = "step", rename_all = "snake_case")]
pub enum Scene {
    Loading,
    Gate,
    Intro,
    Blooming(u8),
    EnvelopeReveal,
    Letter,
}

impl Scene {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Gate => "gate",
            Self::Intro => "intro",
            Self::Blooming(_) => "blooming",
            Self::EnvelopeReveal => "envelope",
            Self::Letter => "letter",
        }
    }
}

/// Which of the two loading messages is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingMessage {
    #[default]
    Initial,
    Personal,
}

/// Footer hint under the bloom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloomHint {
    Continue,
    Waiting,
}

/// Progress owned by the state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyState {
    pub phase: Phase,
    /// 0 is the intro, `1..=total_stages` the bloom progression.
    pub step: u8,
    pub show_envelope: bool,
    pub show_letter: bool,
    /// Set between the open action and the letter reveal.
    pub envelope_opening: bool,
    pub loading_message: LoadingMessage,
}

impl Default for JourneyState {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            step: 0,
            show_envelope: false,
            show_letter: false,
            envelope_opening: false,
            loading_message: LoadingMessage::Initial,
        }
    }
}

impl JourneyState {
    /// Clear everything a replay resets, keeping the phase.
    pub(crate) fn reset_journey(&mut self) {
        self.step = 0;
        self.show_envelope = false;
        self.show_letter = false;
        self.envelope_opening = false;
    }
}

/// Timed transitions the machine schedules on the session timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JourneyTask {
    LoadingSwap,
    LoadingComplete,
    GateErrorClear,
    UnlockHoldElapsed,
    UnlockPulseElapsed,
    EnvelopeReveal,
    EnvelopeOpened,
}

/// Transition notices for the presentation, drained after each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    LoadingMessageChanged,
    LoadingCompleted,
    GateRejected,
    GateAccepted,
    Unlocked,
    JourneyBegan,
    BloomAdvanced(u8),
    EnvelopeRevealed,
    LetterOpened,
    Replayed,
}
