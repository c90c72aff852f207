//! Bloomgate Engine
//!
//! Platform-agnostic core of the Bloomgate journey: the phase and bloom state
//! machine, the procedural particle system, and the session timeline.
//! This crate has no browser dependencies; shells drive it through [`Experience`].

pub mod audio;
pub mod config;
pub mod constants;
pub mod content;
pub mod experience;
pub mod journey;
pub mod particles;
pub mod rng;
pub mod snapshot;
pub mod timeline;

// Re-export commonly used types
pub use audio::{AudioError, AudioOutput, SilentAudio};
pub use config::{JourneyConfig, JourneyConfigError};
pub use content::{BloomCopy, Content, ContentError, GateCopy, IntroText, Letter, LoadingCopy};
pub use experience::{Experience, ExperienceError, SessionTask};
pub use journey::{
    BloomHint, GateOutcome, GateState, JourneyMachine, JourneyState, JourneyTask, LoadingMessage,
    Notification, Phase, Scene, passphrase_matches,
};
pub use particles::{
    AmbientField, AmbientParticle, BurstField, BurstGroup, BurstId, BurstMember, DepthLayer,
    EntryMode, ParticleShape, SyncOutcome, generate_batch,
};
pub use rng::{CountingRng, RngBundle};
pub use snapshot::{AmbientView, GateView, Snapshot};
pub use timeline::{TaskId, Timeline};
