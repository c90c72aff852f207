//! Centralized timing and density constants for the Bloomgate journey.
//!
//! `JourneyConfig` defaults are drawn from here so the shipped experience and
//! the tests agree on one set of numbers.

// Journey shape ------------------------------------------------------------
pub const TOTAL_STAGES: u8 = 7;
pub const MAX_BLOOM_STAGE: u8 = 7;
pub const DEFAULT_PASSPHRASE: &str = "bintaro";

// Timings (milliseconds) ---------------------------------------------------
pub const LOADING_SWAP_MS: u64 = 2_000;
pub const LOADING_COMPLETE_MS: u64 = 4_500;
pub const GATE_ERROR_MS: u64 = 500;
pub const UNLOCK_HOLD_MS: u64 = 2_000;
pub const UNLOCK_PULSE_MS: u64 = 1_500;
pub const ENVELOPE_REVEAL_MS: u64 = 5_000;
pub const ENVELOPE_OPEN_MS: u64 = 800;
pub const BURST_LIFETIME_MS: u64 = 2_000;

// Ambient density ----------------------------------------------------------
pub const AMBIENT_BASE_COUNT: usize = 12;
pub const AMBIENT_PER_STAGE: usize = 6;
/// Upper bound on the ambient field at full bloom.
pub const MAX_AMBIENT_PARTICLES: usize = 512;

// Ambient particle tuning --------------------------------------------------
pub(crate) const LAYER_FAR_THRESHOLD: f32 = 0.3;
pub(crate) const LAYER_NEAR_THRESHOLD: f32 = 0.7;
pub(crate) const FAR_SCALE: f32 = 0.5;
pub(crate) const MID_SCALE: f32 = 0.8;
pub(crate) const NEAR_SCALE: f32 = 1.2;
pub(crate) const FAR_DURATION_BASE: f32 = 20.0;
pub(crate) const FAR_DURATION_SPREAD: f32 = 10.0;
pub(crate) const MID_DURATION_BASE: f32 = 14.0;
pub(crate) const MID_DURATION_SPREAD: f32 = 8.0;
pub(crate) const NEAR_DURATION_BASE: f32 = 10.0;
pub(crate) const NEAR_DURATION_SPREAD: f32 = 8.0;
pub(crate) const IN_FLIGHT_DELAY_SPAN: f32 = 20.0;
pub(crate) const ENTRY_DELAY_SPAN: f32 = 2.0;

// Burst tuning -------------------------------------------------------------
pub const BURST_MEMBER_COUNT: usize = 14;
pub(crate) const BURST_ANGLE_JITTER_DEG: f32 = 20.0;
pub(crate) const BURST_DISTANCE_BASE: f32 = 60.0;
pub(crate) const BURST_DISTANCE_SPREAD: f32 = 80.0;
pub(crate) const BURST_SCALE_BASE: f32 = 0.5;
pub(crate) const BURST_SCALE_SPREAD: f32 = 0.8;
pub(crate) const BURST_DELAY_SPREAD: f32 = 0.1;
pub(crate) const BURST_GRAVITY_DROP: f32 = 20.0;
