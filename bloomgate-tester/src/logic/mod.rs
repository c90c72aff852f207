pub mod harness;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use harness::{JourneyHarness, RecordingAudio, TesterAssets};
pub use seeds::resolve_seed_inputs;
pub use tester::*;
