use anyhow::Result;

use crate::logic::JourneyHarness;

pub mod catalog;

pub use catalog::{expand_scenarios, get_scenario, list_scenarios};

pub type ScenarioFn = fn(&mut JourneyHarness) -> Result<()>;

/// A scripted walk through the journey with assertions along the way.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: String,
    pub description: &'static str,
    /// Run with an audio sink that refuses playback.
    pub blocked_audio: bool,
    pub run: ScenarioFn,
}

impl TestScenario {
    #[must_use]
    pub fn new(
        key: &'static str,
        name: impl Into<String>,
        description: &'static str,
        run: ScenarioFn,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            description,
            blocked_audio: false,
            run,
        }
    }

    #[must_use]
    pub const fn with_blocked_audio(mut self) -> Self {
        self.blocked_audio = true;
        self
    }
}
