use anyhow::{Context, Result, ensure};
use bloomgate_core::{
    AudioError, AudioOutput, BurstId, Content, Experience, GateOutcome, JourneyConfig, Scene,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;

/// Journey data shared by every scenario run.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    pub config: JourneyConfig,
    pub content: Content,
}

impl TesterAssets {
    pub fn load_default() -> Result<Self> {
        let config = JourneyConfig::from_json(include_str!(
            "../../../bloomgate-web/static/assets/data/journey.json"
        ))
        .context("parsing journey.json")?;
        let content = Content::from_json(
            include_str!("../../../bloomgate-web/static/assets/data/content.json"),
            config.total_stages,
        )
        .context("parsing content.json")?;
        Ok(Self { config, content })
    }
}

#[derive(Debug, Default)]
pub struct AudioLog {
    pub starts: u32,
    pub releases: u32,
}

/// Audio double that records calls and can simulate an autoplay block.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    log: Rc<RefCell<AudioLog>>,
    blocked: bool,
}

impl RecordingAudio {
    #[must_use]
    pub fn blocked() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }
}

impl AudioOutput for RecordingAudio {
    fn start(&mut self) -> Result<(), AudioError> {
        self.log.borrow_mut().starts += 1;
        if self.blocked {
            return Err(AudioError::Blocked("autoplay policy".to_string()));
        }
        Ok(())
    }

    fn stop_and_release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

/// One session plus a scripted-input RNG, with steps that assert as they go.
pub struct JourneyHarness {
    pub session: Experience<RecordingAudio>,
    pub rng: ChaCha8Rng,
    audio: RecordingAudio,
    config: JourneyConfig,
}

impl JourneyHarness {
    pub fn with_audio(assets: &TesterAssets, seed: u64, audio: RecordingAudio) -> Result<Self> {
        let session = Experience::new(
            assets.config.clone(),
            assets.content.clone(),
            audio.clone(),
            seed,
        )?;
        Ok(Self {
            session,
            rng: ChaCha8Rng::seed_from_u64(seed),
            audio,
            config: assets.config.clone(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &JourneyConfig {
        &self.config
    }

    #[must_use]
    pub fn audio_starts(&self) -> u32 {
        self.audio.log.borrow().starts
    }

    #[must_use]
    pub fn audio_releases(&self) -> u32 {
        self.audio.log.borrow().releases
    }

    pub fn expect_scene(&self, expected: Scene) -> Result<()> {
        let actual = self.session.scene();
        ensure!(
            actual == expected,
            "expected scene {expected:?} at {}ms, found {actual:?}",
            self.session.now_ms()
        );
        Ok(())
    }

    /// Let the loading timers run out.
    pub fn finish_loading(&mut self) -> Result<()> {
        self.session.advance_to(self.config.loading_complete_ms);
        self.expect_scene(Scene::Gate)
    }

    /// Submit an accepted phrase and wait out the hold and pulse.
    pub fn unlock(&mut self, phrase: &str) -> Result<()> {
        let outcome = self.session.submit_passphrase(phrase);
        ensure!(
            outcome == GateOutcome::Accepted,
            "{phrase:?} should unlock, got {outcome:?}"
        );
        self.session.advance_by(self.config.unlock_hold_ms);
        ensure!(
            self.session.state().step == bloomgate_core::constants::MAX_BLOOM_STAGE,
            "unlock pulse should hold the top stage"
        );
        self.session.advance_by(self.config.unlock_pulse_ms);
        self.expect_scene(Scene::Intro)
    }

    /// Begin and tap the bloom through every stage.
    pub fn bloom_to_end(&mut self) -> Result<()> {
        ensure!(self.session.begin_journey(), "begin should leave the intro");
        while self.session.advance_bloom() {}
        self.expect_scene(Scene::Blooming(self.config.total_stages))
    }

    /// Wait for the envelope, open it and wait for the letter.
    pub fn reveal_and_open(&mut self) -> Result<()> {
        self.session.advance_by(self.config.envelope_reveal_ms);
        self.expect_scene(Scene::EnvelopeReveal)?;
        ensure!(self.session.open_envelope(), "envelope should open");
        ensure!(!self.session.open_envelope(), "second open should be ignored");
        self.session.advance_by(self.config.envelope_open_ms);
        self.expect_scene(Scene::Letter)
    }

    /// Tap somewhere inside a phone-sized viewport.
    pub fn random_tap(&mut self) -> Option<BurstId> {
        let x = self.rng.gen_range(0.0..390.0_f32);
        let y = self.rng.gen_range(0.0..844.0_f32);
        self.session.tap_at(x, y)
    }
}
