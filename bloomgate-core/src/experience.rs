//! Session façade binding the journey machine, particle fields, timeline and audio.

use log::{debug, info};
use thiserror::Error;

use crate::audio::AudioOutput;
use crate::config::{JourneyConfig, JourneyConfigError};
use crate::content::{Content, ContentError};
use crate::journey::{
    GateOutcome, GateState, JourneyMachine, JourneyState, JourneyTask, Notification, Phase, Scene,
};
use crate::particles::{AmbientField, BurstField, BurstGroup, BurstId, SyncOutcome};
use crate::rng::RngBundle;
use crate::snapshot::{AmbientView, GateView, Snapshot};
use crate::timeline::Timeline;

/// Everything that can come due on a session's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTask {
    Journey(JourneyTask),
    BurstExpire(BurstId),
}

impl From<JourneyTask> for SessionTask {
    fn from(task: JourneyTask) -> Self {
        Self::Journey(task)
    }
}

#[derive(Debug, Error)]
pub enum ExperienceError {
    #[error(transparent)]
    Config(#[from] JourneyConfigError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// One visitor's run through the experience.
///
/// Actions return whether they changed anything; invalid actions are silent
/// no-ops. Time only moves through [`Experience::advance_to`] and
/// [`Experience::advance_by`], which the shell maps onto real time.
#[derive(Debug)]
pub struct Experience<A: AudioOutput> {
    machine: JourneyMachine,
    ambient: AmbientField,
    bursts: BurstField,
    timeline: Timeline<SessionTask>,
    audio: Option<A>,
    rngs: RngBundle,
    content: Content,
    seed: u64,
}

impl<A: AudioOutput> Experience<A> {
    /// Build a session and start its loading sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or content fails validation.
    pub fn new(
        config: JourneyConfig,
        content: Content,
        audio: A,
        seed: u64,
    ) -> Result<Self, ExperienceError> {
        config.validate()?;
        content.validate(config.total_stages)?;

        let bursts = BurstField::new(config.burst_lifetime_ms);
        let mut experience = Self {
            machine: JourneyMachine::new(config),
            ambient: AmbientField::new(),
            bursts,
            timeline: Timeline::new(),
            audio: Some(audio),
            rngs: RngBundle::from_user_seed(seed),
            content,
            seed,
        };
        experience.machine.start_loading(&mut experience.timeline);
        experience.sync_ambient();
        debug!("experience started with seed {seed}");
        Ok(experience)
    }

    pub fn loading_complete(&mut self) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let changed = self.machine.loading_complete(&mut self.timeline);
        self.sync_ambient();
        changed
    }

    pub fn set_passphrase_input(&mut self, text: &str) {
        if self.is_torn_down() {
            return;
        }
        self.machine.set_passphrase_input(text, &mut self.timeline);
    }

    pub fn submit_passphrase(&mut self, text: &str) -> GateOutcome {
        if self.is_torn_down() {
            return GateOutcome::Ignored;
        }
        let outcome = self.machine.submit_passphrase(text, &mut self.timeline);
        if outcome == GateOutcome::Accepted {
            self.start_audio();
        }
        outcome
    }

    pub fn begin_journey(&mut self) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let changed = self.machine.begin_journey(&mut self.timeline);
        self.sync_ambient();
        changed
    }

    pub fn advance_bloom(&mut self) -> bool {
        if self.is_torn_down() {
            return false;
        }
        let changed = self.machine.advance_bloom(&mut self.timeline);
        self.sync_ambient();
        changed
    }

    pub fn open_envelope(&mut self) -> bool {
        if self.is_torn_down() {
            return false;
        }
        self.machine.open_envelope(&mut self.timeline)
    }

    /// Back to the intro: bursts cleared, ambient regenerated, music restarted.
    pub fn replay(&mut self) -> bool {
        if self.is_torn_down() || !self.machine.replay(&mut self.timeline) {
            return false;
        }
        self.bursts.clear();
        let target = self.machine.ambient_target();
        self.ambient.reset(target, self.rngs.ambient());
        self.start_audio();
        true
    }

    /// Spawn a burst at viewport coordinates. Ignored while loading.
    pub fn tap_at(&mut self, x: f32, y: f32) -> Option<BurstId> {
        if self.is_torn_down() || self.machine.state().phase == Phase::Loading {
            return None;
        }
        Some(self.bursts.spawn(
            x,
            y,
            self.rngs.burst(),
            &mut self.timeline,
            SessionTask::BurstExpire,
        ))
    }

    /// Run every task due up to `now_ms` in order, then rest the clock there.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(task) = self.timeline.pop_due(now_ms) {
            match task {
                SessionTask::Journey(task) => {
                    self.machine.handle(task, &mut self.timeline);
                    self.sync_ambient();
                }
                SessionTask::BurstExpire(id) => {
                    if !self.bursts.expire(id) {
                        debug!("burst {} already gone", id.0);
                    }
                }
            }
        }
    }

    pub fn advance_by(&mut self, delta_ms: u64) {
        let target = self.timeline.now_ms().saturating_add(delta_ms);
        self.advance_to(target);
    }

    /// Cancel every pending task and release the audio handle. Idempotent.
    pub fn teardown(&mut self) {
        if self.is_torn_down() {
            return;
        }
        self.timeline.close();
        self.bursts.clear();
        if let Some(mut audio) = self.audio.take() {
            audio.stop_and_release();
        }
        info!("experience torn down at {}ms", self.timeline.now_ms());
    }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.timeline.is_closed()
    }

    #[must_use]
    pub const fn state(&self) -> &JourneyState {
        self.machine.state()
    }

    #[must_use]
    pub const fn gate(&self) -> &GateState {
        self.machine.gate()
    }

    #[must_use]
    pub const fn machine(&self) -> &JourneyMachine {
        &self.machine
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        self.machine.scene()
    }

    #[must_use]
    pub const fn ambient(&self) -> &AmbientField {
        &self.ambient
    }

    #[must_use]
    pub fn bursts(&self) -> &[BurstGroup] {
        self.bursts.groups()
    }

    #[must_use]
    pub const fn content(&self) -> &Content {
        &self.content
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timeline.next_due_ms()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.machine.drain_notifications()
    }

    /// Line for the current bloom step.
    #[must_use]
    pub fn current_line(&self) -> Option<&str> {
        match self.scene() {
            Scene::Blooming(step) => self.content.line_for_step(step),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let state = self.machine.state();
        Snapshot {
            now_ms: self.timeline.now_ms(),
            phase: state.phase,
            scene: self.scene(),
            step: state.step,
            total_stages: self.machine.config().total_stages,
            bloom_stage: self.machine.bloom_stage(),
            progress: self.machine.progress(),
            show_envelope: state.show_envelope,
            show_letter: state.show_letter,
            envelope_opening: state.envelope_opening,
            loading_message: state.loading_message,
            gate: GateView::from(self.machine.gate()),
            line: self.current_line().map(str::to_owned),
            bloom_hint: self.machine.bloom_hint(),
            bloom_clickable: self.machine.bloom_clickable(),
            ambient: self.ambient.particles().iter().map(AmbientView::from).collect(),
            bursts: self.bursts.groups().to_vec(),
            torn_down: self.is_torn_down(),
        }
    }

    fn sync_ambient(&mut self) {
        let target = self.machine.ambient_target();
        if let SyncOutcome::Reset { count } = self.ambient.sync(target, self.rngs.ambient()) {
            debug!("ambient field regenerated with {count} particles");
        }
    }

    fn start_audio(&mut self) {
        let Some(audio) = self.audio.as_mut() else {
            return;
        };
        if let Err(err) = audio.start() {
            debug!("background music did not start: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, SilentAudio};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Calls {
        starts: u32,
        releases: u32,
    }

    #[derive(Debug, Clone, Default)]
    struct Recorder {
        calls: Rc<RefCell<Calls>>,
        blocked: bool,
    }

    impl AudioOutput for Recorder {
        fn start(&mut self) -> Result<(), AudioError> {
            self.calls.borrow_mut().starts += 1;
            if self.blocked {
                Err(AudioError::Blocked("autoplay".into()))
            } else {
                Ok(())
            }
        }

        fn stop_and_release(&mut self) {
            self.calls.borrow_mut().releases += 1;
        }
    }

    fn content() -> Content {
        Content {
            lines: (1..=7).map(|i| format!("line {i}")).collect(),
            ..Content::default()
        }
    }

    fn session<A: AudioOutput>(audio: A) -> Experience<A> {
        Experience::new(JourneyConfig::default_config(), content(), audio, 42)
            .expect("valid session")
    }

    #[test]
    fn construction_rejects_short_content() {
        let short = Content {
            lines: vec!["only".into()],
            ..Content::default()
        };
        let err = Experience::new(JourneyConfig::default_config(), short, SilentAudio, 1)
            .expect_err("too few lines");
        assert!(matches!(
            err,
            ExperienceError::Content(ContentError::TooFewLines { .. })
        ));
    }

    #[test]
    fn starts_loading_with_base_density() {
        let exp = session(SilentAudio);
        assert_eq!(exp.scene(), Scene::Loading);
        assert_eq!(exp.ambient().len(), 12);
        assert_eq!(exp.next_due_ms(), Some(2_000));
    }

    #[test]
    fn taps_are_ignored_while_loading() {
        let mut exp = session(SilentAudio);
        assert_eq!(exp.tap_at(10.0, 10.0), None);
        exp.advance_to(4_500);
        assert_eq!(exp.tap_at(10.0, 10.0), Some(BurstId(1)));
    }

    #[test]
    fn unlock_pulse_swells_ambient_then_settles() {
        let recorder = Recorder::default();
        let mut exp = session(recorder.clone());
        exp.advance_to(4_500);
        assert_eq!(exp.submit_passphrase("BINTARO"), GateOutcome::Accepted);
        assert_eq!(recorder.calls.borrow().starts, 1);

        exp.advance_by(2_000);
        assert_eq!(exp.ambient().len(), 54);
        exp.advance_by(1_500);
        assert_eq!(exp.scene(), Scene::Intro);
        assert_eq!(exp.ambient().len(), 12);
        assert!(exp.ambient().particles().iter().all(|p| p.id < 12));
        assert_eq!(recorder.calls.borrow().starts, 1);
    }

    #[test]
    fn blocked_audio_is_suppressed() {
        let recorder = Recorder {
            blocked: true,
            ..Recorder::default()
        };
        let mut exp = session(recorder);
        exp.loading_complete();
        assert_eq!(exp.submit_passphrase("bintaro"), GateOutcome::Accepted);
        assert!(exp.gate().success);
    }

    #[test]
    fn teardown_releases_once_and_freezes_everything() {
        let recorder = Recorder::default();
        let mut exp = session(recorder.clone());
        exp.advance_to(4_500);
        exp.tap_at(1.0, 1.0);
        exp.teardown();
        exp.teardown();
        assert_eq!(recorder.calls.borrow().releases, 1);
        assert_eq!(exp.next_due_ms(), None);
        assert!(exp.bursts().is_empty());

        assert_eq!(exp.submit_passphrase("bintaro"), GateOutcome::Ignored);
        assert_eq!(exp.tap_at(1.0, 1.0), None);
        exp.advance_by(10_000);
        assert_eq!(exp.scene(), Scene::Gate);
        assert_eq!(recorder.calls.borrow().starts, 0);
        assert!(exp.snapshot().torn_down);
    }

    #[test]
    fn snapshot_reports_line_while_blooming() {
        let mut exp = session(SilentAudio);
        exp.loading_complete();
        exp.submit_passphrase("bintaro");
        exp.advance_by(3_500);
        assert_eq!(exp.snapshot().line, None);
        exp.begin_journey();
        exp.advance_bloom();
        let snap = exp.snapshot();
        assert_eq!(snap.scene, Scene::Blooming(2));
        assert_eq!(snap.line.as_deref(), Some("line 2"));
        assert_eq!(snap.ambient.len(), 24);
    }
}
