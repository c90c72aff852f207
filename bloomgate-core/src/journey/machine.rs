use log::{debug, info};

use super::gate::{GateOutcome, GateState, passphrase_matches};
use super::{BloomHint, JourneyState, JourneyTask, LoadingMessage, Notification, Phase, Scene};
use crate::config::JourneyConfig;
use crate::constants::MAX_BLOOM_STAGE;
use crate::timeline::{TaskId, Timeline};

/// Central controller for the journey: phases, bloom steps, and their timers.
///
/// Every timed transition is scheduled on the caller's [`Timeline`] and comes
/// back through [`JourneyMachine::handle`]. The machine never owns particle
/// data; it only publishes the density target.
#[derive(Debug, Clone)]
pub struct JourneyMachine {
    config: JourneyConfig,
    state: JourneyState,
    gate: GateState,
    loading_tasks: Vec<TaskId>,
    error_task: Option<TaskId>,
    envelope_task: Option<TaskId>,
    outbox: Vec<Notification>,
}

impl JourneyMachine {
    #[must_use]
    pub fn new(config: JourneyConfig) -> Self {
        Self {
            config,
            state: JourneyState::default(),
            gate: GateState::default(),
            loading_tasks: Vec::new(),
            error_task: None,
            envelope_task: None,
            outbox: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &JourneyState {
        &self.state
    }

    #[must_use]
    pub const fn gate(&self) -> &GateState {
        &self.gate
    }

    #[must_use]
    pub const fn config(&self) -> &JourneyConfig {
        &self.config
    }

    /// Schedule the two-step loading sequence. Only the first call has an effect.
    pub fn start_loading<T: From<JourneyTask>>(&mut self, timeline: &mut Timeline<T>) {
        if self.state.phase != Phase::Loading || !self.loading_tasks.is_empty() {
            return;
        }
        let swap = timeline.schedule(self.config.loading_swap_ms, JourneyTask::LoadingSwap.into());
        let done = timeline.schedule(
            self.config.loading_complete_ms,
            JourneyTask::LoadingComplete.into(),
        );
        self.loading_tasks = vec![swap, done];
    }

    /// Leave the loading screen. Fires at most once per machine.
    pub fn loading_complete<T>(&mut self, timeline: &mut Timeline<T>) -> bool {
        if self.state.phase != Phase::Loading {
            return false;
        }
        for task in self.loading_tasks.drain(..) {
            timeline.cancel(task);
        }
        self.state.phase = Phase::Gate;
        info!("loading complete, showing gate");
        self.outbox.push(Notification::LoadingCompleted);
        true
    }

    /// Update the gate input; editing clears a showing error.
    pub fn set_passphrase_input<T>(&mut self, text: &str, timeline: &mut Timeline<T>) {
        if self.state.phase != Phase::Gate || self.gate.success {
            return;
        }
        text.clone_into(&mut self.gate.input);
        if self.gate.error {
            self.clear_gate_error(timeline);
        }
    }

    /// Run the unlock protocol against `text`.
    pub fn submit_passphrase<T: From<JourneyTask>>(
        &mut self,
        text: &str,
        timeline: &mut Timeline<T>,
    ) -> GateOutcome {
        if self.state.phase != Phase::Gate || self.gate.success {
            debug!("passphrase submit ignored outside an open gate");
            return GateOutcome::Ignored;
        }
        if text.trim().is_empty() {
            return GateOutcome::Ignored;
        }
        text.clone_into(&mut self.gate.input);

        if passphrase_matches(&self.gate.input, &self.config.passphrase) {
            self.clear_gate_error(timeline);
            self.gate.success = true;
            timeline.schedule(
                self.config.unlock_hold_ms,
                JourneyTask::UnlockHoldElapsed.into(),
            );
            info!("gate accepted passphrase");
            self.outbox.push(Notification::GateAccepted);
            GateOutcome::Accepted
        } else {
            if let Some(previous) = self.error_task.take() {
                timeline.cancel(previous);
            }
            self.gate.error = true;
            self.error_task = Some(
                timeline.schedule(self.config.gate_error_ms, JourneyTask::GateErrorClear.into()),
            );
            self.outbox.push(Notification::GateRejected);
            GateOutcome::Rejected
        }
    }

    /// Intro → first bloom. A single-stage journey is already complete here.
    pub fn begin_journey<T: From<JourneyTask>>(&mut self, timeline: &mut Timeline<T>) -> bool {
        if self.scene() != Scene::Intro {
            debug!("begin ignored in scene {:?}", self.scene());
            return false;
        }
        self.state.step = 1;
        self.outbox.push(Notification::JourneyBegan);
        self.schedule_envelope_if_complete(timeline);
        true
    }

    /// Advance one bloom stage; reaching the last stage schedules the envelope.
    pub fn advance_bloom<T: From<JourneyTask>>(&mut self, timeline: &mut Timeline<T>) -> bool {
        let total = self.config.total_stages;
        let can_advance = self.state.phase == Phase::Main
            && self.state.step >= 1
            && self.state.step < total
            && !self.state.show_envelope;
        if !can_advance {
            return false;
        }
        self.state.step += 1;
        self.outbox.push(Notification::BloomAdvanced(self.state.step));
        self.schedule_envelope_if_complete(timeline);
        true
    }

    /// Schedule the envelope reveal once per journey, when the last stage is reached.
    fn schedule_envelope_if_complete<T: From<JourneyTask>>(&mut self, timeline: &mut Timeline<T>) {
        if self.state.step >= self.config.total_stages && self.envelope_task.is_none() {
            self.envelope_task = Some(timeline.schedule(
                self.config.envelope_reveal_ms,
                JourneyTask::EnvelopeReveal.into(),
            ));
        }
    }

    /// Start opening the envelope; the letter shows once the opening delay elapses.
    pub fn open_envelope<T: From<JourneyTask>>(&mut self, timeline: &mut Timeline<T>) -> bool {
        let can_open = self.state.phase == Phase::Main
            && self.state.show_envelope
            && !self.state.show_letter
            && !self.state.envelope_opening;
        if !can_open {
            return false;
        }
        self.state.envelope_opening = true;
        timeline.schedule(
            self.config.envelope_open_ms,
            JourneyTask::EnvelopeOpened.into(),
        );
        true
    }

    /// Letter → intro, clearing every journey flag.
    pub fn replay<T>(&mut self, timeline: &mut Timeline<T>) -> bool {
        if self.scene() != Scene::Letter {
            debug!("replay ignored in scene {:?}", self.scene());
            return false;
        }
        if let Some(task) = self.envelope_task.take() {
            timeline.cancel(task);
        }
        self.state.reset_journey();
        info!("journey replayed");
        self.outbox.push(Notification::Replayed);
        true
    }

    /// Apply a timed transition that came due.
    pub fn handle<T: From<JourneyTask>>(&mut self, task: JourneyTask, timeline: &mut Timeline<T>) {
        match task {
            JourneyTask::LoadingSwap => {
                if self.state.phase == Phase::Loading
                    && self.state.loading_message == LoadingMessage::Initial
                {
                    self.state.loading_message = LoadingMessage::Personal;
                    self.outbox.push(Notification::LoadingMessageChanged);
                }
            }
            JourneyTask::LoadingComplete => {
                self.loading_tasks.clear();
                self.loading_complete(timeline);
            }
            JourneyTask::GateErrorClear => {
                self.error_task = None;
                self.gate.error = false;
            }
            JourneyTask::UnlockHoldElapsed => {
                if self.state.phase == Phase::Gate && self.gate.success && !self.gate.pulsing {
                    self.gate.pulsing = true;
                    self.state.step = MAX_BLOOM_STAGE;
                    timeline.schedule(
                        self.config.unlock_pulse_ms,
                        JourneyTask::UnlockPulseElapsed.into(),
                    );
                }
            }
            JourneyTask::UnlockPulseElapsed => {
                if self.state.phase == Phase::Gate && self.gate.pulsing {
                    self.gate.pulsing = false;
                    self.state.step = 0;
                    self.state.phase = Phase::Main;
                    info!("gate unlocked, entering journey");
                    self.outbox.push(Notification::Unlocked);
                }
            }
            JourneyTask::EnvelopeReveal => {
                self.envelope_task = None;
                if self.state.phase == Phase::Main
                    && self.state.step >= self.config.total_stages
                    && !self.state.show_envelope
                {
                    self.state.show_envelope = true;
                    self.outbox.push(Notification::EnvelopeRevealed);
                }
            }
            JourneyTask::EnvelopeOpened => {
                if self.state.envelope_opening {
                    self.state.envelope_opening = false;
                    self.state.show_letter = true;
                    self.outbox.push(Notification::LetterOpened);
                }
            }
        }
    }

    fn clear_gate_error<T>(&mut self, timeline: &mut Timeline<T>) {
        if let Some(task) = self.error_task.take() {
            timeline.cancel(task);
        }
        self.gate.error = false;
    }

    /// Take the notices produced since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        match self.state.phase {
            Phase::Loading => Scene::Loading,
            Phase::Gate => Scene::Gate,
            Phase::Main if self.state.show_letter => Scene::Letter,
            Phase::Main if self.state.show_envelope => Scene::EnvelopeReveal,
            Phase::Main if self.state.step == 0 => Scene::Intro,
            Phase::Main => Scene::Blooming(self.state.step),
        }
    }

    /// Step clamped to the drawable bloom range.
    #[must_use]
    pub fn bloom_stage(&self) -> u8 {
        self.state.step.min(MAX_BLOOM_STAGE)
    }

    /// Ambient particle count the current step calls for.
    #[must_use]
    pub fn ambient_target(&self) -> usize {
        self.config.ambient_target(self.state.step)
    }

    /// Fraction of the bloom journey completed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let total = self.config.total_stages.max(1);
        (f32::from(self.state.step) / f32::from(total)).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn bloom_hint(&self) -> BloomHint {
        if self.state.step < self.config.total_stages {
            BloomHint::Continue
        } else {
            BloomHint::Waiting
        }
    }

    /// Whether taps on the focal bloom should advance it.
    #[must_use]
    pub fn bloom_clickable(&self) -> bool {
        !self.state.show_envelope && self.state.step <= self.config.total_stages
    }
}
