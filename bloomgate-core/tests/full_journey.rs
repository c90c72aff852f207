use std::cell::RefCell;
use std::rc::Rc;

use bloomgate_core::{
    AudioError, AudioOutput, Content, Experience, GateOutcome, JourneyConfig, Notification, Phase,
    Scene, Snapshot,
};

#[derive(Debug, Default)]
struct AudioLog {
    starts: u32,
    releases: u32,
}

#[derive(Debug, Clone, Default)]
struct RecordingAudio(Rc<RefCell<AudioLog>>);

impl AudioOutput for RecordingAudio {
    fn start(&mut self) -> Result<(), AudioError> {
        self.0.borrow_mut().starts += 1;
        Ok(())
    }

    fn stop_and_release(&mut self) {
        self.0.borrow_mut().releases += 1;
    }
}

fn load_config() -> JourneyConfig {
    JourneyConfig::from_json(include_str!(
        "../../bloomgate-web/static/assets/data/journey.json"
    ))
    .unwrap()
}

fn load_content(total_stages: u8) -> Content {
    Content::from_json(
        include_str!("../../bloomgate-web/static/assets/data/content.json"),
        total_stages,
    )
    .unwrap()
}

fn new_session(seed: u64) -> (Experience<RecordingAudio>, RecordingAudio) {
    let config = load_config();
    let content = load_content(config.total_stages);
    let audio = RecordingAudio::default();
    let exp = Experience::new(config, content, audio.clone(), seed).unwrap();
    (exp, audio)
}

#[test]
fn shipped_data_matches_defaults() {
    let config = load_config();
    assert_eq!(config, JourneyConfig::default_config());
    let content = load_content(config.total_stages);
    assert_eq!(content.lines.len(), 7);
    assert!(content.letter.signature_lines().count() >= 2);
    assert!(!content.letter.body.is_empty());
}

#[test]
fn end_to_end_journey_reaches_letter_and_replays() {
    let (mut exp, audio) = new_session(0x00C0_FFEE);

    exp.advance_to(2_000);
    assert_eq!(exp.scene(), Scene::Loading);
    exp.advance_to(4_500);
    assert_eq!(exp.scene(), Scene::Gate);

    assert_eq!(exp.submit_passphrase("BINTARO"), GateOutcome::Accepted);
    assert!(exp.gate().success);
    assert_eq!(audio.0.borrow().starts, 1);

    exp.advance_by(2_000);
    assert_eq!(exp.state().phase, Phase::Gate);
    assert_eq!(exp.state().step, 7);
    exp.advance_by(1_500);
    assert_eq!(exp.scene(), Scene::Intro);
    assert_eq!(exp.state().step, 0);

    assert!(exp.begin_journey());
    for _ in 0..6 {
        assert!(exp.advance_bloom());
    }
    assert_eq!(exp.scene(), Scene::Blooming(7));
    assert_eq!(exp.ambient().len(), 54);
    assert!(!exp.advance_bloom());

    exp.advance_by(4_999);
    assert_eq!(exp.scene(), Scene::Blooming(7));
    exp.advance_by(1);
    assert_eq!(exp.scene(), Scene::EnvelopeReveal);

    assert!(exp.open_envelope());
    exp.advance_by(800);
    assert_eq!(exp.scene(), Scene::Letter);

    exp.tap_at(120.0, 300.0);
    assert!(exp.replay());
    assert_eq!(exp.scene(), Scene::Intro);
    assert!(exp.bursts().is_empty());
    assert_eq!(exp.ambient().len(), 12);
    assert_eq!(audio.0.borrow().starts, 2);

    let notes = exp.drain_notifications();
    let expected = [
        Notification::LoadingMessageChanged,
        Notification::LoadingCompleted,
        Notification::GateAccepted,
        Notification::Unlocked,
        Notification::JourneyBegan,
        Notification::EnvelopeRevealed,
        Notification::LetterOpened,
        Notification::Replayed,
    ];
    for note in expected {
        assert_eq!(
            notes.iter().filter(|n| **n == note).count(),
            1,
            "{note:?} in {notes:?}"
        );
    }
    assert!(exp.drain_notifications().is_empty());

    exp.teardown();
    assert_eq!(audio.0.borrow().releases, 1);
}

#[test]
fn envelope_task_is_scheduled_once() {
    let (mut exp, _audio) = new_session(7);
    exp.loading_complete();
    exp.submit_passphrase("bintaro");
    exp.advance_by(3_500);
    exp.begin_journey();
    while exp.advance_bloom() {}
    let reveal_at = exp.next_due_ms();
    assert_eq!(reveal_at, Some(exp.now_ms() + 5_000));
    for _ in 0..5 {
        assert!(!exp.advance_bloom());
    }
    assert_eq!(exp.next_due_ms(), reveal_at);
}

#[test]
fn bursts_expire_independently() {
    let (mut exp, _audio) = new_session(3);
    exp.loading_complete();
    let first = exp.tap_at(10.0, 20.0).unwrap();
    exp.advance_by(300);
    let second = exp.tap_at(30.0, 40.0).unwrap();
    assert_ne!(first, second);
    assert_eq!(exp.bursts().len(), 2);

    exp.advance_by(1_700);
    let live: Vec<_> = exp.bursts().iter().map(|b| b.id).collect();
    assert_eq!(live, vec![second]);
    exp.advance_by(300);
    assert!(exp.bursts().is_empty());
}

#[test]
fn wrong_answer_leaves_progress_untouched() {
    let (mut exp, audio) = new_session(11);
    exp.loading_complete();
    assert_eq!(exp.submit_passphrase("jakarta"), GateOutcome::Rejected);
    assert!(exp.gate().error);
    assert_eq!(exp.state().step, 0);
    assert_eq!(exp.state().phase, Phase::Gate);
    assert_eq!(audio.0.borrow().starts, 0);
    exp.advance_by(500);
    assert!(!exp.gate().error);
    assert_eq!(exp.gate().input, "jakarta");
}

#[test]
fn same_seed_reproduces_particles() {
    let (a, _) = new_session(99);
    let (b, _) = new_session(99);
    let (c, _) = new_session(100);
    assert_eq!(a.ambient().particles(), b.ambient().particles());
    assert_ne!(a.ambient().particles(), c.ambient().particles());
}

#[test]
fn snapshot_serializes_for_the_shell() {
    let (mut exp, _audio) = new_session(5);
    exp.loading_complete();
    exp.tap_at(1.0, 2.0);
    let text = exp.snapshot().to_json().unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["phase"], "gate");
    assert_eq!(json["scene"]["scene"], "gate");
    assert_eq!(json["ambient"].as_array().map(Vec::len), Some(12));
    assert_eq!(json["bursts"][0]["members"].as_array().map(Vec::len), Some(14));
}

#[test]
fn snapshot_json_reads_back_into_the_same_frame() {
    let (mut exp, _audio) = new_session(8);
    exp.loading_complete();
    exp.set_passphrase_input("bint");
    let before = exp.snapshot();
    let text = before.to_json().unwrap();
    assert!(!text.is_empty());
    let after: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(after, before);
}
