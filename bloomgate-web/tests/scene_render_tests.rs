use bloomgate_core::{Experience, Scene, SilentAudio};
use bloomgate_web::app::bootstrap::{DEFAULT_SEED, build_session};
use bloomgate_web::components::{
    envelope, intro, letter, loading_screen, AmbientLayer, EnvelopeScene, IntroScene, LetterScene,
    LoadingScreen,
};
use bloomgate_web::data;
use futures::executor::block_on;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn drive_to_intro(session: &mut Experience<impl bloomgate_core::AudioOutput>) {
    session.loading_complete();
    session.submit_passphrase("bintaro");
    session.advance_by(3_500);
    assert_eq!(session.scene(), Scene::Intro);
}

#[test]
fn loading_screen_shows_message() {
    let props = loading_screen::Props {
        message: AttrValue::from("Just for you"),
    };
    let html = block_on(LocalServerRenderer::<LoadingScreen>::with_props(props).render());
    assert!(html.contains("Just for you"));
    assert!(html.contains("role=\"status\""));
}

#[test]
fn intro_uses_shipped_copy() {
    let content = data::content().unwrap();
    let props = intro::Props {
        text: content.intro.clone(),
        on_begin: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<IntroScene>::with_props(props).render());
    assert!(html.contains("intro__cta"));
    assert!(html.contains(content.intro.subtitle.as_str()));
}

#[test]
fn envelope_disables_while_opening() {
    let props = envelope::Props {
        opening: true,
        on_open: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<EnvelopeScene>::with_props(props).render());
    assert!(html.contains("envelope--opening"));
    assert!(html.contains("disabled"));
}

#[test]
fn letter_renders_shipped_letter() {
    let content = data::content().unwrap();
    let props = letter::Props {
        letter: content.letter.clone(),
        on_replay: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LetterScene>::with_props(props).render());
    assert_eq!(
        html.matches("letter__para").count(),
        content.letter.body.len()
    );
    assert!(html.contains("Your Future Husband"));
    assert!(html.contains("letter__closing"));
}

#[test]
fn session_snapshot_feeds_ambient_layer() {
    let mut session = build_session(DEFAULT_SEED).unwrap();
    drive_to_intro(&mut session);
    session.begin_journey();
    session.advance_bloom();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.ambient.len(), 24);

    let props = bloomgate_web::components::ambient_layer::Props {
        particles: snapshot.ambient,
    };
    let html = block_on(LocalServerRenderer::<AmbientLayer>::with_props(props).render());
    assert_eq!(html.matches("class=\"ambient ").count(), 24);
}

#[test]
fn silent_session_survives_teardown() {
    let config = data::journey_config().unwrap().clone();
    let content = data::content().unwrap().clone();
    let mut session = Experience::new(config, content, SilentAudio, 9).unwrap();
    drive_to_intro(&mut session);
    session.teardown();
    assert!(!session.begin_journey());
    assert!(session.snapshot().torn_down);
}
