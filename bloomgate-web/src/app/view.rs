use bloomgate_core::{Content, Experience, LoadingMessage, Scene, Snapshot};
use yew::prelude::*;

use crate::app::state::AppState;
use crate::components::{
    AmbientLayer, BloomJourney, BurstLayer, EnvelopeScene, IntroScene, LetterScene,
    LoadingScreen, LoveGate,
};
use crate::data;

/// Callbacks wiring scene components to session actions.
#[derive(Clone)]
pub struct AppHandlers {
    pub tap: Callback<PointerEvent>,
    pub input: Callback<String>,
    pub submit: Callback<String>,
    pub begin: Callback<()>,
    pub bloom: Callback<()>,
    pub open: Callback<()>,
    pub replay: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        let action = |f: fn(&mut crate::app::state::Session) -> bool| {
            let state = state.clone();
            Callback::from(move |()| {
                let _ = state.act(f);
            })
        };
        let tap = {
            let state = state.clone();
            Callback::from(move |e: PointerEvent| {
                #[allow(clippy::cast_precision_loss)]
                let (x, y) = (e.client_x() as f32, e.client_y() as f32);
                let _ = state.act(|session| session.tap_at(x, y));
            })
        };
        let input = {
            let state = state.clone();
            Callback::from(move |text: String| {
                let _ = state.act(|session| session.set_passphrase_input(&text));
            })
        };
        let submit = {
            let state = state.clone();
            Callback::from(move |text: String| {
                let _ = state.act(|session| session.submit_passphrase(&text));
            })
        };
        Self {
            tap,
            input,
            submit,
            begin: action(Experience::begin_journey),
            bloom: action(Experience::advance_bloom),
            open: action(Experience::open_envelope),
            replay: action(Experience::replay),
        }
    }
}

fn render_scene(snapshot: &Snapshot, content: &Content, handlers: &AppHandlers) -> Html {
    match snapshot.scene {
        Scene::Loading => {
            let message = match snapshot.loading_message {
                LoadingMessage::Initial => &content.loading.initial,
                LoadingMessage::Personal => &content.loading.personal,
            };
            html! { <LoadingScreen message={AttrValue::from(message.clone())} /> }
        }
        Scene::Gate => html! {
            <LoveGate
                copy={content.gate.clone()}
                gate={snapshot.gate.clone()}
                on_input={handlers.input.clone()}
                on_submit={handlers.submit.clone()}
            />
        },
        Scene::Intro => html! {
            <IntroScene text={content.intro.clone()} on_begin={handlers.begin.clone()} />
        },
        Scene::Blooming(step) => html! {
            <BloomJourney
                stage={snapshot.bloom_stage}
                {step}
                total={snapshot.total_stages}
                progress={snapshot.progress}
                line={snapshot.line.clone().map(AttrValue::from)}
                hint={snapshot.bloom_hint}
                continue_hint={AttrValue::from(content.bloom.continue_hint.clone())}
                waiting_hint={AttrValue::from(content.bloom.waiting_hint.clone())}
                progress_label={AttrValue::from(content.bloom.progress_label.clone())}
                clickable={snapshot.bloom_clickable}
                on_bloom={handlers.bloom.clone()}
            />
        },
        Scene::EnvelopeReveal => html! {
            <EnvelopeScene opening={snapshot.envelope_opening} on_open={handlers.open.clone()} />
        },
        Scene::Letter => html! {
            <LetterScene letter={content.letter.clone()} on_replay={handlers.replay.clone()} />
        },
    }
}

/// Render the whole page for the current snapshot.
#[must_use]
pub fn render_app(state: &AppState) -> Html {
    if let Some(error) = state.boot_error.clone() {
        return html! {
            <main class="bloomgate bloomgate--error" role="alert">{ error }</main>
        };
    }
    let (Some(snapshot), Ok(content)) = ((*state.snapshot).clone(), data::content()) else {
        return Html::default();
    };
    let handlers = AppHandlers::new(state);
    let class = classes!(
        "bloomgate",
        format!("bloomgate--{}", snapshot.scene.label()),
        (snapshot.scene == Scene::Gate && snapshot.gate.success).then_some("bloomgate--unlocking"),
    );
    html! {
        <main {class} onpointerdown={handlers.tap.clone()} data-scene={snapshot.scene.label()}>
            <AmbientLayer particles={snapshot.ambient.clone()} />
            <BurstLayer bursts={snapshot.bursts.clone()} />
            { render_scene(&snapshot, content, &handlers) }
        </main>
    }
}
