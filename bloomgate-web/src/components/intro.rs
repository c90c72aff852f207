use bloomgate_core::IntroText;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub text: IntroText,
    pub on_begin: Callback<()>,
}

#[function_component(IntroScene)]
pub fn intro_scene(p: &Props) -> Html {
    let onclick = {
        let on_begin = p.on_begin.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_begin.emit(());
        })
    };
    html! {
        <section class="scene scene--intro">
            <h1 class="intro__title">{ p.text.title.clone() }</h1>
            <p class="intro__subtitle">{ p.text.subtitle.clone() }</p>
            <p class="intro__instruction">{ p.text.instruction.clone() }</p>
            <button class="intro__cta" type="button" {onclick}>{ p.text.cta.clone() }</button>
        </section>
    }
}
