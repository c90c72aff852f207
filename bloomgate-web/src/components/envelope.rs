use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub opening: bool,
    pub on_open: Callback<()>,
}

#[function_component(EnvelopeScene)]
pub fn envelope_scene(p: &Props) -> Html {
    let onclick = {
        let on_open = p.on_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_open.emit(());
        })
    };
    let class = classes!("envelope", p.opening.then_some("envelope--opening"));
    html! {
        <section class="scene scene--envelope">
            <button {class} type="button" aria-label="Open the letter" {onclick} disabled={p.opening}>
                <span class="envelope__flap" />
                <span class="envelope__seal">{ "💌" }</span>
            </button>
        </section>
    }
}
