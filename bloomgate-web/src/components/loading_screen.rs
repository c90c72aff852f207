use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub message: AttrValue,
}

#[function_component(LoadingScreen)]
pub fn loading_screen(p: &Props) -> Html {
    html! {
        <section class="scene scene--loading" role="status" aria-live="polite">
            <div class="loading__heart" aria-hidden="true">{ "❤" }</div>
            <p class="loading__message">{ p.message.clone() }</p>
        </section>
    }
}
