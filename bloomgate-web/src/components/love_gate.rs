use bloomgate_core::{GateCopy, GateView};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub copy: GateCopy,
    pub gate: GateView,
    pub on_input: Callback<String>,
    pub on_submit: Callback<String>,
}

/// Passphrase gate. The input is controlled by the session's gate state.
#[function_component(LoveGate)]
pub fn love_gate(p: &Props) -> Html {
    let input_ref = use_node_ref();

    let oninput = {
        let on_input = p.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };

    let onsubmit = {
        let on_submit = p.on_submit.clone();
        let input_ref = input_ref.clone();
        let fallback = p.gate.input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let value = input_ref
                .cast::<HtmlInputElement>()
                .map_or_else(|| fallback.clone(), |input| input.value());
            on_submit.emit(value);
        })
    };

    let disabled = p.gate.success || p.gate.input.trim().is_empty();
    let card_class = classes!(
        "gate",
        p.gate.error.then_some("gate--shake"),
        p.gate.success.then_some("gate--unlocked"),
    );

    html! {
        <section class="scene scene--gate">
            <form class={card_class} {onsubmit}>
                <h2 class="gate__question">{ p.copy.question.clone() }</h2>
                <p class="gate__hint">{ p.copy.hint.clone() }</p>
                <input
                    ref={input_ref}
                    class="gate__input"
                    type="text"
                    autocomplete="off"
                    placeholder={p.copy.placeholder.clone()}
                    value={p.gate.input.clone()}
                    readonly={p.gate.success}
                    {oninput}
                />
                if p.gate.error {
                    <p class="gate__error" role="alert">{ p.copy.error.clone() }</p>
                }
                if p.gate.success {
                    <p class="gate__welcome">{ p.copy.welcome.clone() }</p>
                } else {
                    <button class="gate__submit" type="submit" {disabled}>{ p.copy.submit.clone() }</button>
                }
            </form>
        </section>
    }
}
