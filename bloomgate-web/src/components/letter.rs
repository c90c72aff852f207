use bloomgate_core::Letter;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub letter: Letter,
    pub on_replay: Callback<()>,
}

#[function_component(LetterScene)]
pub fn letter_scene(p: &Props) -> Html {
    let onclick = {
        let on_replay = p.on_replay.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_replay.emit(());
        })
    };
    let letter = &p.letter;
    html! {
        <section class="scene scene--letter">
            <article class="letter">
                <h2 class="letter__title">{ letter.title.clone() }</h2>
                { for letter.body.iter().map(|para| html! { <p class="letter__para">{ para.clone() }</p> }) }
                <p class="letter__signature">
                    { for letter.signature_lines().map(|line| html! { <span class="letter__sig-line">{ line.to_string() }</span> }) }
                </p>
                <footer class="letter__footer">{ letter.footer.clone() }</footer>
            </article>
            if !letter.closing.is_empty() {
                <p class="letter__closing">{ letter.closing.clone() }</p>
            }
            <button class="letter__replay" type="button" {onclick}>{ letter.replay.clone() }</button>
        </section>
    }
}
