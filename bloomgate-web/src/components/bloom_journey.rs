use bloomgate_core::BloomHint;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub stage: u8,
    pub step: u8,
    pub total: u8,
    pub progress: f32,
    #[prop_or_default]
    pub line: Option<AttrValue>,
    pub hint: BloomHint,
    pub continue_hint: AttrValue,
    pub waiting_hint: AttrValue,
    pub progress_label: AttrValue,
    pub clickable: bool,
    pub on_bloom: Callback<()>,
}

/// The focal rose; each tap opens one more petal ring.
#[function_component(BloomJourney)]
pub fn bloom_journey(p: &Props) -> Html {
    let onclick = {
        let on_bloom = p.on_bloom.clone();
        let clickable = p.clickable;
        Callback::from(move |_: MouseEvent| {
            if clickable {
                on_bloom.emit(());
            }
        })
    };

    let rose_class = classes!(
        "rose",
        format!("rose--stage-{}", p.stage),
        p.clickable.then_some("rose--clickable"),
    );
    let hint = match p.hint {
        BloomHint::Continue => p.continue_hint.clone(),
        BloomHint::Waiting => p.waiting_hint.clone(),
    };
    let percent = (p.progress.clamp(0.0, 1.0) * 100.0).round();

    html! {
        <section class="scene scene--bloom">
            <div class={rose_class} {onclick} role="button" aria-label={p.progress_label.clone()}>
                { for (1..=p.stage).map(|ring| html! {
                    <span key={ring} class={format!("rose__petal rose__petal--{ring}")} />
                }) }
                <span class="rose__stem" />
            </div>
            if let Some(line) = p.line.clone() {
                <p class="bloom__line">{ line }</p>
            }
            <div class="bloom__progress" role="progressbar"
                aria-valuemin="0" aria-valuemax={p.total.to_string()} aria-valuenow={p.step.to_string()}>
                <span class="bloom__label">{ format!("{} {}/{}", p.progress_label, p.step, p.total) }</span>
                <span class="bloom__bar" style={format!("width:{percent}%")} />
            </div>
            <p class="bloom__hint">{ hint }</p>
        </section>
    }
}
