use super::{BRIDGE_KEY, test_mode_requested};
use crate::app::state::AppState;
use crate::dom;
use wasm_bindgen::prelude::*;
use yew::prelude::*;

struct BridgeBindings {
    state: Closure<dyn FnMut() -> JsValue>,
    tap: Closure<dyn FnMut(JsValue, JsValue) -> JsValue>,
    submit: Closure<dyn FnMut(JsValue) -> JsValue>,
    advance: Closure<dyn FnMut(JsValue) -> JsValue>,
}

fn test_mode_enabled() -> bool {
    dom::location_search().is_some_and(|search| test_mode_requested(&search))
}

fn snapshot_value(state: &AppState) -> JsValue {
    state
        .current_snapshot()
        .and_then(|snapshot| serde_wasm_bindgen::to_value(&snapshot).ok())
        .unwrap_or(JsValue::NULL)
}

#[allow(clippy::cast_possible_truncation)]
fn coord(value: &JsValue) -> f32 {
    value.as_f64().unwrap_or(0.0) as f32
}

fn build_bridge(state: &AppState) -> BridgeBindings {
    let state_state = state.clone();
    let state_fn = Closure::wrap(
        Box::new(move || snapshot_value(&state_state)) as Box<dyn FnMut() -> JsValue>
    );

    let tap_state = state.clone();
    let tap = Closure::wrap(Box::new(move |x: JsValue, y: JsValue| {
        let (x, y) = (coord(&x), coord(&y));
        tap_state
            .act(|session| session.tap_at(x, y))
            .flatten()
            .map_or(JsValue::NULL, |id| JsValue::from(id.0))
    }) as Box<dyn FnMut(JsValue, JsValue) -> JsValue>);

    let submit_state = state.clone();
    let submit = Closure::wrap(Box::new(move |value: JsValue| {
        let text = value.as_string().unwrap_or_default();
        let outcome = submit_state.act(|session| {
            session.set_passphrase_input(&text);
            session.submit_passphrase(&text)
        });
        JsValue::from_str(&format!("{outcome:?}").to_lowercase())
    }) as Box<dyn FnMut(JsValue) -> JsValue>);

    // `advance(ms)` moves the session clock forward; `advance()` jumps to the next due task.
    let advance_state = state.clone();
    let advance = Closure::wrap(Box::new(move |value: JsValue| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let step = value.as_f64().map(|ms| ms.max(0.0) as u64);
        let _ = advance_state.act(|session| match step {
            Some(ms) => session.advance_by(ms),
            None => {
                if let Some(due) = session.next_due_ms() {
                    session.advance_to(due);
                }
            }
        });
        snapshot_value(&advance_state)
    }) as Box<dyn FnMut(JsValue) -> JsValue>);

    BridgeBindings {
        state: state_fn,
        tap,
        submit,
        advance,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    let entries: [(&str, &JsValue); 4] = [
        ("state", bindings.state.as_ref()),
        ("tap", bindings.tap.as_ref()),
        ("submit", bindings.submit.as_ref()),
        ("advance", bindings.advance.as_ref()),
    ];
    for (name, function) in entries {
        let _ = js_sys::Reflect::set(&bridge, &JsValue::from_str(name), function);
    }
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_KEY), &bridge);
}

fn detach_bridge() {
    if let Some(window) = dom::window() {
        let _ = js_sys::Reflect::delete_property(&window, &JsValue::from_str(BRIDGE_KEY));
    }
}

#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    let bridge_handle = use_mut_ref(|| None::<BridgeBindings>);
    let state = app_state.clone();

    use_effect_with((), move |()| {
        if test_mode_enabled() {
            let bindings = build_bridge(&state);
            attach_bridge(&bindings);
            *bridge_handle.borrow_mut() = Some(bindings);
        }
        move || {
            if bridge_handle.borrow_mut().take().is_some() {
                detach_bridge();
            }
        }
    });
}
