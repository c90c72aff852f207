//! Wakes the session when its next timeline task comes due.

use crate::app::state::AppState;

/// Arm one browser timeout for the session's next due task, superseding any earlier one.
#[cfg(target_arch = "wasm32")]
pub fn arm(state: &AppState) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::dom;

    let generation = state.pump_generation.get().wrapping_add(1);
    state.pump_generation.set(generation);

    let Some(due) = state.next_due_ms() else {
        return;
    };
    let delay = due.saturating_sub(state.clock.elapsed_ms());
    let delay = i32::try_from(delay).unwrap_or(i32::MAX);

    let fire_state = state.clone();
    let timeout = Closure::once(move || {
        if fire_state.pump_generation.get() == generation {
            fire_state.tick();
        }
    });
    if let Some(win) = dom::window() {
        if let Err(err) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            timeout.as_ref().unchecked_ref(),
            delay,
        ) {
            dom::console_error(&format!(
                "Failed to schedule journey timer: {}",
                dom::js_error_message(&err)
            ));
        }
    } else {
        dom::console_error("Failed to schedule journey timer: window unavailable");
    }
    timeout.forget();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn arm(state: &AppState) {
    state
        .pump_generation
        .set(state.pump_generation.get().wrapping_add(1));
}
