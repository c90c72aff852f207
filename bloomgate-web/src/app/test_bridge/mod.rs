#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::app::state::AppState;
use yew::prelude::*;

/// Key the bridge is published under on `window`.
pub const BRIDGE_KEY: &str = "__bloomgateTest";

/// `?test=1` in the page query turns the bridge on.
#[must_use]
pub fn test_mode_requested(search: &str) -> bool {
    crate::dom::query_param(search, "test") == Some("1")
}

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    stub::use_test_bridge(app_state);
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_test_bridge(app_state: &AppState) {
    wasm::use_test_bridge(app_state);
}
