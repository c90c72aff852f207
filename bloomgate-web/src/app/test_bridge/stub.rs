//! Server and native builds have no `window` to publish on.

use crate::app::state::AppState;
use yew::prelude::*;

#[hook]
pub fn use_test_bridge(_app_state: &AppState) {}

#[cfg(test)]
mod tests {
    use super::super::{BRIDGE_KEY, test_mode_requested, use_test_bridge};
    use crate::app::state::use_app_state;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;
    use yew::prelude::*;

    #[function_component(BridgedPage)]
    fn bridged_page() -> Html {
        let state = use_app_state();
        use_test_bridge(&state);
        html! { <main class="bridged">{ "petals" }</main> }
    }

    #[test]
    fn server_render_never_mentions_the_bridge() {
        let html = block_on(LocalServerRenderer::<BridgedPage>::new().render());
        assert!(html.contains("petals"));
        assert!(!html.contains(BRIDGE_KEY));
    }

    #[test]
    fn only_test_one_requests_the_bridge() {
        assert!(test_mode_requested("?test=1"));
        assert!(test_mode_requested("?seed=4&test=1"));
        assert!(!test_mode_requested("?test=0"));
        assert!(!test_mode_requested("?test"));
        assert!(!test_mode_requested("?testing=1"));
        assert!(!test_mode_requested(""));
    }
}
