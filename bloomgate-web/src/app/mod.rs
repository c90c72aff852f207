use yew::prelude::*;

pub mod bootstrap;
pub mod clock;
pub mod pump;
pub mod state;
pub mod test_bridge;
pub mod view;

pub use state::{AppState, Session};

/// Root component: owns the session for the lifetime of the page.
#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    test_bridge::use_test_bridge(&app_state);

    {
        let state = app_state.clone();
        use_effect_with((), move |()| {
            state.refresh();
            move || state.teardown()
        });
    }

    view::render_app(&app_state)
}
