use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use bloomgate_core::Experience;
use yew::AttrValue;

use crate::app::state::Session;
use crate::audio::shell_audio;
use crate::data;

/// Seed used when the page does not supply one.
pub const DEFAULT_SEED: u64 = 0x0B10_0D5E;

pub struct Boot {
    pub session: Rc<RefCell<Option<Session>>>,
    pub error: Option<AttrValue>,
}

/// Build the session from the embedded data; a failure is kept for display.
#[must_use]
pub fn boot() -> Boot {
    match build_session(session_seed()) {
        Ok(session) => Boot {
            session: Rc::new(RefCell::new(Some(session))),
            error: None,
        },
        Err(err) => {
            log::error!("bootstrap failed: {err:#}");
            Boot {
                session: Rc::new(RefCell::new(None)),
                error: Some(AttrValue::from(format!("{err:#}"))),
            }
        }
    }
}

/// # Errors
///
/// Returns an error if the embedded configuration or content is invalid.
pub fn build_session(seed: u64) -> anyhow::Result<Session> {
    let config = data::journey_config().context("loading journey.json")?;
    let content = data::content().context("loading content.json")?;
    let session = Experience::new(config.clone(), content.clone(), shell_audio(), seed)
        .context("starting the journey")?;
    Ok(session)
}

/// `?seed=N` pins the particle layout; otherwise every visit differs.
#[must_use]
pub fn session_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        let pinned = crate::dom::location_search()
            .and_then(|search| crate::dom::query_param(&search, "seed").map(str::to_owned))
            .and_then(|raw| raw.parse::<u64>().ok());
        if let Some(seed) = pinned {
            return seed;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let entropy = (js_sys::Math::random() * 9_007_199_254_740_991.0) as u64;
        entropy ^ DEFAULT_SEED
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        DEFAULT_SEED
    }
}
