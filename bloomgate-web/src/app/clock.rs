/// Wall clock anchored at session start; maps real time onto the session timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clock {
    origin_ms: f64,
}

impl Clock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin_ms: wall_ms(),
        }
    }

    /// Milliseconds since [`Clock::start`].
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        let elapsed = (wall_ms() - self.origin_ms).max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let elapsed = elapsed as u64;
        elapsed
    }
}

#[cfg(target_arch = "wasm32")]
fn wall_ms() -> f64 {
    js_sys::Date::now()
}

// Native renders never advance on their own; tests drive the timeline directly.
#[cfg(not(target_arch = "wasm32"))]
const fn wall_ms() -> f64 {
    0.0
}
