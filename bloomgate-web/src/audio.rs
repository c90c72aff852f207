//! Background music for the shell.

use bloomgate_core::AudioOutput;
#[cfg(not(target_arch = "wasm32"))]
use bloomgate_core::SilentAudio;

/// Audio handle the session owns.
pub type ShellAudio = Box<dyn AudioOutput>;

pub const THEME_SRC: &str = "assets/audio/theme.mp3";

/// Audio for the current platform: an `<audio>` element in the browser, silence elsewhere.
#[must_use]
pub fn shell_audio() -> ShellAudio {
    #[cfg(target_arch = "wasm32")]
    {
        match web::WebAudio::new(THEME_SRC) {
            Ok(audio) => Box::new(audio),
            Err(err) => {
                log::debug!("audio element unavailable: {err}");
                Box::new(bloomgate_core::SilentAudio)
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(SilentAudio)
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use bloomgate_core::{AudioError, AudioOutput};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use crate::dom;

    /// Looping theme played through an `HtmlAudioElement`.
    pub struct WebAudio {
        element: Option<HtmlAudioElement>,
    }

    impl WebAudio {
        pub fn new(src: &str) -> Result<Self, AudioError> {
            let element = HtmlAudioElement::new_with_src(src)
                .map_err(|err| AudioError::Blocked(dom::js_error_message(&err)))?;
            element.set_loop(true);
            element.set_preload("auto");
            Ok(Self {
                element: Some(element),
            })
        }
    }

    impl AudioOutput for WebAudio {
        fn start(&mut self) -> Result<(), AudioError> {
            let element = self.element.as_ref().ok_or(AudioError::Released)?;
            element.set_current_time(0.0);
            let promise = element
                .play()
                .map_err(|err| AudioError::Blocked(dom::js_error_message(&err)))?;
            // Autoplay rejections arrive asynchronously.
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::debug!("theme playback rejected: {}", dom::js_error_message(&err));
                }
            });
            Ok(())
        }

        fn stop_and_release(&mut self) {
            if let Some(element) = self.element.take() {
                if let Err(err) = element.pause() {
                    log::debug!("theme pause failed: {}", dom::js_error_message(&err));
                }
                element.set_src("");
                element.load();
            }
        }
    }

}
