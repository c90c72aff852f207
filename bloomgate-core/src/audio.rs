use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The environment refused playback, typically an autoplay policy.
    #[error("playback blocked: {0}")]
    Blocked(String),
    #[error("audio handle already released")]
    Released,
}

/// Background music capability supplied by the platform.
pub trait AudioOutput {
    /// Rewind to the beginning and play.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses playback.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop playback and release the underlying handle.
    fn stop_and_release(&mut self);
}

/// Audio sink for hosts without sound, such as the native tester.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioOutput for SilentAudio {
    fn start(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_and_release(&mut self) {}
}

impl<A: AudioOutput + ?Sized> AudioOutput for Box<A> {
    fn start(&mut self) -> Result<(), AudioError> {
        (**self).start()
    }

    fn stop_and_release(&mut self) {
        (**self).stop_and_release();
    }
}
