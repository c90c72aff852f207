pub mod ambient_layer;
pub mod bloom_journey;
pub mod burst_layer;
pub mod envelope;
pub mod intro;
pub mod letter;
pub mod loading_screen;
pub mod love_gate;

pub use ambient_layer::AmbientLayer;
pub use bloom_journey::BloomJourney;
pub use burst_layer::BurstLayer;
pub use envelope::EnvelopeScene;
pub use intro::IntroScene;
pub use letter::LetterScene;
pub use loading_screen::LoadingScreen;
pub use love_gate::LoveGate;
