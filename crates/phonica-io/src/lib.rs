pub mod espeak;
pub mod file_store;
pub mod player;

pub use espeak::EspeakSynthesizer;
pub use file_store::FileStore;
pub use player::CommandAudioPlayer;
