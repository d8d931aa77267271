pub mod audio;
pub mod error;
pub mod history;
pub mod lookup;
pub mod playback;
pub mod session;
pub mod speech;
pub mod storage;
pub mod suggest;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{PlaybackError, SpeechError, StorageError};
pub use session::{Session, SessionSettings};
