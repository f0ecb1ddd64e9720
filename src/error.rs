use std::path::PathBuf;

use thiserror::Error;

/// Fatal startup and terminal failures.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("missing asset {}: {source}", .path.display())]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed asset {}: {reason}", .path.display())]
    MalformedAsset { path: PathBuf, reason: String },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Sound failures. Never fatal: the game falls back to silence.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio device: {0}")]
    MissingAudioDevice(String),

    #[error("unable to load sound {}: {reason}", .path.display())]
    Unloadable { path: PathBuf, reason: String },
}
