use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("note name not found: {0}")]
    NoteNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A scale step resolved to a chromatic index outside the note table.
    #[error("chromatic index {index} is outside the note table (0..={max})")]
    OutOfRange { index: i64, max: usize },

    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("melody notation error at byte {position}: {message}")]
    Notation { position: usize, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("playback failed: {0}")]
    Playback(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<ron::error::SpannedError> for Error {
    fn from(e: ron::error::SpannedError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<ron::Error> for Error {
    fn from(e: ron::Error) -> Self {
        Error::Config(e.to_string())
    }
}
