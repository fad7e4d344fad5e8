use std::io;

/// Crate-wide error type. Configuration and access errors are surfaced to the
/// caller; lenient data errors (unknown ids, malformed persisted state) are
/// handled at their call sites and never reach this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("seat index {0} out of range")]
    Seat(usize),

    #[error("pick index {index} out of range for pack of {len}")]
    Pick { index: usize, len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Res<T> = Result<T, Error>;
