use thiserror::Error;

/// Errors from talking to the recoloring backend.
///
/// Variants carry plain strings so the whole enum stays `Clone` and can
/// travel inside application messages. The detail here is for the log only;
/// the user always sees a fixed per-operation message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaintError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("could not read file: {0}")]
    FileRead(String),

    #[error("could not decode image: {0}")]
    Decode(String),
}

/// Errors from the local identity store.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("could not create data directory: {0}")]
    DataDir(#[from] std::io::Error),
}
