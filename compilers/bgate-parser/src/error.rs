use thiserror::Error;

/// Every way a reference query can be rejected. None of these are fatal:
/// the caller reports the message and asks for another query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid character {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },

    #[error("book not found: {0:?}")]
    BookNotFound(String),

    #[error("invalid chapter")]
    InvalidChapter,

    #[error("invalid verse")]
    InvalidVerse,

    #[error("invalid range continuation")]
    InvalidRangeContinuation,
}
