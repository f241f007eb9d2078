//! Error types for the fallible edges of the crate.
//!
//! The music-theory core itself never fails: missing selections are `None`,
//! unparseable progression tokens pass through unchanged and fretboard
//! lookups outside the neck come back empty. Errors only appear where text
//! from the outside world is turned into typed values (difficulty labels,
//! note names, tunings, key names) and in practice-record bookkeeping.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PracticeError {
    /// A skill level label that is not `beginner`/`basics`, `intermediate`
    /// or `advanced`.
    ///
    /// ```
    /// # use fretwise::PracticeError;
    /// let err = PracticeError::UnknownDifficulty("expert".to_string());
    /// assert_eq!(err.to_string(), "Unknown skill level: expert");
    /// ```
    #[error("Unknown skill level: {0}")]
    UnknownDifficulty(String),

    #[error("Invalid note name: {0}")]
    InvalidNote(String),

    /// A tuning must name exactly one open note per string.
    #[error("Invalid tuning: expected {expected} open-string notes, got {found}")]
    InvalidTuning { expected: usize, found: usize },

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// A practice record failed validation before being stored.
    #[error("Invalid practice: {0}")]
    InvalidPractice(String),

    #[error("Practice not found: {0}")]
    PracticeNotFound(String),
}
