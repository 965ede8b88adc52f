use thiserror::Error;

/// Failure kinds surfaced by the analysis and cipher routines.
///
/// "Cannot analyze" outcomes (text too short, nothing alphabetic) are not
/// errors; the crackers report those as `CrackResult { success: false, .. }`.
/// This enum is reserved for contract violations and genuinely unexpected
/// failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("cracking failed: {0}")]
    CrackingFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
