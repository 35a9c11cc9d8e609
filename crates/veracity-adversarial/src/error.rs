//! Error taxonomy for verification requests

use thiserror::Error;
use veracity_llm::LlmError;

use crate::transcript::Role;

/// Terminal failures of a verification request.
///
/// Malformed model output and missing evidence are not errors: they are
/// absorbed by the verdict fallback and the refusal path respectively.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("No headline provided")]
    EmptyHeadline,

    #[error("A debate needs at least one round, got {0}")]
    InvalidRounds(u32),

    #[error("{role} cannot speak now; it is the {expected}'s turn")]
    OutOfTurn { role: Role, expected: Role },

    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// Reject requests that must not start a debate
pub fn validate_request(headline: &str, rounds: u32) -> Result<(), VerifyError> {
    if headline.trim().is_empty() {
        return Err(VerifyError::EmptyHeadline);
    }
    if rounds == 0 {
        return Err(VerifyError::InvalidRounds(rounds));
    }
    Ok(())
}
