//! Near-duplicate suppression for consecutive same-role turns

use veracity_llm::{LlmError, LlmProvider};

use crate::gateway::generate;
use crate::prompts::REPETITION_NUDGE;
use crate::transcript::{Role, Transcript};

/// Number of leading characters compared
pub const DEFAULT_PREFIX_CHARS: usize = 160;

/// Regenerates a turn once when it opens the same way as the same role's
/// previous turn.
///
/// Only the immediately preceding turn of that role is consulted, so a role
/// cycling back to older material is not caught.
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionGuard {
    pub prefix_chars: usize,
    /// Temperature of the single retry; must stay below the turn temperature
    pub retry_temperature: f32,
}

impl Default for RepetitionGuard {
    fn default() -> Self {
        Self {
            prefix_chars: DEFAULT_PREFIX_CHARS,
            retry_temperature: 0.6,
        }
    }
}

impl RepetitionGuard {
    pub fn new(retry_temperature: f32) -> Self {
        Self {
            retry_temperature,
            ..Self::default()
        }
    }

    fn prefix(&self, text: &str) -> String {
        text.trim()
            .chars()
            .take(self.prefix_chars)
            .collect::<String>()
            .to_lowercase()
    }

    /// Whether `candidate` repeats `previous` (case-insensitive prefix match)
    pub fn is_repeat(&self, previous: &str, candidate: &str) -> bool {
        let previous = self.prefix(previous);
        !previous.is_empty() && previous == self.prefix(candidate)
    }

    /// Check `candidate` against `role`'s last turn in `transcript`; on a
    /// match, regenerate once with [`REPETITION_NUDGE`] appended to `prompt`
    /// and return that result without checking it again.
    pub async fn enforce<L>(
        &self,
        llm: &L,
        model: &str,
        prompt: &str,
        role: Role,
        transcript: &Transcript,
        candidate: String,
    ) -> Result<String, LlmError>
    where
        L: LlmProvider + ?Sized,
    {
        let repeated = transcript
            .last_by(role)
            .is_some_and(|prev| self.is_repeat(&prev.content, &candidate));
        if !repeated {
            return Ok(candidate);
        }

        tracing::warn!(%role, "Turn repeats previous turn, regenerating once");
        metrics::counter!("veracity_repetition_retries_total").increment(1);

        let nudged = format!("{}\n{}", prompt, REPETITION_NUDGE);
        generate(llm, model, &nudged, self.retry_temperature).await
    }
}
