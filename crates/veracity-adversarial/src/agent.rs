//! Role-locked argumentative turns

use std::sync::Arc;

use veracity_core::EvidenceSet;
use veracity_llm::{LlmError, LlmProvider};

use crate::gateway::generate;
use crate::prompts::{CHALLENGER_SYSTEM, REFUSAL, TURN_INSTRUCTION, VERIFIER_SYSTEM};
use crate::repetition::RepetitionGuard;
use crate::transcript::{Role, Transcript, Turn};

/// Evidence items shown to an agent per turn
pub const MAX_TURN_EVIDENCE: usize = 8;

/// How far a misconfigured retry temperature is pulled under the turn
pub const RETRY_TEMPERATURE_GAP: f32 = 0.1;

/// Produces exactly one [`Turn`] per call for either side of the debate
#[derive(Debug)]
pub struct AgentTurnEngine<L: ?Sized> {
    llm: Arc<L>,
    model: String,
    /// Sampling temperature of a normal turn
    pub temperature: f32,
    pub guard: RepetitionGuard,
    pub max_evidence: usize,
}

impl<L: LlmProvider + ?Sized> AgentTurnEngine<L> {
    pub fn new(llm: Arc<L>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: 0.7,
            guard: RepetitionGuard::default(),
            max_evidence: MAX_TURN_EVIDENCE,
        }
    }

    /// Set turn and retry temperatures, both kept in `[0, 1]`. A retry that
    /// is not strictly below the turn is lowered to
    /// `turn - RETRY_TEMPERATURE_GAP` (floored at zero).
    pub fn with_temperatures(mut self, turn: f32, retry: f32) -> Self {
        let turn = turn.clamp(0.0, 1.0);
        let mut retry = retry.clamp(0.0, 1.0);
        if retry >= turn {
            let lowered = (turn - RETRY_TEMPERATURE_GAP).max(0.0);
            tracing::warn!(turn, retry, lowered, "Retry temperature must be below turn temperature");
            retry = lowered;
        }
        self.temperature = turn;
        self.guard.retry_temperature = retry;
        self
    }

    pub fn with_max_evidence(mut self, max_evidence: usize) -> Self {
        self.max_evidence = max_evidence;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Role instruction followed by headline, transcript so far and evidence
    pub fn build_prompt(
        &self,
        role: Role,
        headline: &str,
        transcript: &Transcript,
        evidence: &EvidenceSet,
    ) -> String {
        let system = match role {
            Role::Verifier => VERIFIER_SYSTEM,
            Role::Challenger => CHALLENGER_SYSTEM,
        };
        let history = if transcript.is_empty() {
            "(none)".to_string()
        } else {
            transcript.render()
        };

        format!(
            "{}\n\nHeadline: {}\nTranscript:\n{}\nEvidence:\n{}\n{}",
            system,
            headline.trim(),
            history,
            evidence.render_bullets(self.max_evidence),
            TURN_INSTRUCTION
        )
    }

    /// Generate `role`'s next turn.
    ///
    /// With no evidence the turn is the fixed refusal and the provider is not
    /// called at all.
    pub async fn take_turn(
        &self,
        role: Role,
        headline: &str,
        transcript: &Transcript,
        evidence: &EvidenceSet,
    ) -> Result<Turn, LlmError> {
        if evidence.is_empty() {
            tracing::debug!(%role, "No evidence, refusing turn");
            metrics::counter!("veracity_refusals_total").increment(1);
            return Ok(Turn::new(role, REFUSAL));
        }

        let prompt = self.build_prompt(role, headline, transcript, evidence);
        let first = generate(self.llm.as_ref(), &self.model, &prompt, self.temperature).await?;
        let content = self
            .guard
            .enforce(self.llm.as_ref(), &self.model, &prompt, role, transcript, first)
            .await?;

        tracing::debug!(%role, chars = content.len(), "Turn generated");
        Ok(Turn::new(role, content))
    }
}
