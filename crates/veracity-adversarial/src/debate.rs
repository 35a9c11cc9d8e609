//! Debate protocol between the Verifier and the Challenger

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use veracity_core::EvidenceSet;
use veracity_llm::{LlmProvider, VeracityConfig, DEFAULT_MODEL};

use crate::agent::{AgentTurnEngine, MAX_TURN_EVIDENCE};
use crate::error::{validate_request, VerifyError};
use crate::transcript::{Role, Transcript};

/// Models, temperatures and length of one verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Verifier/Challenger pairs; at least 1
    pub rounds: u32,
    pub agent_model: String,
    pub judge_model: String,
    pub agent_temperature: f32,
    /// Used for the single anti-repetition retry
    pub retry_temperature: f32,
    pub judge_temperature: f32,
    pub control_temperature: f32,
    pub max_turn_evidence: usize,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            rounds: 2,
            agent_model: DEFAULT_MODEL.to_string(),
            judge_model: DEFAULT_MODEL.to_string(),
            agent_temperature: 0.7,
            retry_temperature: 0.6,
            judge_temperature: 0.1,
            control_temperature: 0.0,
            max_turn_evidence: MAX_TURN_EVIDENCE,
        }
    }
}

impl DebateConfig {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }
}

impl From<&VeracityConfig> for DebateConfig {
    fn from(config: &VeracityConfig) -> Self {
        Self {
            rounds: config.rounds,
            agent_model: config.llm.agent_model.clone(),
            judge_model: config.llm.judge_model.clone(),
            ..Self::default()
        }
    }
}

/// A finished debate about one headline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debate {
    /// Unique ID
    pub id: Uuid,
    pub headline: String,
    /// Rounds requested
    pub rounds: u32,
    pub transcript: Transcript,
}

impl Debate {
    pub fn new(headline: &str, rounds: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            headline: headline.trim().to_string(),
            rounds,
            transcript: Transcript::new(),
        }
    }

    /// Completed Verifier/Challenger pairs
    pub fn round_count(&self) -> usize {
        self.transcript.len() / 2
    }
}

/// Runs the turn sequence and returns the transcript for the verdict stage
#[derive(Debug)]
pub struct DebateOrchestrator<L: ?Sized> {
    engine: AgentTurnEngine<L>,
    rounds: u32,
}

impl<L: LlmProvider + ?Sized> DebateOrchestrator<L> {
    pub fn new(llm: Arc<L>, config: &DebateConfig) -> Self {
        let engine = AgentTurnEngine::new(llm, config.agent_model.clone())
            .with_temperatures(config.agent_temperature, config.retry_temperature)
            .with_max_evidence(config.max_turn_evidence);
        Self {
            engine,
            rounds: config.rounds,
        }
    }

    /// Stage the full debate: an opening Verifier/Challenger pair, then
    /// `rounds - 1` further pairs. Each turn sees everything said before it.
    pub async fn run(&self, headline: &str, evidence: &EvidenceSet) -> Result<Debate, VerifyError> {
        validate_request(headline, self.rounds)?;

        let mut debate = Debate::new(headline, self.rounds);
        tracing::info!(
            debate_id = %debate.id,
            rounds = self.rounds,
            evidence = evidence.len(),
            "Starting debate"
        );
        metrics::counter!("veracity_debates_total").increment(1);

        for round in 1..=self.rounds {
            for role in [Role::Verifier, Role::Challenger] {
                let turn = self
                    .engine
                    .take_turn(role, &debate.headline, &debate.transcript, evidence)
                    .await?;
                debate.transcript.push(turn)?;
                metrics::counter!("veracity_turns_total").increment(1);
            }
            tracing::debug!(debate_id = %debate.id, round, "Round complete");
        }

        tracing::info!(
            debate_id = %debate.id,
            turns = debate.transcript.len(),
            "Debate finished"
        );
        Ok(debate)
    }
}
