//! End-to-end verification: debate, judge and control side by side

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use veracity_core::{EvidenceSet, Verdict};
use veracity_llm::LlmProvider;

use crate::control::ControlEvaluator;
use crate::debate::{Debate, DebateConfig, DebateOrchestrator};
use crate::error::{validate_request, VerifyError};
use crate::judge::Judge;
use crate::transcript::Transcript;

/// Everything produced for one headline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub id: Uuid,
    pub headline: String,
    pub evidence: EvidenceSet,
    pub transcript: Transcript,
    /// Judge verdict over the debate
    pub debate: Verdict,
    /// Single-pass baseline
    pub control: Verdict,
    pub completed_at: DateTime<Utc>,
}

impl VerificationReport {
    /// Both methods reached the same label
    pub fn agrees(&self) -> bool {
        self.debate.label == self.control.label
    }
}

/// Entry point for callers. Holds no per-request state; every call owns its
/// transcript and verdicts.
#[derive(Debug)]
pub struct VerificationService<L: ?Sized> {
    llm: Arc<L>,
    config: DebateConfig,
}

impl<L: LlmProvider + ?Sized> VerificationService<L> {
    pub fn new(llm: Arc<L>, config: DebateConfig) -> Self {
        Self { llm, config }
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Run the debate and judge it
    pub async fn debate(
        &self,
        headline: &str,
        evidence: &EvidenceSet,
    ) -> Result<(Debate, Verdict), VerifyError> {
        let debate = DebateOrchestrator::new(self.llm.clone(), &self.config)
            .run(headline, evidence)
            .await?;

        let verdict = Judge::new(self.llm.clone(), self.config.judge_model.clone())
            .with_temperature(self.config.judge_temperature)
            .evaluate(&debate.headline, evidence, &debate.transcript)
            .await?;
        Ok((debate, verdict))
    }

    /// Control verdict only
    pub async fn control(&self, headline: &str, evidence: &EvidenceSet) -> Result<Verdict, VerifyError> {
        if headline.trim().is_empty() {
            return Err(VerifyError::EmptyHeadline);
        }
        let verdict = ControlEvaluator::new(self.llm.clone(), self.config.judge_model.clone())
            .with_temperature(self.config.control_temperature)
            .evaluate(headline, evidence)
            .await?;
        Ok(verdict)
    }

    /// Debate path and control path run concurrently; either failing aborts
    /// the whole request.
    pub async fn verify(
        &self,
        headline: &str,
        evidence: EvidenceSet,
    ) -> Result<VerificationReport, VerifyError> {
        validate_request(headline, self.config.rounds)?;

        let ((debate, judged), control) =
            tokio::try_join!(self.debate(headline, &evidence), self.control(headline, &evidence))?;

        tracing::info!(
            debate_id = %debate.id,
            debate = %judged.label,
            control = %control.label,
            "Verification complete"
        );

        Ok(VerificationReport {
            id: debate.id,
            headline: debate.headline,
            evidence,
            transcript: debate.transcript,
            debate: judged,
            control,
            completed_at: Utc::now(),
        })
    }
}
