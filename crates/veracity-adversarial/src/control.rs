//! Single-pass baseline verdict without a debate

use std::sync::Arc;

use veracity_core::{EvidenceSet, Verdict, VerdictNormalizer};
use veracity_llm::{LlmError, LlmProvider};

use crate::gateway::generate;
use crate::prompts::CONTROL_SYSTEM;

/// Classifies the headline straight from the evidence. Instructed to prefer
/// `unverified` whenever the evidence does not settle the question.
#[derive(Debug)]
pub struct ControlEvaluator<L: ?Sized> {
    llm: Arc<L>,
    model: String,
    temperature: f32,
    normalizer: VerdictNormalizer,
}

impl<L: LlmProvider + ?Sized> ControlEvaluator<L> {
    pub fn new(llm: Arc<L>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: 0.0,
            normalizer: VerdictNormalizer::control(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build_prompt(&self, headline: &str, evidence: &EvidenceSet) -> String {
        format!(
            "{}\n\nHeadline:\n{}\n\nEvidence:\n{}\n\nOutput JSON only.",
            CONTROL_SYSTEM,
            headline.trim(),
            evidence.render()
        )
    }

    pub async fn evaluate(&self, headline: &str, evidence: &EvidenceSet) -> Result<Verdict, LlmError> {
        let prompt = self.build_prompt(headline, evidence);
        let raw = generate(self.llm.as_ref(), &self.model, &prompt, self.temperature).await?;
        let verdict = self.normalizer.normalize(&raw);

        tracing::info!(
            label = %verdict.label,
            confidence = verdict.confidence,
            "Control verdict"
        );
        metrics::counter!("veracity_verdicts_total", "method" => "control").increment(1);
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_core::{Label, Method, NO_EVIDENCE};
    use veracity_llm::MockProvider;

    #[test]
    fn test_prompt_without_evidence() {
        let control = ControlEvaluator::new(Arc::new(MockProvider::smart()), "m");
        let prompt = control.build_prompt("claim", &EvidenceSet::default());
        assert!(prompt.contains(&format!("Evidence:\n{}", NO_EVIDENCE)));
        assert!(prompt.contains("choose 'unverified'"));
        assert!(prompt.ends_with("Output JSON only."));
    }

    #[tokio::test]
    async fn test_no_keywords_means_unverified() {
        let mock = Arc::new(MockProvider::constant("Hard to say from these sources."));
        let verdict = ControlEvaluator::new(mock.clone(), "m")
            .evaluate("claim", &EvidenceSet::normalize(["R1|a", "R2|b"]))
            .await
            .unwrap();

        assert_eq!(verdict.label, Label::Unverified);
        assert_eq!(verdict.confidence, 50);
        assert_eq!(verdict.method, Method::Control);
        assert!(verdict.evidence_used.is_none());
        assert_eq!(mock.requests()[0].temperature, 0.0);
    }

    #[tokio::test]
    async fn test_long_rationale_is_bounded() {
        let raw = format!("{{\"label\": \"true\", \"confidence\": 90, \"rationale\": \"{}\"}}", "x".repeat(900));
        let verdict = ControlEvaluator::new(Arc::new(MockProvider::constant(&raw)), "m")
            .evaluate("claim", &EvidenceSet::normalize(["R1|a"]))
            .await
            .unwrap();
        assert_eq!(verdict.label, Label::True);
        assert_eq!(verdict.rationale.chars().count(), 500);
    }
}
