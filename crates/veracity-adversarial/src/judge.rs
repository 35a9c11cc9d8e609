//! Verdict synthesis from a finished debate

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use veracity_core::{EvidenceSet, Verdict, VerdictNormalizer};
use veracity_llm::{LlmError, LlmProvider};

use crate::gateway::generate;
use crate::prompts::JUDGE_SYSTEM;
use crate::transcript::Transcript;

static EVIDENCE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bR\d+\b").expect("valid regex"));

/// Citations reported with a debate verdict
pub const MAX_CITED_IDS: usize = 6;

/// Evidence IDs cited in `text`, first occurrence order, without duplicates.
///
/// IDs are not checked against the evidence set; an agent citing `R9` out of
/// a set of three is reported as-is.
pub fn cited_ids(text: &str, limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for m in EVIDENCE_ID.find_iter(text) {
        if seen.len() == limit {
            break;
        }
        if !seen.iter().any(|id| id == m.as_str()) {
            seen.push(m.as_str().to_string());
        }
    }
    seen
}

/// Weighs the debate on argument quality and evidence, not on which side
/// argued it.
#[derive(Debug)]
pub struct Judge<L: ?Sized> {
    llm: Arc<L>,
    model: String,
    temperature: f32,
    normalizer: VerdictNormalizer,
}

impl<L: LlmProvider + ?Sized> Judge<L> {
    pub fn new(llm: Arc<L>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: 0.1,
            normalizer: VerdictNormalizer::judge(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn build_prompt(&self, headline: &str, evidence: &EvidenceSet, transcript: &Transcript) -> String {
        format!(
            "{}\n\nHeadline to evaluate:\n{}\n\nEvidence available:\n{}\n\nDebate transcript:\n{}\n\n\
             Analyze the debate and provide your verdict in JSON format.",
            JUDGE_SYSTEM,
            headline.trim(),
            evidence.render(),
            transcript.render()
        )
    }

    /// One generation call; malformed output is absorbed by the normalizer,
    /// transport failures are not.
    pub async fn evaluate(
        &self,
        headline: &str,
        evidence: &EvidenceSet,
        transcript: &Transcript,
    ) -> Result<Verdict, LlmError> {
        let prompt = self.build_prompt(headline, evidence, transcript);
        let raw = generate(self.llm.as_ref(), &self.model, &prompt, self.temperature).await?;

        let verdict = self
            .normalizer
            .normalize(&raw)
            .with_evidence_used(cited_ids(&transcript.render(), MAX_CITED_IDS));

        tracing::info!(
            label = %verdict.label,
            confidence = verdict.confidence,
            "Judge verdict"
        );
        metrics::counter!("veracity_verdicts_total", "method" => "debate").increment(1);
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Role, Turn};
    use veracity_core::{Label, Method};
    use veracity_llm::MockProvider;

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.push(Turn::new(Role::Verifier, "R2 and R1 agree; see R2 again")).unwrap();
        t.push(Turn::new(Role::Challenger, "R3, R4, R5, R6, R7 and R10x are weak")).unwrap();
        t
    }

    #[test]
    fn test_cited_ids_dedup_and_limit() {
        let ids = cited_ids(&transcript().render(), MAX_CITED_IDS);
        assert_eq!(ids, vec!["R2", "R1", "R3", "R4", "R5", "R6"]);
        assert!(cited_ids("no citations here", 6).is_empty());
        assert!(cited_ids("XR1 R1x", 6).is_empty());
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let mock = Arc::new(MockProvider::constant("The headline is clearly misleading."));
        let judge = Judge::new(mock.clone(), "judge-model");
        let evidence = EvidenceSet::normalize(["R1|fact"]);

        let verdict = judge.evaluate("claim", &evidence, &transcript()).await.unwrap();

        assert_eq!(verdict.label, Label::False);
        assert_eq!(verdict.confidence, 60);
        assert_eq!(verdict.method, Method::Debate);
        assert_eq!(verdict.evidence_used.as_ref().map(Vec::len), Some(6));

        let request = &mock.requests()[0];
        assert_eq!(request.model.as_deref(), Some("judge-model"));
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
        assert!(request.prompt.contains("Debate transcript:\n[A]\n"));
    }

    #[tokio::test]
    async fn test_structured_output() {
        let mock = Arc::new(MockProvider::constant(
            "```json\n{\"label\": \"mixed\", \"confidence\": \"0.42\", \"rationale\": \"split\"}\n```",
        ));
        let verdict = Judge::new(mock, "m")
            .evaluate("claim", &EvidenceSet::default(), &Transcript::new())
            .await
            .unwrap();

        assert_eq!(verdict.label, Label::Mixed);
        assert_eq!(verdict.confidence, 42);
        assert_eq!(verdict.rationale, "split");
        assert_eq!(verdict.evidence_used, Some(vec![]));
    }
}
