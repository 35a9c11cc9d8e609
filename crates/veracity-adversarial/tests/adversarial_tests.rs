use std::sync::Arc;

use veracity_adversarial::{
    DebateConfig, DebateOrchestrator, Role, VerificationService, VerifyError, REFUSAL,
    REPETITION_NUDGE,
};
use veracity_core::{EvidenceSet, Label, Method};
use veracity_llm::{LlmError, LlmProvider, MockProvider};

fn one_item() -> EvidenceSet {
    EvidenceSet::normalize(["R1|OpenAI announced GPT-5 at its developer event."])
}

#[tokio::test]
async fn test_end_to_end_single_round() {
    let mock = Arc::new(MockProvider::smart());
    let service = VerificationService::new(mock.clone(), DebateConfig::default().with_rounds(1));

    let report = service.verify("OpenAI launches GPT-5", one_item()).await.unwrap();

    let turns = report.transcript.turns();
    assert_eq!(turns.len(), 2);
    assert!(turns.iter().all(|t| t.content != REFUSAL && !t.content.is_empty()));
    assert!(Label::ALL.contains(&report.debate.label));
    assert!(report.debate.rationale.split_whitespace().count() <= 200);
    assert!(report.debate.confidence <= 100);

    // Two agent turns, one judge call, one control call
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
async fn test_empty_evidence_refuses_every_turn() {
    let mock = Arc::new(MockProvider::smart());
    let orchestrator = DebateOrchestrator::new(mock.clone(), &DebateConfig::default());

    let debate = orchestrator.run("claim", &EvidenceSet::default()).await.unwrap();

    assert_eq!(debate.transcript.len(), 4);
    assert!(debate.transcript.turns().iter().all(|t| t.content == REFUSAL));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_two_rounds_alternate() {
    let mock = Arc::new(MockProvider::scripted(["pro one", "con one", "pro two", "con two"]));
    let orchestrator = DebateOrchestrator::new(mock, &DebateConfig::default().with_rounds(2));

    let debate = orchestrator.run("claim", &one_item()).await.unwrap();

    let turns = debate.transcript.turns();
    assert_eq!(turns.len(), 4);
    for (i, turn) in turns.iter().enumerate() {
        let expected = if i % 2 == 0 { Role::Verifier } else { Role::Challenger };
        assert_eq!(turn.role, expected);
    }
    assert_eq!(debate.transcript.render(), "[A]\npro one\n\n[B]\ncon one\n\n[A]\npro two\n\n[B]\ncon two");
}

#[tokio::test]
async fn test_repeated_turn_regenerated_once() {
    let repeated = format!("Claims: {}", "the report confirms it ".repeat(10));
    let mock = Arc::new(MockProvider::scripted([
        repeated.clone(),
        "con one".to_string(),
        repeated.to_uppercase(),
        "fresh verifier argument".to_string(),
        "con two".to_string(),
    ]));
    let orchestrator = DebateOrchestrator::new(mock.clone(), &DebateConfig::default());

    let debate = orchestrator.run("claim", &one_item()).await.unwrap();

    assert_eq!(mock.call_count(), 5);
    let turns = debate.transcript.turns();
    assert_eq!(turns[2].content, "fresh verifier argument");

    let retry = &mock.requests()[3];
    assert!(retry.prompt.ends_with(REPETITION_NUDGE));
    assert!(retry.temperature < mock.requests()[2].temperature);
}

#[tokio::test]
async fn test_repeated_retry_accepted_unconditionally() {
    let mock = Arc::new(MockProvider::scripted(["same", "con one", "same", "same", "con two"]));
    let orchestrator = DebateOrchestrator::new(mock.clone(), &DebateConfig::default());

    let debate = orchestrator.run("claim", &one_item()).await.unwrap();

    assert_eq!(mock.call_count(), 5);
    assert_eq!(debate.transcript.turns()[2].content, "same");
}

#[tokio::test]
async fn test_malformed_judge_output_uses_keywords() {
    let mock = Arc::new(MockProvider::scripted([
        "pro R1",
        "con R2",
        "After weighing both sides the headline is misleading.",
    ]));
    let service = VerificationService::new(mock, DebateConfig::default().with_rounds(1));

    let (_, verdict) = service.debate("claim", &one_item()).await.unwrap();

    assert_eq!(verdict.label, Label::False);
    assert_eq!(verdict.confidence, 60);
    assert_eq!(verdict.evidence_used, Some(vec!["R1".to_string(), "R2".to_string()]));
}

#[tokio::test]
async fn test_control_prefers_unverified_on_conflict() {
    let mock = Arc::new(MockProvider::smart());
    let service = VerificationService::new(mock.clone(), DebateConfig::default());
    let evidence = EvidenceSet::normalize([
        "R1|The company confirmed the launch.",
        "R2|The company denied any launch this year.",
    ]);

    let verdict = service.control("Company launches product", &evidence).await.unwrap();

    assert_eq!(verdict.label, Label::Unverified);
    assert_eq!(verdict.method, Method::Control);
    let prompt = &mock.requests()[0].prompt;
    assert!(prompt.contains("R1: The company confirmed the launch.\nR2: The company denied"));
    assert!(prompt.contains("If evidence is conflicting, incomplete, or speculative, choose 'unverified'."));
}

#[tokio::test]
async fn test_transport_failure_aborts() {
    let service = VerificationService::new(Arc::new(MockProvider::failing("connection reset")), DebateConfig::default());

    let err = service.verify("claim", one_item()).await.unwrap_err();
    assert!(matches!(err, VerifyError::Generation(LlmError::ConnectionFailed(_))));
}

#[tokio::test]
async fn test_input_errors_before_generation() {
    let mock = Arc::new(MockProvider::smart());
    let service = VerificationService::new(mock.clone(), DebateConfig::default().with_rounds(0));

    assert!(matches!(
        service.verify("   ", one_item()).await,
        Err(VerifyError::EmptyHeadline)
    ));
    assert!(matches!(
        service.verify("claim", one_item()).await,
        Err(VerifyError::InvalidRounds(0))
    ));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_trait_object_provider() {
    let llm: Arc<dyn LlmProvider> = Arc::new(MockProvider::smart());
    let service = VerificationService::new(llm, DebateConfig::default().with_rounds(1));

    let report = service.verify("OpenAI launches GPT-5", one_item()).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["debate"]["method"], "debate");
    assert_eq!(json["control"]["method"], "control");
    assert!(json["control"].get("evidence_used").is_none());
    assert_eq!(json["evidence"][0]["id"], "R1");
    assert_eq!(json["transcript"]["turns"][0]["role"], "verifier");
}
