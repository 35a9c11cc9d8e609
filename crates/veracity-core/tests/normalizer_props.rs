//! Property tests for verdict normalization and evidence loading

use proptest::prelude::*;
use serde_json::json;
use veracity_core::{
    normalize_confidence, parse_structured, EvidenceSource, FileEvidence, Label, VerdictNormalizer,
};

proptest! {
    /// Arbitrary text never escapes the taxonomy or the confidence range
    #[test]
    fn prop_any_text_normalizes(raw in ".*") {
        for normalizer in [VerdictNormalizer::judge(), VerdictNormalizer::control()] {
            let verdict = normalizer.normalize(&raw);
            prop_assert!(Label::ALL.contains(&verdict.label));
            prop_assert!(verdict.confidence <= 100);
            prop_assert!(verdict.rationale.chars().count() <= normalizer.rationale_limit);
        }
    }

    /// Structured output with any label/confidence is coerced into range
    #[test]
    fn prop_structured_normalizes(label in "[a-zA-Z ]{0,16}", confidence in -1.0e6f64..1.0e6) {
        let raw = json!({"label": label, "confidence": confidence, "rationale": "r"}).to_string();
        let verdict = VerdictNormalizer::judge().normalize(&raw);
        prop_assert!(Label::ALL.contains(&verdict.label));
        prop_assert!(verdict.confidence <= 100);
    }

    /// Fractions map onto whole percentages
    #[test]
    fn prop_fraction_scaling(pct in 0u8..=100) {
        let scaled = normalize_confidence(f64::from(pct));
        prop_assert_eq!(scaled, if pct <= 1 { pct * 100 } else { pct });
    }
}

#[test]
fn test_plain_prose_is_a_parse_failure() {
    let err = parse_structured("The headline is accurate.").unwrap_err();
    assert!(err.reason.contains("no JSON object"));
}

#[tokio::test]
async fn test_file_evidence_json_and_lines() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("evidence.json");
    std::fs::write(
        &json_path,
        r#"[{"title": "GPT-5", "text": "OpenAI   released GPT-5.", "source": "https://example.org"}, "X|second"]"#,
    )
    .unwrap();
    let set = FileEvidence::new(&json_path).gather("GPT-5", 6).await.unwrap();
    assert_eq!(set.ids(), vec!["R1", "R2"]);
    assert_eq!(set.items()[0].text, "OpenAI released GPT-5.");
    assert_eq!(set.items()[0].source.as_deref(), Some("https://example.org"));

    let lines_path = dir.path().join("evidence.txt");
    std::fs::write(&lines_path, "E1|first\nsecond line\n").unwrap();
    let set = FileEvidence::new(&lines_path).load().await.unwrap();
    assert_eq!(set.ids(), vec!["E1", "U2"]);
}

#[tokio::test]
async fn test_file_evidence_missing_file() {
    let err = FileEvidence::new("/definitely/not/here.json")
        .load()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[tokio::test]
async fn test_file_evidence_tolerates_loose_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scraped.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 3, "text": "Numeric id survives"},
            {"title": "Nested source", "source": {"name": "AP News"}},
            null,
            42
        ]"#,
    )
    .unwrap();

    let set = FileEvidence::new(&path).gather("topic", 6).await.unwrap();
    assert_eq!(set.ids(), vec!["R1", "R2", "R3"]);
    assert_eq!(set.items()[0].text, "Numeric id survives");
    assert_eq!(set.items()[1].source.as_deref(), Some("AP News"));
    assert_eq!(set.items()[2].text, "42");
}

#[tokio::test]
async fn test_file_evidence_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"[{"text": "unterminated"#).unwrap();
    assert!(FileEvidence::new(&path).load().await.is_err());
}
