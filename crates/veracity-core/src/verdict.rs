//! Verdict taxonomy and normalization of model output
//!
//! Models are asked for strict JSON but do not always comply. Parsing is an
//! explicit `Result<StructuredVerdict, ParseFailure>`; on failure a
//! deterministic keyword classifier takes over. Either way the caller gets a
//! [`Verdict`] whose label is one of the four canonical values and whose
//! confidence lies in `0..=100`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Terms checked, in order, when structured parsing fails
const FALSE_TERMS: &[&str] = &["false", "misleading", "inaccurate", "misinformation"];
const TRUE_TERMS: &[&str] = &["true", "accurate", "correct"];
const MIXED_TERMS: &[&str] = &["mixed", "partial"];

/// The four canonical verdict labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    True,
    False,
    Mixed,
    Unverified,
}

impl Label {
    pub const ALL: [Label; 4] = [Label::True, Label::False, Label::Mixed, Label::Unverified];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::True => "true",
            Label::False => "false",
            Label::Mixed => "mixed",
            Label::Unverified => "unverified",
        }
    }

    /// Coerce whatever label string a model produced into the taxonomy
    pub fn coerce(raw: &str) -> Label {
        match raw.trim().to_lowercase().as_str() {
            "true" | "information" => Label::True,
            "false" | "misinformation" => Label::False,
            "mixed" => Label::Mixed,
            _ => Label::Unverified,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which evaluator produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Debate,
    Control,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Debate => "debate",
            Method::Control => "control",
        }
    }
}

/// Final, normalized verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: Label,
    /// Integer confidence in `0..=100`
    pub confidence: u8,
    pub rationale: String,
    /// Evidence ids cited in the debate (judge only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_used: Option<Vec<String>>,
    pub method: Method,
}

impl Verdict {
    pub fn with_evidence_used(mut self, ids: Vec<String>) -> Self {
        self.evidence_used = Some(ids);
        self
    }
}

/// Fields a model returned as JSON, before coercion
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredVerdict {
    #[serde(default)]
    pub label: Option<Value>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub rationale: Option<Value>,
}

/// Raw output could not be read as a structured verdict
#[derive(Debug, Clone, Error)]
#[error("unstructured verdict output: {reason}")]
pub struct ParseFailure {
    pub reason: String,
}

/// Parse model output as a JSON verdict object.
///
/// Markdown code fences are stripped first; the outermost `{...}` span is
/// then parsed, so a JSON object wrapped in prose is still accepted.
pub fn parse_structured(raw: &str) -> Result<StructuredVerdict, ParseFailure> {
    let cleaned = raw.replace("```json", "").replace("```", "");

    let (start, end) = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(ParseFailure {
                reason: "no JSON object found".to_string(),
            })
        }
    };

    serde_json::from_str(&cleaned[start..=end]).map_err(|e| ParseFailure {
        reason: e.to_string(),
    })
}

/// Keyword classification of unstructured text.
///
/// Falsity outranks truth, which outranks mixed framing; no hit means
/// `unverified`.
pub fn classify_fallback(raw: &str) -> Label {
    let lower = raw.to_lowercase();
    let hit = |terms: &[&str]| terms.iter().any(|t| lower.contains(t));

    if hit(FALSE_TERMS) {
        Label::False
    } else if hit(TRUE_TERMS) {
        Label::True
    } else if hit(MIXED_TERMS) {
        Label::Mixed
    } else {
        Label::Unverified
    }
}

/// Map a confidence onto the integer 0-100 scale.
///
/// Values at or below 1.0 are read as fractions and scaled by 100; the
/// result is truncated and clamped. NaN maps to 0.
pub fn normalize_confidence(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let scaled = if value <= 1.0 { value * 100.0 } else { value };
    scaled.trunc().clamp(0.0, 100.0) as u8
}

/// Read a confidence from a JSON number or numeric string (`"85"`, `"85%"`)
pub fn confidence_from_value(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then(|| normalize_confidence(number))
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Per-evaluator normalization policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictNormalizer {
    pub method: Method,
    /// Maximum rationale length in characters
    pub rationale_limit: usize,
    /// Confidence used when none could be read
    pub fallback_confidence: u8,
    /// Rationale used when the structured output carried none
    pub default_rationale: String,
}

impl VerdictNormalizer {
    /// Policy for debate-derived verdicts
    pub fn judge() -> Self {
        Self {
            method: Method::Debate,
            rationale_limit: 400,
            fallback_confidence: 60,
            default_rationale: "Judge analysis completed".to_string(),
        }
    }

    /// Policy for single-pass control verdicts
    pub fn control() -> Self {
        Self {
            method: Method::Control,
            rationale_limit: 500,
            fallback_confidence: 50,
            default_rationale: String::new(),
        }
    }

    /// Normalize raw model output into a verdict. Never fails.
    pub fn normalize(&self, raw: &str) -> Verdict {
        match parse_structured(raw) {
            Ok(structured) => self.from_structured(&structured),
            Err(failure) => {
                let label = classify_fallback(raw);
                tracing::warn!(
                    method = self.method.as_str(),
                    label = label.as_str(),
                    reason = %failure,
                    "Falling back to keyword classification"
                );
                metrics::counter!("veracity_verdict_fallbacks_total", "method" => self.method.as_str())
                    .increment(1);
                Verdict {
                    label,
                    confidence: self.fallback_confidence,
                    rationale: truncate_chars(raw.trim(), self.rationale_limit),
                    evidence_used: None,
                    method: self.method,
                }
            }
        }
    }

    /// Coerce already-parsed fields
    pub fn from_structured(&self, structured: &StructuredVerdict) -> Verdict {
        let label = structured
            .label
            .as_ref()
            .map(|v| Label::coerce(&value_to_text(v)))
            .unwrap_or(Label::Unverified);

        let confidence = structured
            .confidence
            .as_ref()
            .and_then(confidence_from_value)
            .unwrap_or(self.fallback_confidence);

        let rationale = structured
            .rationale
            .as_ref()
            .map(value_to_text)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| self.default_rationale.clone());

        Verdict {
            label,
            confidence,
            rationale: truncate_chars(rationale.trim(), self.rationale_limit),
            evidence_used: None,
            method: self.method,
        }
    }
}
