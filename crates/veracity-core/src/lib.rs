//! # Veracity Core
//!
//! Data model shared by the debate and verdict stages.
//!
//! ## Key Types
//!
//! - [`EvidenceSet`]: ordered, citable evidence normalized from
//!   heterogeneous [`RawEvidence`]
//! - [`Verdict`]: a label from the fixed taxonomy plus confidence
//! - [`VerdictNormalizer`]: turns arbitrary model output into a [`Verdict`]
//!
//! ## Quick Start
//!
//! ```rust
//! use veracity_core::{EvidenceSet, Label, VerdictNormalizer};
//!
//! let evidence = EvidenceSet::normalize(["R1|OpenAI released GPT-5."]);
//! assert_eq!(evidence.render(), "R1: OpenAI released GPT-5.");
//!
//! // Malformed output still yields a canonical label
//! let verdict = VerdictNormalizer::judge().normalize("clearly misleading");
//! assert_eq!(verdict.label, Label::False);
//! ```

pub mod evidence;
pub mod verdict;

pub use evidence::{
    clean_text, parse_user_evidence, EvidenceError, EvidenceItem, EvidenceRecord, EvidenceSet,
    EvidenceSource, FileEvidence, RawEvidence, StaticEvidence, NO_EVIDENCE,
};
pub use verdict::{
    classify_fallback, confidence_from_value, normalize_confidence, parse_structured, Label,
    Method, ParseFailure, StructuredVerdict, Verdict, VerdictNormalizer,
};
