//! # Veracity Adversarial
//!
//! Adversarial verification of a headline: two role-locked agents debate it
//! over the supplied evidence, an impartial judge weighs the transcript, and a
//! single-pass control evaluator gives a baseline to compare against.
//!
//! ## Key Types
//!
//! - [`DebateOrchestrator`]: alternates Verifier and Challenger turns
//! - [`AgentTurnEngine`]: one role-locked turn, guarded by [`RepetitionGuard`]
//! - [`Judge`] / [`ControlEvaluator`]: verdicts in the shared taxonomy
//! - [`VerificationService`]: debate and control run side by side
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use veracity_adversarial::{DebateConfig, VerificationService};
//! use veracity_core::EvidenceSet;
//! use veracity_llm::MockProvider;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = VerificationService::new(
//!     Arc::new(MockProvider::smart()),
//!     DebateConfig::default().with_rounds(1),
//! );
//! let evidence = EvidenceSet::normalize(["R1|OpenAI announced GPT-5 today."]);
//!
//! let report = service.verify("OpenAI launches GPT-5", evidence).await?;
//! assert_eq!(report.transcript.len(), 2);
//! println!("debate: {}, control: {}", report.debate.label, report.control.label);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod control;
pub mod debate;
pub mod error;
pub mod gateway;
pub mod judge;
pub mod prompts;
pub mod repetition;
pub mod service;
pub mod transcript;

pub use agent::{AgentTurnEngine, MAX_TURN_EVIDENCE, RETRY_TEMPERATURE_GAP};
pub use control::ControlEvaluator;
pub use debate::{Debate, DebateConfig, DebateOrchestrator};
pub use error::{validate_request, VerifyError};
pub use gateway::generate;
pub use judge::{cited_ids, Judge, MAX_CITED_IDS};
pub use prompts::{REFUSAL, REPETITION_NUDGE};
pub use repetition::RepetitionGuard;
pub use service::{VerificationReport, VerificationService};
pub use transcript::{Role, Transcript, Turn};
