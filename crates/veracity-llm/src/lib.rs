//! # Veracity LLM
//!
//! Generation backends for the Veracity debate protocol.
//!
//! ## Supported Backends
//!
//! | Provider | Type | Key Required |
//! |----------|------|--------------|
//! | Gemini | API | `GEMINI_API_KEY` |
//! | OpenAI (or compatible) | API | `OPENAI_API_KEY` |
//! | Ollama | Local | None |
//! | Mock | Testing | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use veracity_llm::{MockProvider, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Use mock provider for testing
//!     let llm = MockProvider::constant("R1 confirms the headline.");
//!
//!     let response = llm.ask("Is the headline accurate?").await.unwrap();
//!     assert_eq!(response, "R1 confirms the headline.");
//!     assert_eq!(llm.call_count(), 1);
//! }
//! ```
//!
//! ## With Gemini
//!
//! ```rust,ignore
//! use veracity_llm::GeminiProvider;
//!
//! let api_key = std::env::var("GEMINI_API_KEY").unwrap();
//! let llm = GeminiProvider::flash(&api_key);
//!
//! let response = llm.ask("Summarize R1 in one line").await.unwrap();
//! ```

pub mod config;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod provider;

pub use config::{ConfigError, LlmConfig, VeracityConfig, DEFAULT_MODEL};
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
pub use provider::{LlmError, LlmProvider, LlmRequest, LlmResponse};
