//! # SRS Assistant
//!
//! Plain-language explanations of validation findings and short summaries of
//! data sheets, generated by a local [Ollama](https://ollama.com) model.
//!
//! The assistant is a collaborator of the validation engine: it never changes
//! a report, it only describes one. Failures are reported as
//! [`AssistantError`] so callers can decide whether to carry on without an
//! explanation.
//!
//! ## Example
//!
//! ```no_run
//! use srs_assistant::{Assistant, AssistantConfig};
//! use srs_core::ValidationFinding;
//!
//! # async fn run() -> srs_assistant::Result<()> {
//! let config = AssistantConfig::builder()
//!     .endpoint("http://localhost:11434")
//!     .model("mistral")
//!     .build()?;
//! let assistant = Assistant::new(config)?;
//!
//! let findings = vec![ValidationFinding::below_min("Salary", 30000.0)];
//! let completion = assistant.explain_findings("Employees", &findings).await?;
//! println!("{}", completion.text);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod prompt;

pub use client::{Assistant, Completion, ResponseKind};
pub use config::*;
pub use error::{AssistantError, Result};
pub use prompt::{SAMPLE_ROWS, explanation_prompt, summary_prompt};
