//! HTTP client for the Ollama generate API.

use crate::{AssistantConfig, AssistantError, Result, explanation_prompt, summary_prompt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use srs_core::{DataTable, ValidationFinding};
use std::fmt;
use tracing::{debug, warn};

/// What a completion was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Explanation of a sheet's validation findings
    ValidationExplanation,
    /// Description of a sheet's content
    DataSummary,
}

impl ResponseKind {
    /// Returns the stored name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::ValidationExplanation => "validation_explanation",
            ResponseKind::DataSummary => "data_summary",
        }
    }

    /// Text used when the model answers without a `response` field.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            ResponseKind::ValidationExplanation => "No explanation returned.",
            ResponseKind::DataSummary => "No summary returned.",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A model answer together with what produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Kind of request
    pub kind: ResponseKind,
    /// Prompt sent to the model
    pub prompt: String,
    /// Model answer, or the kind's fallback text
    pub text: String,
    /// Model that answered
    pub model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Client for explanations and summaries.
pub struct Assistant {
    http_client: Client,
    config: AssistantConfig,
}

impl Assistant {
    /// Creates an assistant from a validated configuration.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        config.validate()?;
        let http_client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Asks the model why a sheet failed validation and how to fix it.
    pub async fn explain_findings(
        &self,
        sheet: &str,
        findings: &[ValidationFinding],
    ) -> Result<Completion> {
        let prompt = explanation_prompt(sheet, findings);
        self.generate(ResponseKind::ValidationExplanation, prompt).await
    }

    /// Asks the model to describe a sheet from its first rows.
    pub async fn summarize_sheet(&self, table: &DataTable) -> Result<Completion> {
        let prompt = summary_prompt(table);
        self.generate(ResponseKind::DataSummary, prompt).await
    }

    async fn generate(&self, kind: ResponseKind, prompt: String) -> Result<Completion> {
        let url = self.config.generate_url();
        debug!("Requesting {} from {} ({})", kind, url, self.config.model);

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.config.model,
                prompt: &prompt,
                stream: false,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Model endpoint error: {} - {}", status, body);
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))?;

        let text = body
            .response
            .unwrap_or_else(|| kind.fallback_text().to_string());
        debug!("Received {} characters of {}", text.len(), kind);

        Ok(Completion {
            kind,
            prompt,
            text,
            model: self.config.model.clone(),
        })
    }
}
