//! Gemini API client
//!
//! Sends one `generateContent` request per batch with a JSON response schema
//! and parses the returned array into [`ClassificationResult`]s.

use async_trait::async_trait;
use ctriage_common::ClassificationResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use super::classifier::{finalize_batch, ClassificationError, CommentClassifier};
use super::prompt;

const USER_AGENT: &str = concat!("ctriage/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Base URL up to the API version, e.g. `https://.../v1beta`
    pub base_url: String,
    /// Transport timeout for one request
    pub timeout: Duration,
}

/// generateContent response (fields this client reads)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Gemini-backed comment classifier
pub struct GeminiClient {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ClassificationError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassificationError::NetworkError(e.to_string()))?;

        Ok(Self { http_client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Request body for one batch
    pub fn build_request_body(comments: &[String]) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": prompt::build_instructions() }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt::build_batch_content(comments) }]
            }],
            "generationConfig": {
                "temperature": 0.2,
                "responseMimeType": "application/json",
                "responseSchema": prompt::response_schema()
            }
        })
    }

    /// Extract the result array from a generateContent response
    pub fn parse_response(
        response: &GenerateContentResponse,
    ) -> Result<Vec<ClassificationResult>, ClassificationError> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_ref())
        {
            return Err(ClassificationError::ApiError(
                200,
                format!("request blocked: {}", reason),
            ));
        }

        let text: String = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyResponse);
        }

        serde_json::from_str(&text).map_err(|e| ClassificationError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl CommentClassifier for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn classify(
        &self,
        comments: &[String],
    ) -> Result<Vec<ClassificationResult>, ClassificationError> {
        if comments.is_empty() {
            return Err(ClassificationError::EmptyBatch);
        }

        tracing::debug!(
            model = %self.config.model,
            count = comments.len(),
            "Sending classification request"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&Self::build_request_body(comments))
            .send()
            .await
            .map_err(|e| ClassificationError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ClassificationError::InvalidApiKey);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClassificationError::ApiError(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassificationError::NetworkError(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(ClassificationError::EmptyResponse);
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ClassificationError::ParseError(e.to_string()))?;
        let results = finalize_batch(comments.len(), Self::parse_response(&parsed)?)?;

        tracing::info!(
            model = %self.config.model,
            count = results.len(),
            "Classification request succeeded"
        );

        Ok(results)
    }
}
