//! services/api/src/adapters/feedback_llm.rs
//!
//! This module contains the adapter for the report-feedback LLM.
//! It implements the `FeedbackService` port from the `core` crate against
//! an OpenAI-compatible chat-completions gateway.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::error;

use goal_tracker_core::ports::{FeedbackService, PortError, PortResult};

/// An adapter that implements `FeedbackService` over a chat-completions
/// endpoint. The gateway's rate and quota limits map onto the port's
/// `RateLimited` and `QuotaExhausted` errors; neither is retried here.
#[derive(Clone)]
pub struct GatewayFeedbackAdapter {
    http: Client,
    url: String,
    api_key: String,
    model: String,
}

impl GatewayFeedbackAdapter {
    /// Creates a new `GatewayFeedbackAdapter`.
    pub fn new(url: String, api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl FeedbackService for GatewayFeedbackAdapter {
    /// Sends the prompt under the fixed system instruction and returns the
    /// model's feedback text. The content is opaque; it is never parsed.
    async fn generate_feedback(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> PortResult<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_instruction },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(PortError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => return Err(PortError::QuotaExhausted),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                error!("AI gateway returned {status}: {body}");
                return Err(PortError::Upstream("AI gateway error".to_string()));
            }
            _ => {}
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PortError::Upstream(e.to_string()))?;

        let feedback = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("Unable to generate feedback.")
            .to_string();
        Ok(feedback)
    }
}
