use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};

use crate::coach::prompt::{ChatMessage, CoachTarget};
use crate::config::CoachConfig;
use crate::error::SparkError;
use crate::metrics::Metrics;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_completion_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Pass-through to an OpenAI-compatible chat completion endpoint
#[derive(Clone)]
pub struct CoachClient {
    http: Client,
    config: CoachConfig,
    api_key: Option<String>,
    metrics: Metrics,
}

impl CoachClient {
    pub fn new(config: CoachConfig, api_key: Option<String>) -> Result<Self, SparkError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| SparkError::new(format!("Failed to create HTTP client: {}", e), "coach"))?;
        Ok(CoachClient {
            http,
            config,
            api_key,
            metrics: Metrics::new(),
        })
    }

    /// Build from config, reading the key from the configured env var
    pub fn from_env(config: CoachConfig) -> Result<Self, SparkError> {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(var = %config.api_key_env, "Coach API key not set");
        }
        Self::new(config, api_key)
    }

    /// Count replies and failures in a shared set of counters
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// One coach reply about `target`, given the conversation so far
    pub async fn reply(
        &self,
        target: &CoachTarget,
        history: &[ChatMessage],
    ) -> Result<String, SparkError> {
        let item = &target.item;
        let messages = target.messages(history);
        let limit = Duration::from_secs(self.config.timeout_secs);
        let start = std::time::Instant::now();

        let result = timeout(limit, self.call(&messages)).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(text)) => {
                self.metrics.record_coach_reply();
                tracing::info!(
                    model = %self.config.model,
                    skill = %item.id,
                    latency_ms,
                    "Coach reply"
                );
                Ok(text)
            }
            Ok(Err(e)) => {
                self.metrics.record_error();
                tracing::warn!(model = %self.config.model, latency_ms, error = %e, "Coach call failed");
                Err(SparkError::from(e).with_context(format!("skill: {}", item.id)))
            }
            Err(elapsed) => {
                self.metrics.record_error();
                tracing::error!(
                    model = %self.config.model,
                    duration_secs = limit.as_secs(),
                    "Coach call timed out"
                );
                Err(SparkError::from(elapsed).with_context(format!("skill: {}", item.id)))
            }
        }
    }

    async fn call(&self, messages: &[ChatMessage]) -> Result<String> {
        let mut request = self.http.post(&self.config.endpoint).json(&ChatRequest {
            model: &self.config.model,
            messages,
            max_completion_tokens: self.config.max_tokens,
            stream: false,
        });
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach coach endpoint {}", self.config.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Coach endpoint returned {}: {}", status, body);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Coach endpoint returned invalid JSON")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .context("Coach endpoint returned an empty reply")
    }
}
