use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::traits::{ChatRequest, ChatResponse, Choice, Provider, ToolCall, ToolDefinition};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<GroqToolCall>>,
}

#[derive(Debug, Deserialize)]
struct GroqToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: GroqFunction,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Deserialize)]
struct GroqFunction {
    name: String,
    arguments: String,
}

/// OpenAI-compatible chat provider targeting the Groq endpoint by default.
///
/// Re-point `base_url` at any compatible server. Per-request timeouts live
/// here; the execution loop bounds only the number of round-trips.
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build a provider from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| Error::Config("GROQ_API_KEY is not set".into()))?;
        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request<'a>(&'a self, request: &ChatRequest<'a>) -> GroqRequest<'a> {
        let messages = request
            .messages
            .iter()
            .map(|m| GroqMessage {
                role: &m.role,
                content: &m.content,
            })
            .collect();

        // Let the model decide when to use tools unless the caller pinned
        // a tool-choice policy.
        let tool_choice = request
            .tools
            .is_some()
            .then(|| request.options.tool_choice.as_deref().unwrap_or("auto"));

        GroqRequest {
            model: &self.model,
            messages,
            tools: request.tools,
            tool_choice,
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }

    fn parse_response(response: GroqResponse) -> ChatResponse {
        let choices = response
            .choices
            .into_iter()
            .map(|c| Choice {
                content: c.message.content.unwrap_or_default(),
                tool_calls: c
                    .message
                    .tool_calls
                    .unwrap_or_default()
                    .into_iter()
                    .map(|tc| ToolCall {
                        id: tc.id,
                        kind: tc.kind,
                        name: tc.function.name,
                        arguments: tc.function.arguments,
                    })
                    .collect(),
            })
            .collect();

        ChatResponse { choices }
    }

    async fn send(&self, body: &GroqRequest<'_>) -> Result<ChatResponse, Error> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GroqResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("failed to decode response body: {e}")))?;

        Ok(Self::parse_response(parsed))
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn chat(
        &self,
        cancel: CancellationToken,
        request: ChatRequest<'_>,
    ) -> Result<ChatResponse, Error> {
        let body = self.build_request(&request);

        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.send(&body) => result,
        }
    }
}
