use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::traits::ToolDefinition;

/// One role-tagged message in a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// A provider-issued request to run one tool.
///
/// Kept flat in the core; providers convert to and from the nested
/// `{"id","type","function":{"name","arguments"}}` wire form at their edge.
/// `arguments` is the raw JSON payload, passed through undecoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: "function".into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// One candidate output from the provider.
#[derive(Debug, Clone, Default)]
pub struct Choice {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl Choice {
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Provider response exposing one or more candidates.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// Free-form generation options forwarded to the provider.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub tool_choice: Option<String>,
}

impl CallOptions {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: impl Into<String>) -> Self {
        self.tool_choice = Some(tool_choice.into());
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub tools: Option<&'a [ToolDefinition]>,
    pub options: &'a CallOptions,
}

/// The generation provider boundary.
///
/// Implementations own their transport, credentials and per-call timeouts;
/// the orchestrator treats `chat` as a single blocking suspension point and
/// never retries it. Cancellation must be honored at every await.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn chat(
        &self,
        cancel: CancellationToken,
        request: ChatRequest<'_>,
    ) -> Result<ChatResponse, Error>;
}
