use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::Error;
use crate::schema::{self, Schema};

/// Context handed to every tool execution.
///
/// Carries the caller-supplied cancellation token and the id of the
/// originating call so long-running tools can abort cooperatively and
/// correlate their logs.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    pub cancel: CancellationToken,
    pub call_id: Option<String>,
}

impl ExecutionContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            call_id: None,
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }
}

/// Provider-facing tool definition: `{"type":"function","function":{...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Result of executing a tool, correlated back to its call by id.
///
/// Serializes to the wire shape `{"tool_call_id":..,"role":"tool","content":..}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub role: String,
    pub content: String,
}

impl ToolResult {
    pub fn new(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            role: "tool".into(),
            content: content.into(),
        }
    }
}

/// Contract every tool must satisfy.
///
/// `args` is the raw JSON argument payload as the provider produced it.
/// Decoding it against the declared schema is the tool's responsibility;
/// the registry does not validate arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters(&self) -> Schema;

    async fn execute(&self, ctx: &ExecutionContext, args: &str) -> Result<String, Error>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: schema::to_provider_value(&self.parameters()),
            },
        }
    }
}
