pub mod provider;
pub mod tool;

pub use provider::{CallOptions, ChatMessage, ChatRequest, ChatResponse, Choice, Provider, ToolCall};
pub use tool::{ExecutionContext, FunctionDefinition, Tool, ToolDefinition, ToolResult};
