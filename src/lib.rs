pub mod agent;
pub mod config;
pub mod error;
pub mod providers;
pub mod schema;
pub mod tools;
pub mod traits;

pub use agent::{AgentLoop, ToolRegistry};
pub use config::{AgentConfig, Config, ProviderConfig};
pub use error::Error;
pub use providers::GroqProvider;
pub use schema::Schema;
pub use tools::{CalculatorTool, TextTool, WeatherTool};
pub use traits::{
    CallOptions, ChatMessage, ChatRequest, ChatResponse, Choice, ExecutionContext, Provider, Tool,
    ToolCall, ToolDefinition, ToolResult,
};
