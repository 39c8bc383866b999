use thiserror::Error;

/// Error type shared across the registry, dispatch path and execution loop.
///
/// Callers can match on variants to distinguish "no such tool / bad call
/// shape" from "tool ran and failed" from "provider unreachable or returned
/// nothing usable" and decide their own retry policy.
#[derive(Error, Debug)]
pub enum Error {
    #[error("tool name cannot be empty")]
    EmptyToolName,

    #[error("tool '{0}' already registered")]
    AlreadyRegistered(String),

    #[error("tool '{0}' not found")]
    ToolNotFound(String),

    #[error("unsupported tool call type: {0}")]
    UnsupportedCallKind(String),

    #[error("invalid arguments for tool '{tool}': {source}")]
    ArgumentDecode {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("tool '{tool}' execution failed: {source}")]
    ToolExecution {
        tool: String,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("no response choices received")]
    EmptyResponse,

    #[error("operation cancelled")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
