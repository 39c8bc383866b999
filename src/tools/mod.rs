use serde::de::DeserializeOwned;

use crate::error::Error;

pub mod calculator;
pub mod text;
pub mod weather;

pub use calculator::CalculatorTool;
pub use text::TextTool;
pub use weather::WeatherTool;

/// Decode a raw JSON argument payload into a typed argument struct,
/// tagging failures with the tool name so they surface as decode errors
/// rather than execution errors.
pub fn decode_args<T: DeserializeOwned>(tool: &str, raw: &str) -> Result<T, Error> {
    serde_json::from_str(raw).map_err(|source| Error::ArgumentDecode {
        tool: tool.to_string(),
        source,
    })
}
