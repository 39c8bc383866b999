use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Error;
use crate::schema::Schema;
use crate::tools::decode_args;
use crate::traits::{ExecutionContext, Tool};

const CONDITIONS: &[&str] = &["sunny", "cloudy", "rainy", "partly cloudy"];

/// Simulated weather lookup. The reading is derived from the time of day
/// rather than a real service, so it is stable enough for demos without
/// network access.
pub struct WeatherTool;

#[derive(Debug, Deserialize)]
struct WeatherArgs {
    location: String,
    #[serde(default)]
    unit: Option<String>,
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for a specified location"
    }

    fn parameters(&self) -> Schema {
        Schema::object()
            .with_property(
                "location",
                Schema::string("The city and state/country for weather lookup"),
            )
            .with_property(
                "unit",
                Schema::string("Temperature unit (celsius or fahrenheit)")
                    .with_enum(&["celsius", "fahrenheit"]),
            )
            .with_required(&["location"])
    }

    async fn execute(&self, _ctx: &ExecutionContext, args: &str) -> Result<String, Error> {
        let args: WeatherArgs = decode_args(self.name(), args)?;
        let unit = args.unit.as_deref().unwrap_or("celsius");

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let day_fraction = (secs % 86_400) as f64 / 86_400.0;
        let mut temp = 20.0 + (day_fraction * std::f64::consts::TAU).sin() * 10.0;

        let symbol = match unit {
            "fahrenheit" => {
                temp = temp * 9.0 / 5.0 + 32.0;
                "°F"
            }
            _ => "°C",
        };

        let condition = CONDITIONS[(secs % CONDITIONS.len() as u64) as usize];

        Ok(format!(
            "Weather in {}: {:.1}{}, {}",
            args.location, temp, symbol, condition
        ))
    }
}
