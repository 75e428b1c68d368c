//! Weather lookup, run only after a human approves it.

use super::{parse_args, GET_WEATHER_INFORMATION};
use crate::errors::ToolError;
use crate::tools::{ToolContext, ToolExecutor};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize)]
struct WeatherArgs {
    city: String,
}

/// Reports the weather for a city.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherInformation;

#[async_trait]
impl ToolExecutor for WeatherInformation {
    async fn execute(
        &self,
        args: serde_json::Value,
        _ctx: &ToolContext,
    ) -> Result<serde_json::Value, ToolError> {
        let WeatherArgs { city } = parse_args(GET_WEATHER_INFORMATION, args)?;
        info!(%city, "Getting weather information");
        Ok(serde_json::Value::String(format!("The weather in {city} is sunny")))
    }
}
