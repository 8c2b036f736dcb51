// ⚙️ Configuration - server settings from flags with environment fallbacks

use crate::forecast::ForecastEngine;
use crate::holiday_policy::DEFAULT_HOLIDAY_HOURS;
use clap::Args;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "PTO_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Base hours credited to each federal-calendar holiday
    #[arg(long = "holiday-hours", env = "PTO_HOLIDAY_HOURS", default_value_t = DEFAULT_HOLIDAY_HOURS)]
    pub default_holiday_hours: f64,
}

impl ServerConfig {
    pub fn engine(&self) -> ForecastEngine {
        ForecastEngine::with_default_holiday_hours(self.default_holiday_hours)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: DEFAULT_BIND.to_string(),
            default_holiday_hours: DEFAULT_HOLIDAY_HOURS,
        }
    }
}
