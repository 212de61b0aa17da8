pub mod config;
pub mod curves;
pub mod evaluate;

use clap::Args;
use shelflife_core::{Config, RatePolicy, Scenario};

/// Scenario inputs; each flag overrides the stored configuration.
#[derive(Args, Debug, Default)]
pub struct ScenarioArgs {
    /// Initial capacity (%), 50-100
    #[arg(long)]
    pub capacity: Option<u32>,
    /// Storage time (months), 0-120
    #[arg(long)]
    pub months: Option<u32>,
    /// Additional days, 0-31
    #[arg(long)]
    pub days: Option<u32>,
    /// Additional hours, 0-23
    #[arg(long)]
    pub hours: Option<u32>,
    /// Lowest temperature (°C), -20-25
    #[arg(long, allow_negative_numbers = true)]
    pub min_temp: Option<i32>,
    /// Highest temperature (°C), 25-60
    #[arg(long, allow_negative_numbers = true)]
    pub max_temp: Option<i32>,
    /// Temperature step (°C), 1-10
    #[arg(long)]
    pub temp_step: Option<i32>,
    /// First highlighted temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub highlight_start: Option<i32>,
    /// Second highlighted temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub highlight_end: Option<i32>,
    /// Monthly loss fraction at the base temperature
    #[arg(long)]
    pub base_rate: Option<f64>,
    /// Reference temperature for the base rate (°C)
    #[arg(long, allow_negative_numbers = true)]
    pub base_temp: Option<f64>,
    /// Nominal capacity (Ah) for charge and current estimates
    #[arg(long)]
    pub nominal_ah: Option<f64>,
    /// Handling of rates at or above 100%/month: strict or clamp
    #[arg(long)]
    pub rate_policy: Option<RatePolicy>,
}

impl ScenarioArgs {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(v) = self.capacity {
            config.battery.initial_capacity_percent = v;
        }
        if let Some(v) = self.months {
            config.storage.months = v;
        }
        if let Some(v) = self.days {
            config.storage.days = v;
        }
        if let Some(v) = self.hours {
            config.storage.hours = v;
        }
        if let Some(v) = self.min_temp {
            config.temperature.min = v;
        }
        if let Some(v) = self.max_temp {
            config.temperature.max = v;
        }
        if let Some(v) = self.temp_step {
            config.temperature.step = v;
        }
        if self.highlight_start.is_some() {
            config.highlight.start = self.highlight_start;
        }
        if self.highlight_end.is_some() {
            config.highlight.end = self.highlight_end;
        }
        if let Some(v) = self.base_rate {
            config.battery.base_rate_per_month = v;
        }
        if let Some(v) = self.base_temp {
            config.battery.base_temp_celsius = v;
        }
        if self.nominal_ah.is_some() {
            config.battery.nominal_capacity_ah = self.nominal_ah;
        }
        if let Some(v) = self.rate_policy {
            config.model.rate_policy = v;
        }
    }

    /// Stored configuration with these flags applied, as a validated scenario.
    pub fn scenario(&self) -> Result<Scenario, Box<dyn std::error::Error>> {
        let mut config = Config::load()?;
        self.apply(&mut config);
        tracing::debug!(?config, "resolved scenario configuration");
        Ok(Scenario::from_config(&config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_only_given_fields() {
        let args = ScenarioArgs {
            months: Some(6),
            min_temp: Some(-20),
            rate_policy: Some(RatePolicy::Clamp),
            ..Default::default()
        };
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.storage.months, 6);
        assert_eq!(config.temperature.min, -20);
        assert_eq!(config.temperature.max, 40);
        assert_eq!(config.model.rate_policy, RatePolicy::Clamp);
        assert_eq!(config.highlight.start, None);
    }
}
