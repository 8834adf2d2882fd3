use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::common::trend_error::TrendError;

/// Trend analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendConfig {
    pub long_window: usize,
    pub short_window: usize,
    pub long_slope_lookback: usize,
    pub slope_window: usize,
    pub short_slope_lookback: usize,
    pub regression_period: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            long_window: 50,
            short_window: 14,
            long_slope_lookback: 4,
            slope_window: 9,
            short_slope_lookback: 1,
            regression_period: 9,
        }
    }
}

impl TrendConfig {
    /// Build from a key/value map; absent keys keep their defaults
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, TrendError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let config = Self {
            long_window: conf.get("long_window")?.unwrap_or(default.long_window),
            short_window: conf.get("short_window")?.unwrap_or(default.short_window),
            long_slope_lookback: conf
                .get("long_slope_lookback")?
                .unwrap_or(default.long_slope_lookback),
            slope_window: conf.get("slope_window")?.unwrap_or(default.slope_window),
            short_slope_lookback: conf
                .get("short_slope_lookback")?
                .unwrap_or(default.short_slope_lookback),
            regression_period: conf
                .get("regression_period")?
                .unwrap_or(default.regression_period),
        };

        conf.check()?;
        config.check()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, TrendError> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| TrendError::para(format!("invalid config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    pub fn with_windows(long_window: usize, short_window: usize) -> Result<Self, TrendError> {
        let config = Self {
            long_window,
            short_window,
            ..Self::default()
        };
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), TrendError> {
        let positive = [
            ("long_window", self.long_window),
            ("short_window", self.short_window),
            ("long_slope_lookback", self.long_slope_lookback),
            ("slope_window", self.slope_window),
            ("short_slope_lookback", self.short_slope_lookback),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(TrendError::para(format!("{} must be positive", name)));
            }
        }
        if self.regression_period < 2 {
            return Err(TrendError::para("regression_period must be at least 2"));
        }
        Ok(())
    }
}

/// Key/value config that tracks which keys have been consumed
struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, TrendError> {
        match self.conf.remove(key) {
            None => Ok(None),
            Some(v) => serde_json::from_value(v)
                .map(Some)
                .map_err(|e| TrendError::para(format!("invalid value for {}: {}", key, e))),
        }
    }

    fn check(&self) -> Result<(), TrendError> {
        let mut unknown: Vec<&str> = self.conf.keys().map(String::as_str).collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort_unstable();
        Err(TrendError::para(format!("unknown para = {}", unknown.join(", "))))
    }
}
