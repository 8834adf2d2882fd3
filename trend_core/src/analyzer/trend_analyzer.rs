use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::common::enums::{SlopeDirection, TrendLabel};
use crate::common::trend_error::TrendError;
use crate::config::trend_config::TrendConfig;
use crate::math::check_prices;
use crate::math::slope::{ma_slope_direction, regression_slope_direction};
use crate::math::sma::moving_average;

/// Trend labels and the latest averages they were derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub primary_trend: TrendLabel,
    pub secondary_trend: TrendLabel,
    pub last_ma_long: f64,
    pub last_ma_short: f64,
}

/// Full moving average series, aligned with the input prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub long: Vec<Option<f64>>,
    pub short: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlopeReport {
    pub long_ma_slope: SlopeDirection,
    pub short_ma_slope: SlopeDirection,
    pub regression_slope: SlopeDirection,
}

/// Classifies short and long term trend from a close price series
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    pub fn new(config: TrendConfig) -> Result<Self, TrendError> {
        config.check()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Compare the last close against the long and short moving averages.
    ///
    /// Fails with `InvalidInput` for an empty or non-finite series and with
    /// `InsufficientData` when the series is shorter than either window.
    pub fn analyze(&self, prices: &[f64]) -> Result<TrendReport, TrendError> {
        let averages = self.moving_averages(prices)?;
        let last_idx = prices.len() - 1;
        let last = prices[last_idx];

        let (last_ma_long, last_ma_short) = match (averages.long[last_idx], averages.short[last_idx]) {
            (Some(long), Some(short)) => (long, short),
            _ => return Err(TrendError::insufficient_data(prices.len(), self.required_len())),
        };

        let report = TrendReport {
            primary_trend: TrendLabel::classify(last_ma_long, last),
            secondary_trend: TrendLabel::classify(last_ma_short, last),
            last_ma_long,
            last_ma_short,
        };
        debug!(
            last,
            last_ma_long,
            last_ma_short,
            primary = %report.primary_trend,
            secondary = %report.secondary_trend,
            "trend classified"
        );
        Ok(report)
    }

    /// Long and short moving averages over the whole series
    pub fn moving_averages(&self, prices: &[f64]) -> Result<MovingAverages, TrendError> {
        check_prices(prices)?;
        let need = self.required_len();
        if prices.len() < need {
            warn!(len = prices.len(), need, "not enough prices for trend analysis");
            return Err(TrendError::insufficient_data(prices.len(), need));
        }

        Ok(MovingAverages {
            long: moving_average(prices, self.config.long_window)?,
            short: moving_average(prices, self.config.short_window)?,
        })
    }

    /// Slope directions of the long average, the short average and the raw closes
    pub fn slopes(&self, prices: &[f64]) -> Result<SlopeReport, TrendError> {
        let report = SlopeReport {
            long_ma_slope: ma_slope_direction(
                prices,
                self.config.long_window,
                self.config.long_slope_lookback,
            )?,
            short_ma_slope: ma_slope_direction(
                prices,
                self.config.slope_window,
                self.config.short_slope_lookback,
            )?,
            regression_slope: regression_slope_direction(prices, self.config.regression_period)?,
        };
        debug!(?report, "slopes computed");
        Ok(report)
    }

    fn required_len(&self) -> usize {
        self.config.long_window.max(self.config.short_window)
    }
}

/// Analyze `prices` with explicit window sizes
pub fn analyze(prices: &[f64], long_window: usize, short_window: usize) -> Result<TrendReport, TrendError> {
    TrendAnalyzer::new(TrendConfig::with_windows(long_window, short_window)?)?.analyze(prices)
}
