use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Direction of the last close relative to a moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    #[strum(serialize = "bullish")]
    Bullish,
    #[strum(serialize = "bearish")]
    Bearish,
}

impl TrendLabel {
    /// Bullish only when the average sits strictly below the close; ties are bearish.
    pub fn classify(average: f64, close: f64) -> Self {
        if average < close {
            TrendLabel::Bullish
        } else {
            TrendLabel::Bearish
        }
    }
}

/// Sign of a slope over a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlopeDirection {
    #[strum(serialize = "rising")]
    Rising,
    #[strum(serialize = "falling")]
    Falling,
    #[strum(serialize = "flat")]
    Flat,
}

impl SlopeDirection {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            SlopeDirection::Rising
        } else if delta < 0.0 {
            SlopeDirection::Falling
        } else {
            SlopeDirection::Flat
        }
    }
}
