pub mod analyzer;
pub mod common;
pub mod config;
pub mod math;

pub use analyzer::trend_analyzer::{analyze, MovingAverages, SlopeReport, TrendAnalyzer, TrendReport};
pub use common::enums::{SlopeDirection, TrendLabel};
pub use common::trend_error::{ErrCode, TrendError};
pub use config::trend_config::TrendConfig;
