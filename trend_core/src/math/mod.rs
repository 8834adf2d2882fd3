pub mod slope;
pub mod sma;

use crate::common::trend_error::TrendError;

/// Reject empty series and any element that is not a finite number
pub fn check_prices(prices: &[f64]) -> Result<(), TrendError> {
    if prices.is_empty() {
        return Err(TrendError::invalid_input("price series is empty"));
    }
    if let Some((idx, price)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(TrendError::invalid_input(format!(
            "price at index {} is not a finite number: {}",
            idx, price
        )));
    }
    Ok(())
}
