use crate::common::enums::SlopeDirection;
use crate::common::trend_error::TrendError;
use crate::math::check_prices;
use crate::math::sma::moving_average;

/// Direction of a `window` moving average, comparing its latest value against
/// the value `lookback` positions earlier.
pub fn ma_slope_direction(
    prices: &[f64],
    window: usize,
    lookback: usize,
) -> Result<SlopeDirection, TrendError> {
    check_prices(prices)?;
    if lookback == 0 {
        return Err(TrendError::para("slope lookback must be positive"));
    }
    let need = window
        .checked_add(lookback)
        .ok_or_else(|| TrendError::para("slope window plus lookback overflows"))?;
    if prices.len() < need {
        return Err(TrendError::insufficient_data(prices.len(), need));
    }

    let ma = moving_average(prices, window)?;
    let last_idx = ma.len() - 1;
    match (ma[last_idx], ma[last_idx - lookback]) {
        (Some(latest), Some(earlier)) => Ok(SlopeDirection::from_delta(latest - earlier)),
        _ => Err(TrendError::insufficient_data(prices.len(), need)),
    }
}

/// Direction of the least-squares line through the last `period` prices
pub fn regression_slope_direction(
    prices: &[f64],
    period: usize,
) -> Result<SlopeDirection, TrendError> {
    check_prices(prices)?;
    if period < 2 {
        return Err(TrendError::para("regression period must be at least 2"));
    }
    if prices.len() < period {
        return Err(TrendError::insufficient_data(prices.len(), period));
    }
    let slope = least_squares_slope(&prices[prices.len() - period..]);
    Ok(SlopeDirection::from_delta(slope))
}

/// Ordinary least-squares slope of `values` against their indices
pub fn least_squares_slope(values: &[f64]) -> f64 {
    if values.len() < 2 || values.iter().all(|&v| v == values[0]) {
        return 0.0;
    }
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let (cov, var) = values
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(cov, var), (i, &y)| {
            let dx = i as f64 - x_mean;
            (cov + dx * (y - y_mean), var + dx * dx)
        });
    cov / var
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_least_squares_slope() {
        assert_eq!(least_squares_slope(&[1.0, 3.0, 5.0, 7.0]), 2.0);
        assert_eq!(least_squares_slope(&[4.0, 4.0, 4.0]), 0.0);
        assert_eq!(least_squares_slope(&[1.0]), 0.0);
        assert!(least_squares_slope(&[9.0, 7.0, 8.0, 2.0]) < 0.0);
    }

    #[test]
    fn test_ma_slope_direction() {
        let rising: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        assert_eq!(ma_slope_direction(&rising, 5, 4).unwrap(), SlopeDirection::Rising);

        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        assert_eq!(ma_slope_direction(&falling, 5, 1).unwrap(), SlopeDirection::Falling);

        let flat = vec![3.0; 12];
        assert_eq!(ma_slope_direction(&flat, 5, 4).unwrap(), SlopeDirection::Flat);
    }

    #[test]
    fn test_ma_slope_needs_window_plus_lookback() {
        let prices = vec![1.0; 8];
        assert!(ma_slope_direction(&prices, 5, 3).is_ok());
        assert!(ma_slope_direction(&prices, 5, 4).unwrap_err().is_insufficient_data());
        assert!(ma_slope_direction(&prices, 5, 0).is_err());
        assert!(ma_slope_direction(&prices, 0, 2).is_err());
    }

    #[test]
    fn test_ma_slope_window_overflow() {
        let err = ma_slope_direction(&[1.0, 2.0], usize::MAX, 1).unwrap_err();
        assert_eq!(err.errcode, crate::common::trend_error::ErrCode::ParaError);
        let err = ma_slope_direction(&[1.0, 2.0], 3, usize::MAX).unwrap_err();
        assert_eq!(err.errcode, crate::common::trend_error::ErrCode::ParaError);
    }

    #[test]
    fn test_regression_slope_direction() {
        let prices = [10.0, 9.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(regression_slope_direction(&prices, 4).unwrap(), SlopeDirection::Rising);
        assert_eq!(regression_slope_direction(&prices, 3).unwrap(), SlopeDirection::Rising);
        assert_eq!(regression_slope_direction(&[5.0, 4.0, 3.0], 3).unwrap(), SlopeDirection::Falling);
        assert!(regression_slope_direction(&prices, 7).unwrap_err().is_insufficient_data());
        assert!(regression_slope_direction(&prices, 1).is_err());
        assert!(regression_slope_direction(&[], 3).unwrap_err().is_input_err());
    }
}
