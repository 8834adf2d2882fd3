use std::collections::VecDeque;

use crate::common::trend_error::TrendError;
use crate::math::check_prices;

/// Simple moving average over a sliding window.
///
/// Keeps the last `period` prices in a ring buffer and a compensated running
/// sum, so each `add` is O(1). When every price in the window is identical the
/// average is that price exactly, with no summation error.
#[derive(Debug, Clone)]
pub struct SMA {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
    compensation: f64,
    last_price: Option<f64>,
    same_run: usize,
}

impl SMA {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::new(),
            sum: 0.0,
            compensation: 0.0,
            last_price: None,
            same_run: 0,
        }
    }

    /// Push the next price, returning the average once the window is full
    pub fn add(&mut self, price: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }

        self.window.push_back(price);
        self.accumulate(price);
        if self.window.len() > self.period {
            if let Some(old) = self.window.pop_front() {
                self.accumulate(-old);
            }
            if !(self.sum + self.compensation).is_finite() {
                self.resum();
            }
        }

        if self.last_price == Some(price) {
            self.same_run += 1;
        } else {
            self.same_run = 1;
        }
        self.last_price = Some(price);

        if self.window.len() < self.period {
            None
        } else if self.same_run >= self.period {
            Some(price)
        } else {
            Some((self.sum + self.compensation) / self.period as f64)
        }
    }

    // a non-finite price poisons the running sum until it leaves the window
    fn resum(&mut self) {
        self.sum = 0.0;
        self.compensation = 0.0;
        for i in 0..self.window.len() {
            let price = self.window[i];
            self.accumulate(price);
        }
    }

    // Neumaier summation
    fn accumulate(&mut self, x: f64) {
        let t = self.sum + x;
        if self.sum.abs() >= x.abs() {
            self.compensation += (self.sum - t) + x;
        } else {
            self.compensation += (x - t) + self.sum;
        }
        self.sum = t;
    }
}

/// Moving average of `prices`, aligned with the input.
///
/// Position `i` holds the mean of the `window` prices ending at `i`, or `None`
/// while fewer than `window` prices have been seen.
pub fn moving_average(prices: &[f64], window: usize) -> Result<Vec<Option<f64>>, TrendError> {
    check_prices(prices)?;
    if window == 0 {
        return Err(TrendError::para("moving average window must be positive"));
    }
    let mut sma = SMA::new(window);
    Ok(prices.iter().map(|&p| sma.add(p)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_small() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(ma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_matches_direct_summation() {
        let prices: Vec<f64> = (0..40).map(|i| ((i * 7) % 11) as f64 + 0.25).collect();
        let window = 6;
        let ma = moving_average(&prices, window).unwrap();
        for i in window - 1..prices.len() {
            let direct = prices[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            assert!((ma[i].unwrap() - direct).abs() < 1e-12);
        }
    }

    #[test]
    fn test_length_equal_to_window() {
        let ma = moving_average(&[4.0, 8.0, 6.0], 3).unwrap();
        assert_eq!(ma.iter().filter(|v| v.is_some()).count(), 1);
        assert_eq!(ma[2], Some(6.0));
    }

    #[test]
    fn test_shorter_than_window() {
        let ma = moving_average(&[1.0, 2.0], 5).unwrap();
        assert!(ma.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_zero_window() {
        let err = moving_average(&[1.0], 0).unwrap_err();
        assert_eq!(err.errcode, crate::common::trend_error::ErrCode::ParaError);
    }

    #[test]
    fn test_constant_window_is_exact() {
        let mut sma = SMA::new(10);
        let mut last = None;
        for _ in 0..25 {
            last = sma.add(0.1);
        }
        assert_eq!(last, Some(0.1));
    }

    #[test]
    fn test_huge_window() {
        assert_eq!(moving_average(&[1.0, 2.0], 1 << 40).unwrap(), vec![None, None]);
        assert_eq!(moving_average(&[1.0, 2.0], usize::MAX).unwrap(), vec![None, None]);
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = moving_average(&[f64::NAN, 1.0, 2.0, 3.0, 4.0], 2).unwrap_err();
        assert!(err.is_input_err());
        assert!(moving_average(&[], 2).unwrap_err().is_input_err());
    }

    #[test]
    fn test_sma_recovers_after_nan_leaves() {
        let mut sma = SMA::new(2);
        let out: Vec<Option<f64>> = [f64::NAN, 1.0, 2.0, 3.0, 4.0].iter().map(|&p| sma.add(p)).collect();
        assert!(out[0].is_none());
        assert!(out[1].unwrap().is_nan());
        assert_eq!(&out[2..], &[Some(1.5), Some(2.5), Some(3.5)]);

        let mut sma = SMA::new(2);
        sma.add(f64::INFINITY);
        sma.add(1.0);
        assert_eq!(sma.add(5.0), Some(3.0));
    }

    #[test]
    fn test_window_of_one() {
        let ma = moving_average(&[3.0, 1.0, 2.0], 1).unwrap();
        assert_eq!(ma, vec![Some(3.0), Some(1.0), Some(2.0)]);
    }
}
