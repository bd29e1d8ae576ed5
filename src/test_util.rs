// src/test_util.rs

use crate::{Candle, Price};
use std::num::NonZero;

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

pub fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

/// Candle with only high/low set; open and close sit at the midpoint.
pub fn swing(time: u64, high: Price, low: Price) -> Candle {
    let mid = f64::midpoint(high, low);
    Candle::new(time, mid, high, low, mid)
}

/// Candles with OHLC all equal to the given close, timestamps 1, 2, 3, ...
pub fn flat_candles(closes: &[Price]) -> Vec<Candle> {
    closes
        .iter()
        .zip(1..)
        .map(|(&close, time)| Candle::new(time, close, close, close, close))
        .collect()
}

/// Number of leading `None` entries before the first defined value.
pub fn leading_gaps(series: &[Option<Price>]) -> usize {
    series.iter().take_while(|value| value.is_none()).count()
}
