use std::num::NonZero;

use crate::{IndicatorError, Ohlcv, Price};

/// Indicator output aligned 1:1 with the input prices.
///
/// `None` marks indices where the indicator is undefined because there is
/// not enough history yet. Serializes as `null`, never as `NaN`.
pub type IndicatorSeries = Vec<Option<Price>>;

/// Extracts closing prices from a candle window, in order.
///
/// ```
/// use chartline_ta::{Candle, closes};
///
/// let candles = [
///     Candle::new(1, 9.0, 11.0, 8.0, 10.0),
///     Candle::new(2, 10.0, 12.0, 9.0, 11.5),
/// ];
/// assert_eq!(closes(&candles), vec![10.0, 11.5]);
/// ```
#[must_use]
pub fn closes<C: Ohlcv>(candles: &[C]) -> Vec<Price> {
    candles.iter().map(Ohlcv::close).collect()
}

/// Validates a window length parameter.
pub(crate) fn period(name: &'static str, value: usize) -> Result<NonZero<usize>, IndicatorError> {
    NonZero::new(value).ok_or(IndicatorError::InvalidPeriod { name, value })
}
