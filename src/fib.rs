use serde::{Deserialize, Serialize};

use crate::{Ohlcv, Price};

/// Retracement ratios and the labels charts annotate them with.
///
/// Labels are fixed strings rather than formatted from the ratio, since
/// `0.236 * 100.0` is not exactly `23.6` in binary floating point.
pub const FIB_RATIOS: [(f64, &str); 7] = [
    (0.0, "0%"),
    (0.236, "23.6%"),
    (0.382, "38.2%"),
    (0.5, "50%"),
    (0.618, "61.8%"),
    (0.786, "78.6%"),
    (1.0, "100%"),
];

/// One retracement ratio applied to a high/low swing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    pub label: String,
    pub ratio: f64,
    pub price: Price,
}

/// Fibonacci retracement levels over the whole candle window.
///
/// The swing runs from the highest high down to the lowest low, and each
/// level sits at `high − (high − low) × ratio`. A flat window (`high ==
/// low`) collapses every level onto that price. An empty window has no
/// swing and yields no levels.
///
/// # Example
///
/// ```
/// use chartline_ta::{Candle, fibonacci_levels};
///
/// let candles = [
///     Candle::new(1, 150.0, 200.0, 140.0, 190.0),
///     Candle::new(2, 190.0, 195.0, 100.0, 110.0),
/// ];
/// let levels = fibonacci_levels(&candles);
///
/// assert_eq!(levels.len(), 7);
/// assert_eq!(levels[0].label, "0%");
/// assert_eq!(levels[0].price, 200.0);
/// assert_eq!(levels[3].label, "50%");
/// assert_eq!(levels[3].price, 150.0);
/// assert_eq!(levels[6].price, 100.0);
/// ```
#[must_use]
pub fn fibonacci_levels<C: Ohlcv>(candles: &[C]) -> Vec<FibLevel> {
    let Some((high, low)) = swing(candles) else {
        return Vec::new();
    };
    let range = high - low;

    tracing::trace!(high, low, candles = candles.len(), "computing Fibonacci levels");

    FIB_RATIOS
        .iter()
        .map(|&(ratio, label)| FibLevel {
            label: label.to_owned(),
            ratio,
            price: (-range).mul_add(ratio, high),
        })
        .collect()
}

/// Highest high and lowest low of the window, `None` when empty.
fn swing<C: Ohlcv>(candles: &[C]) -> Option<(Price, Price)> {
    let first = candles.first()?;

    Some(
        candles
            .iter()
            .fold((first.high(), first.low()), |(high, low), candle| {
                (high.max(candle.high()), low.min(candle.low()))
            }),
    )
}
