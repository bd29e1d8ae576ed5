use serde::{Deserialize, Serialize};

/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Candle open timestamp, in milliseconds since the Unix epoch as
/// delivered by exchange kline endpoints.
pub type Timestamp = u64;

/// OHLC bar data accepted by candle-based operations
/// ([`fibonacci_levels`](crate::fibonacci_levels),
/// [`closes`](crate::closes), chart assembly).
///
/// Implement this on your own kline type to avoid converting every bar
/// into a [`Candle`].
///
/// # Example
///
/// ```
/// use chartline_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn open_time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Bar open timestamp. Used as the `x` coordinate of chart points.
    fn open_time(&self) -> Timestamp;
}

/// A timestamped OHLC candle.
///
/// Serializes in the shape charting widgets consume:
/// `{"x": timestamp, "y": [open, high, low, close]}`.
///
/// ```
/// use chartline_ta::Candle;
///
/// let candle = Candle::new(1_700_000_000_000, 10.0, 12.0, 9.5, 11.0);
/// assert_eq!(candle.close, 11.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandlePoint", into = "CandlePoint")]
pub struct Candle {
    pub timestamp: Timestamp,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Candle {
    #[must_use]
    pub fn new(timestamp: Timestamp, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }
}

impl Ohlcv for Candle {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn open_time(&self) -> Timestamp {
        self.timestamp
    }
}

#[derive(Serialize, Deserialize)]
struct CandlePoint {
    x: Timestamp,
    y: [Price; 4],
}

impl From<CandlePoint> for Candle {
    fn from(point: CandlePoint) -> Self {
        let [open, high, low, close] = point.y;
        Self::new(point.x, open, high, low, close)
    }
}

impl From<Candle> for CandlePoint {
    fn from(candle: Candle) -> Self {
        Self {
            x: candle.timestamp,
            y: [candle.open, candle.high, candle.low, candle.close],
        }
    }
}
