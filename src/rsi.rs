use std::{fmt::Display, num::NonZero};

use crate::{Indicator, IndicatorConfig, IndicatorError, IndicatorSeries, Price, series};

/// Default RSI look-back, as used by the dashboard oscillator pane.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// RSI uses Wilder's smoothing, which has infinite memory: the
/// SMA seed (first `length` price changes) influences all
/// subsequent values. Output begins at price `length + 1`.
///
/// # Example
///
/// ```
/// use chartline_ta::RsiConfig;
/// use std::num::NonZero;
///
/// let config = RsiConfig::new(NonZero::new(14).unwrap());
/// assert_eq!(config.length(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
}

impl RsiConfig {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
        }
    }

    /// Number of price changes averaged by the seed and the
    /// Wilder smoothing.
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_RSI_PERIOD,
        }
    }
}

impl IndicatorConfig for RsiConfig {
    #[inline]
    fn required_prices(&self) -> usize {
        self.length + 1
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({})", self.length)
    }
}

#[derive(Clone, Copy, Debug)]
enum RsiPhase {
    Seeding {
        sum_gain: f64,
        sum_loss: f64,
        changes: usize,
    },
    Active {
        avg_gain: f64,
        avg_loss: f64,
    },
}

/// Relative Strength Index (RSI) with Wilder's smoothing.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// The first `length` price changes are averaged with a simple
/// mean (SMA seed). After seeding, gains and losses are smoothed
/// with Wilder's method:
///
/// ```text
/// avg_gain = (prev_avg_gain × (length − 1) + gain) / length
/// avg_loss = (prev_avg_loss × (length − 1) + loss) / length
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// When `avg_loss` is zero (including a perfectly flat series) RSI
/// is 100 instead of a division by zero.
///
/// # Example
///
/// ```
/// use chartline_ta::{Rsi, RsiConfig};
/// use std::num::NonZero;
///
/// let mut rsi = Rsi::new(RsiConfig::new(NonZero::new(3).unwrap()));
///
/// // Seeding: need 3 price changes (4 prices)
/// assert_eq!(rsi.compute(10.0), None);
/// assert_eq!(rsi.compute(12.0), None);
/// assert_eq!(rsi.compute(11.0), None);
///
/// // changes = +2, −1, +2 → avg_gain=4/3, avg_loss=1/3 → RSI=80
/// let value = rsi.compute(13.0).unwrap();
/// assert!((value - 80.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    prev_price: Option<Price>,
    phase: RsiPhase,
    current: Option<Price>,
    length_reciprocal: f64,
    length_minus_one: f64,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let length = config.length as f64;

        Self {
            config,
            prev_price: None,
            phase: RsiPhase::Seeding {
                sum_gain: 0.0,
                sum_loss: 0.0,
                changes: 0,
            },
            current: None,
            length_reciprocal: 1.0 / length,
            length_minus_one: length - 1.0,
        }
    }

    #[inline]
    fn compute(&mut self, price: Price) -> Option<Self::Output> {
        // First price: no change to measure yet
        let Some(prev_price) = self.prev_price.replace(price) else {
            return self.current;
        };

        let (gain, loss) = Self::gain_and_loss(prev_price, price);

        self.phase = match self.phase {
            RsiPhase::Seeding {
                sum_gain,
                sum_loss,
                changes,
            } => {
                let (sum_gain, sum_loss, changes) = (sum_gain + gain, sum_loss + loss, changes + 1);

                if changes == self.config.length {
                    RsiPhase::Active {
                        avg_gain: sum_gain * self.length_reciprocal,
                        avg_loss: sum_loss * self.length_reciprocal,
                    }
                } else {
                    RsiPhase::Seeding {
                        sum_gain,
                        sum_loss,
                        changes,
                    }
                }
            }
            RsiPhase::Active { avg_gain, avg_loss } => RsiPhase::Active {
                avg_gain: avg_gain.mul_add(self.length_minus_one, gain) * self.length_reciprocal,
                avg_loss: avg_loss.mul_add(self.length_minus_one, loss) * self.length_reciprocal,
            },
        };

        self.current = match self.phase {
            RsiPhase::Active { avg_gain, avg_loss } => {
                Some(Self::rsi_from_averages(avg_gain, avg_loss))
            }
            RsiPhase::Seeding { .. } => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Rsi {
    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (Price, Price) {
        let change = price - prev_price;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        (gain, loss)
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({})", self.config.length)
    }
}

/// Wilder RSI of `prices` over `period` price changes.
///
/// The first `period` entries are `None` (a value needs `period` changes,
/// i.e. `period + 1` prices).
///
/// # Errors
///
/// [`IndicatorError::InvalidPeriod`] if `period` is zero.
///
/// # Example
///
/// ```
/// use chartline_ta::{rsi, DEFAULT_RSI_PERIOD};
///
/// let prices = [44.0, 44.25, 44.5, 43.75, 44.65, 45.1, 45.42, 45.84];
/// let series = rsi(&prices, DEFAULT_RSI_PERIOD).unwrap();
/// assert!(series.iter().all(Option::is_none));
/// ```
pub fn rsi(prices: &[Price], period: usize) -> Result<IndicatorSeries, IndicatorError> {
    let config = RsiConfig::new(series::period("period", period)?);
    tracing::trace!(%config, len = prices.len(), "computing RSI");
    Ok(Rsi::series(config, prices))
}
