use std::{fmt::Display, num::NonZero};

use serde::Serialize;

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorError, IndicatorSeries, Price, series,
};

const DEFAULT_FAST: NonZero<usize> = NonZero::new(12).unwrap();
const DEFAULT_SLOW: NonZero<usize> = NonZero::new(26).unwrap();
const DEFAULT_SIGNAL: NonZero<usize> = NonZero::new(9).unwrap();

/// Configuration for the [`Macd`] indicator.
///
/// Defaults to the classic MACD(12, 26, 9).
///
/// # Example
///
/// ```
/// use chartline_ta::MacdConfig;
/// use std::num::NonZero;
///
/// let config = MacdConfig::builder()
///     .fast(NonZero::new(5).unwrap())
///     .slow(NonZero::new(35).unwrap())
///     .build();
///
/// assert_eq!(config.fast(), 5);
/// assert_eq!(config.slow(), 35);
/// assert_eq!(config.signal(), 9);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    signal: NonZero<usize>,
}

impl MacdConfig {
    /// Returns a new builder starting from MACD(12, 26, 9).
    #[must_use]
    pub fn builder() -> MacdConfigBuilder {
        MacdConfigBuilder {
            config: Self::default(),
        }
    }

    /// Validates raw periods, naming the offending one on error.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidPeriod`] if any period is zero.
    pub fn try_new(fast: usize, slow: usize, signal: usize) -> Result<Self, IndicatorError> {
        Ok(Self {
            fast: series::period("fast", fast)?,
            slow: series::period("slow", slow)?,
            signal: series::period("signal", signal)?,
        })
    }

    /// Fast EMA length.
    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast.get()
    }

    /// Slow EMA length.
    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow.get()
    }

    /// Signal EMA length, applied to the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal.get()
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
        }
    }
}

impl IndicatorConfig for MacdConfig {
    /// Prices needed for the first MACD line value. The signal line
    /// needs `signal - 1` more.
    #[inline]
    fn required_prices(&self) -> usize {
        self.fast().max(self.slow())
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MacdConfig({}, {}, {})", self.fast, self.slow, self.signal)
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: fast = 12, slow = 26, signal = 9.
pub struct MacdConfigBuilder {
    config: MacdConfig,
}

impl MacdConfigBuilder {
    #[inline]
    #[must_use]
    pub fn fast(mut self, fast: NonZero<usize>) -> Self {
        self.config.fast = fast;
        self
    }

    #[inline]
    #[must_use]
    pub fn slow(mut self, slow: NonZero<usize>) -> Self {
        self.config.slow = slow;
        self
    }

    #[inline]
    #[must_use]
    pub fn signal(mut self, signal: NonZero<usize>) -> Self {
        self.config.signal = signal;
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> MacdConfig {
        self.config
    }
}

/// One MACD output: the MACD line plus, once enough line values exist,
/// the signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdValue {
    macd: Price,
    signal: Option<Price>,
    histogram: Option<Price>,
}

impl MacdValue {
    /// MACD line: `EMA(fast) − EMA(slow)`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> Price {
        self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> Option<Price> {
        self.signal
    }

    /// `macd − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Option<Price> {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MACD(m: {}", self.macd)?;
        if let (Some(signal), Some(histogram)) = (self.signal, self.histogram) {
            write!(f, ", s: {signal}, h: {histogram}")?;
        }
        write!(f, ")")
    }
}

/// Moving Average Convergence/Divergence (MACD).
///
/// ```text
/// macd      = EMA(fast) − EMA(slow)
/// signal    = EMA(signal) of the macd line
/// histogram = macd − signal
/// ```
///
/// The MACD line starts once both EMAs are seeded. The signal EMA is fed
/// only defined MACD values, so it is seeded `signal − 1` prices after the
/// first MACD value.
///
/// # Example
///
/// ```
/// use chartline_ta::{Macd, MacdConfig};
/// use std::num::NonZero;
///
/// let config = MacdConfig::builder()
///     .fast(NonZero::new(2).unwrap())
///     .slow(NonZero::new(3).unwrap())
///     .signal(NonZero::new(2).unwrap())
///     .build();
/// let mut macd = Macd::new(config);
///
/// assert!(macd.compute(1.0).is_none());
/// assert!(macd.compute(2.0).is_none());
///
/// // First MACD line value, signal still seeding
/// let value = macd.compute(3.0).unwrap();
/// assert_eq!(value.signal(), None);
///
/// // Signal and histogram available
/// let value = macd.compute(4.0).unwrap();
/// assert!(value.histogram().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ema,
    slow: Ema,
    signal: Ema,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            fast: Ema::new(EmaConfig::new(config.fast)),
            slow: Ema::new(EmaConfig::new(config.slow)),
            signal: Ema::new(EmaConfig::new(config.signal)),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, price: Price) -> Option<Self::Output> {
        let fast = self.fast.compute(price);
        let slow = self.slow.compute(price);

        self.current = match (fast, slow) {
            (Some(fast), Some(slow)) => {
                let macd = fast - slow;
                let signal = self.signal.compute(macd);

                Some(MacdValue {
                    macd,
                    signal,
                    histogram: signal.map(|signal| macd - signal),
                })
            }
            _ => None,
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal
        )
    }
}

/// MACD output as three index-aligned series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MacdSeries {
    pub macd: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

impl MacdSeries {
    /// Length shared by all three series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

impl FromIterator<Option<MacdValue>> for MacdSeries {
    fn from_iter<I: IntoIterator<Item = Option<MacdValue>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut out = Self {
            macd: Vec::with_capacity(lower),
            signal: Vec::with_capacity(lower),
            histogram: Vec::with_capacity(lower),
        };

        for value in iter {
            out.macd.push(value.map(|v| v.macd));
            out.signal.push(value.and_then(|v| v.signal));
            out.histogram.push(value.and_then(|v| v.histogram));
        }

        out
    }
}

/// MACD of `prices` with the given EMA lengths.
///
/// # Errors
///
/// [`IndicatorError::InvalidPeriod`] naming `fast`, `slow` or `signal` if
/// that period is zero.
///
/// # Example
///
/// ```
/// let prices: Vec<f64> = (1..=40).map(f64::from).collect();
/// let result = chartline_ta::macd(&prices, 12, 26, 9).unwrap();
///
/// assert_eq!(result.len(), prices.len());
/// assert!(result.macd[24].is_none());
/// assert!(result.macd[25].is_some());
/// assert!(result.signal[32].is_none());
/// assert!(result.signal[33].is_some());
/// ```
pub fn macd(
    prices: &[Price],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdSeries, IndicatorError> {
    let config = MacdConfig::try_new(fast, slow, signal)?;
    tracing::trace!(%config, len = prices.len(), "computing MACD");
    Ok(Macd::series(config, prices).into_iter().collect())
}

/// MACD(12, 26, 9) of `prices`.
#[must_use]
pub fn macd_default(prices: &[Price]) -> MacdSeries {
    Macd::series(MacdConfig::default(), prices)
        .into_iter()
        .collect()
}
