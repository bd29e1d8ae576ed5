use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use serde::Serialize;

use crate::{
    Indicator, IndicatorConfig, IndicatorError, IndicatorSeries, Price,
    price_window::PriceWindow,
    series,
};

const DEFAULT_LENGTH: NonZero<usize> = NonZero::new(20).unwrap();

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps a finite, positive `f64`. Defaults to `2.0` (the standard
/// Bollinger Bands setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a new standard deviation multiplier.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidMultiplier`] if `value` is zero, negative,
    /// NaN or infinite.
    pub fn new(value: f64) -> Result<Self, IndicatorError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(IndicatorError::InvalidMultiplier {
                name: "std_dev",
                value,
            })
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for StdDev {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StdDev {}

impl Hash for StdDev {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(2.0)
    }
}

/// Configuration for the Bollinger Bands ([`Bb`]) indicator.
///
/// # Example
///
/// ```
/// use chartline_ta::{BbConfig, StdDev};
/// use std::num::NonZero;
///
/// let config = BbConfig::builder()
///     .length(NonZero::new(10).unwrap())
///     .std_dev(StdDev::new(2.5).unwrap())
///     .build();
///
/// assert_eq!(config.length(), 10);
/// assert_eq!(config.std_dev().value(), 2.5);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BbConfig {
    length: NonZero<usize>,
    std_dev: StdDev,
}

impl BbConfig {
    /// Returns a new builder starting from BB(20, 2σ).
    #[must_use]
    pub fn builder() -> BbConfigBuilder {
        BbConfigBuilder {
            config: Self::default_20(),
        }
    }

    /// BB(20, 2σ), the standard Bollinger Bands setting.
    #[must_use]
    pub fn default_20() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            std_dev: StdDev::default(),
        }
    }

    /// BB with custom length, 2σ.
    #[must_use]
    pub fn close(length: NonZero<usize>) -> Self {
        Self::builder().length(length).build()
    }

    /// Window length (number of prices).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }

    /// Standard deviation multiplier for the upper and lower bands.
    #[inline]
    #[must_use]
    pub fn std_dev(&self) -> StdDev {
        self.std_dev
    }
}

impl IndicatorConfig for BbConfig {
    #[inline]
    fn required_prices(&self) -> usize {
        self.length.get()
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BbConfig({}, {})", self.length, self.std_dev.value())
    }
}

/// Builder for [`BbConfig`].
///
/// Defaults: length = 20, `std_dev` = `2.0`.
pub struct BbConfigBuilder {
    config: BbConfig,
}

impl BbConfigBuilder {
    #[inline]
    #[must_use]
    pub fn length(mut self, length: NonZero<usize>) -> Self {
        self.config.length = length;
        self
    }

    #[inline]
    #[must_use]
    pub fn std_dev(mut self, std_dev: StdDev) -> Self {
        self.config.std_dev = std_dev;
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> BbConfig {
        self.config
    }
}

/// Bollinger Bands output: upper, middle, and lower bands.
///
/// The middle band is the SMA. Upper and lower bands are offset by
/// `std_dev × σ`, where `σ` is the population standard deviation of the window.
///
/// ```text
/// upper  = SMA + k × σ
/// middle = SMA
/// lower  = SMA − k × σ
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BbValue {
    upper: Price,
    middle: Price,
    lower: Price,
    sigma: f64,
}

impl BbValue {
    /// Upper band: `SMA + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> Price {
        self.upper
    }

    /// Middle band: SMA of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> Price {
        self.middle
    }

    /// Lower band: `SMA − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> Price {
        self.lower
    }

    /// Population standard deviation `σ` of the window (before the
    /// multiplier is applied).
    #[inline]
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Band width: `upper − lower`.
    ///
    /// Useful for measuring volatility. Narrow width indicates
    /// consolidation (Bollinger squeeze); wide width indicates
    /// high volatility.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Display for BbValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB(u: {}, m: {}, l: {})",
            self.upper, self.middle, self.lower
        )
    }
}

/// Bollinger Bands (BB).
///
/// A volatility indicator consisting of three bands: a simple moving average
/// (middle) with upper and lower bands offset by a configurable number of
/// standard deviations.
///
/// The middle band goes through the same running-sum window as
/// [`Sma`](crate::Sma), so both agree bit for bit. σ is taken in two passes
/// over the window, which keeps it accurate when prices drift far from the
/// first price seen. A zero-variance window collapses all three
/// bands onto the middle.
///
/// # Example
///
/// ```
/// use chartline_ta::{Bb, BbConfig};
/// use std::num::NonZero;
///
/// let mut bb = Bb::new(BbConfig::close(NonZero::new(2).unwrap()));
///
/// assert!(bb.compute(3.0).is_none());
///
/// // window [3, 5]: mean 4, σ 1
/// let value = bb.compute(5.0).unwrap();
/// assert_eq!(value.upper(), 6.0);
/// assert_eq!(value.middle(), 4.0);
/// assert_eq!(value.lower(), 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    config: BbConfig,
    std_dev_multiplier: f64,
    window: PriceWindow,
    current: Option<BbValue>,
}

impl Indicator for Bb {
    type Config = BbConfig;
    type Output = BbValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            std_dev_multiplier: config.std_dev.0,
            window: PriceWindow::new(config.length.get()),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, price: Price) -> Option<Self::Output> {
        self.window.add(price);

        self.current = match (self.window.mean(), self.window.variance()) {
            (Some(mean), Some(variance)) => {
                let sigma = variance.sqrt();
                let offset = sigma * self.std_dev_multiplier;

                Some(Self::Output {
                    upper: mean + offset,
                    middle: mean,
                    lower: mean - offset,
                    sigma,
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

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BB({}, {})", self.config.length, self.std_dev_multiplier)
    }
}

/// Bollinger Bands output as three index-aligned series.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BbSeries {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

impl BbSeries {
    /// Length shared by all three series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

impl FromIterator<Option<BbValue>> for BbSeries {
    fn from_iter<I: IntoIterator<Item = Option<BbValue>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut out = Self {
            upper: Vec::with_capacity(lower),
            middle: Vec::with_capacity(lower),
            lower: Vec::with_capacity(lower),
        };

        for value in iter {
            out.upper.push(value.map(|v| v.upper));
            out.middle.push(value.map(|v| v.middle));
            out.lower.push(value.map(|v| v.lower));
        }

        out
    }
}

/// Bollinger Bands of `prices`: SMA(`period`) ± `k` population standard
/// deviations.
///
/// # Errors
///
/// - [`IndicatorError::InvalidPeriod`] if `period` is zero.
/// - [`IndicatorError::InvalidMultiplier`] if `k` is not finite and positive.
///
/// # Example
///
/// ```
/// let bands = chartline_ta::bollinger_bands(&[10.0; 5], 3, 2.0).unwrap();
/// assert_eq!(bands.upper, vec![None, None, Some(10.0), Some(10.0), Some(10.0)]);
/// assert_eq!(bands.lower, bands.upper);
/// ```
pub fn bollinger_bands(
    prices: &[Price],
    period: usize,
    k: f64,
) -> Result<BbSeries, IndicatorError> {
    let config = BbConfig::builder()
        .length(series::period("period", period)?)
        .std_dev(StdDev::new(k)?)
        .build();
    tracing::trace!(%config, len = prices.len(), "computing Bollinger Bands");
    Ok(Bb::series(config, prices).into_iter().collect())
}
