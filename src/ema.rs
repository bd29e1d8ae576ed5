use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorError, IndicatorSeries, Price, Sma, SmaConfig, series,
};

/// Configuration for the Exponential Moving Average ([`Ema`])
/// indicator.
///
/// # Example
///
/// ```
/// use chartline_ta::EmaConfig;
/// use std::num::NonZero;
///
/// let config = EmaConfig::new(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: NonZero<usize>,
}

impl EmaConfig {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self { length }
    }

    /// Window length (number of prices).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length.get()
    }

    /// Smoothing factor `α = 2 / (length + 1)`.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let length = self.length.get() as f64;
        2.0 / (length + 1.0)
    }
}

impl IndicatorConfig for EmaConfig {
    #[inline]
    fn required_prices(&self) -> usize {
        self.length.get()
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({})", self.length)
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor
/// `α = 2 / (length + 1)`. Each value is computed as:
///
/// ```text
/// EMA = α × price + (1 − α) × prev_EMA
/// ```
///
/// The first `length` prices are collected to compute an SMA
/// seed value, which is also the first output. After seeding, the
/// SMA state is dropped and the EMA runs with O(1) constant memory
/// per price via a single fused multiply-add,
/// `α × (price − prev) + prev`, so a constant series never drifts
/// away from its constant.
///
/// # Example
///
/// ```
/// use chartline_ta::{Ema, EmaConfig};
/// use std::num::NonZero;
///
/// let mut ema = Ema::new(EmaConfig::new(NonZero::new(3).unwrap()));
///
/// // Seeding phase: collecting SMA
/// assert_eq!(ema.compute(2.0), None);
/// assert_eq!(ema.compute(4.0), None);
///
/// // SMA seed = (2 + 4 + 6) / 3 = 4.0
/// assert_eq!(ema.compute(6.0), Some(4.0));
///
/// // EMA(3) α = 0.5: 8 × 0.5 + 4 × 0.5 = 6.0
/// assert_eq!(ema.compute(8.0), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    sma: Option<Sma>,
    alpha: f64,
    current: Option<Price>,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            sma: Some(Sma::new(SmaConfig::new(config.length))),
            alpha: config.alpha(),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, price: Price) -> Option<Price> {
        if let Some(sma) = &mut self.sma {
            self.current = sma.compute(price);
            if self.current.is_some() {
                self.sma = None;
            }
        } else if let Some(previous) = self.current {
            self.current = Some(self.alpha.mul_add(price - previous, previous));
        }

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.config.length)
    }
}

/// Exponential moving average of `prices` over `period`, seeded with the
/// SMA of the first `period` prices.
///
/// The first `period - 1` entries are `None`; entry `period - 1` is the
/// seed.
///
/// # Errors
///
/// [`IndicatorError::InvalidPeriod`] if `period` is zero.
///
/// # Example
///
/// ```
/// let ema = chartline_ta::ema(&[2.0, 4.0, 6.0, 8.0], 3).unwrap();
/// assert_eq!(ema, vec![None, None, Some(4.0), Some(6.0)]);
/// ```
pub fn ema(prices: &[Price], period: usize) -> Result<IndicatorSeries, IndicatorError> {
    let config = EmaConfig::new(series::period("period", period)?);
    tracing::trace!(%config, len = prices.len(), "computing EMA");
    Ok(Ema::series(config, prices))
}
