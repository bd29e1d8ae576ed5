use std::{
    fmt::{Debug, Display},
    num::NonZero,
};

use crate::{
    Indicator, IndicatorConfig, IndicatorError, IndicatorSeries, Price,
    price_window::PriceWindow, series,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use chartline_ta::SmaConfig;
/// use std::num::NonZero;
///
/// let config = SmaConfig::new(NonZero::new(20).unwrap());
/// assert_eq!(config.length(), 20);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
}

impl SmaConfig {
    #[must_use]
    pub fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
        }
    }

    /// Window length (number of prices).
    #[inline]
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl IndicatorConfig for SmaConfig {
    #[inline]
    fn required_prices(&self) -> usize {
        self.length
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({})", self.length)
    }
}

/// Simple Moving Average (SMA).
///
/// Computes the unweighted mean of the last *n* prices, where *n* is the
/// configured window length. Returns `None` until the window is full.
///
/// Uses a running sum for O(1) updates per price.
///
/// # Example
///
/// ```rust
/// use chartline_ta::{Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::new(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(10.0), None);
/// assert_eq!(sma.compute(20.0), None);
/// assert_eq!(sma.compute(30.0), Some(20.0));
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
    window: PriceWindow,
    current: Option<Price>,
}

impl Indicator for Sma {
    type Config = SmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: PriceWindow::new(config.length),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, price: Price) -> Option<Price> {
        self.window.add(price);
        self.current = self.window.mean();
        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({})", self.config.length)
    }
}

/// Simple moving average of `prices` over `period`.
///
/// The first `period - 1` entries are `None`. A period longer than the
/// series yields an all-`None` series rather than an error.
///
/// # Errors
///
/// [`IndicatorError::InvalidPeriod`] if `period` is zero.
///
/// # Example
///
/// ```
/// let sma = chartline_ta::sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
/// ```
pub fn sma(prices: &[Price], period: usize) -> Result<IndicatorSeries, IndicatorError> {
    let config = SmaConfig::new(series::period("period", period)?);
    tracing::trace!(%config, len = prices.len(), "computing SMA");
    Ok(Sma::series(config, prices))
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, nz};

    fn sma(length: usize) -> Sma {
        Sma::new(SmaConfig::new(nz(length)))
    }

    mod filling {
        use super::*;

        #[test]
        fn none_until_window_full() {
            let mut sma = sma(3);
            assert_eq!(sma.compute(10.0), None);
            assert_eq!(sma.compute(20.0), None);
        }

        #[test]
        fn returns_average_when_full() {
            let mut sma = sma(3);
            sma.compute(10.0);
            sma.compute(20.0);
            assert_eq!(sma.compute(30.0), Some(20.0));
        }
    }

    mod sliding {
        use super::*;

        #[test]
        fn drops_oldest_on_advance() {
            let mut sma = sma(2);
            sma.compute(10.0);
            sma.compute(20.0);
            // (20 + 30) / 2 = 25
            assert_eq!(sma.compute(30.0), Some(25.0));
        }

        #[test]
        fn slides_across_many_prices() {
            let mut sma = sma(3);
            for price in [1.0, 7.0, 2.0, 9.0] {
                sma.compute(price);
            }
            // (2 + 9 + 4) / 3 = 5
            assert_eq!(sma.compute(4.0), Some(5.0));
        }

        #[test]
        fn fractional_mean() {
            let mut sma = sma(3);
            sma.compute(15.0);
            sma.compute(20.0);
            // (15 + 20 + 30) / 3 = 21.666...
            assert_approx!(sma.compute(30.0).unwrap(), 65.0 / 3.0);
        }
    }

    mod batch {
        use super::*;

        #[test]
        fn concrete_scenario() {
            let series = super::super::sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
            assert_eq!(series, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
        }

        #[test]
        fn empty_input_gives_empty_output() {
            assert_eq!(super::super::sma(&[], 5), Ok(vec![]));
        }

        #[test]
        fn period_longer_than_series_is_all_none() {
            let series = super::super::sma(&[1.0, 2.0], 5).unwrap();
            assert_eq!(series, vec![None, None]);
        }

        #[test]
        fn period_one_echoes_prices() {
            let prices = [4.0, 8.5, 1.25];
            let series = super::super::sma(&prices, 1).unwrap();
            assert_eq!(series, vec![Some(4.0), Some(8.5), Some(1.25)]);
        }

        #[test]
        fn zero_period_is_rejected() {
            assert_eq!(
                super::super::sma(&[1.0], 0),
                Err(IndicatorError::InvalidPeriod {
                    name: "period",
                    value: 0
                })
            );
        }

        #[test]
        fn does_not_mutate_input() {
            let prices = vec![3.0, 1.0, 2.0];
            let copy = prices.clone();
            let _ = super::super::sma(&prices, 2);
            assert_eq!(prices, copy);
        }
    }

    mod display {
        use super::*;

        #[test]
        fn formats_correctly() {
            assert_eq!(sma(20).to_string(), "SMA(20)");
        }

        #[test]
        fn formats_config() {
            assert_eq!(SmaConfig::new(nz(20)).to_string(), "SmaConfig(20)");
        }
    }

    mod clone {
        use super::*;

        #[test]
        fn produces_independent_state() {
            let mut sma = sma(3);
            sma.compute(10.0);
            sma.compute(20.0);

            let mut cloned = sma.clone();

            assert_eq!(sma.compute(30.0), Some(20.0));
            assert_eq!(cloned.value(), None);
            assert_eq!(cloned.compute(90.0), Some(40.0));
        }
    }

    mod config {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn required_prices_is_length() {
            assert_eq!(SmaConfig::new(nz(7)).required_prices(), 7);
        }

        #[test]
        fn eq_and_hash() {
            let a = SmaConfig::new(nz(20));
            let b = SmaConfig::new(nz(20));
            let c = SmaConfig::new(nz(10));

            let mut set = HashSet::new();
            set.insert(a);

            assert!(set.contains(&b));
            assert!(!set.contains(&c));
        }
    }

    mod value_accessor {
        use super::*;

        #[test]
        fn none_before_convergence() {
            assert_eq!(sma(3).value(), None);
        }

        #[test]
        fn matches_last_compute() {
            let mut sma = sma(2);
            sma.compute(10.0);
            let computed = sma.compute(20.0);
            assert_eq!(sma.value(), computed);
            assert_eq!(sma.value(), Some(15.0));
        }
    }
}
