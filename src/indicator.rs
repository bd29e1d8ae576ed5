use crate::Price;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters.
/// Configs are value types: cheap to copy, compare, and hash. Window lengths
/// are validated when the config is built, so an indicator constructed from a
/// config never has to check them again.
pub trait IndicatorConfig: Sized + Copy + PartialEq + Eq + Hash + Display + Debug {
    /// Number of prices the indicator consumes before its first output.
    fn required_prices(&self) -> usize;
}

/// A technical indicator fed one price at a time.
///
/// The batch functions ([`sma`](crate::sma), [`rsi`](crate::rsi), ...) create
/// a fresh indicator per call and feed it the whole series, so no state ever
/// survives between two batch calls. Output is `None` until enough prices have
/// been seen.
///
/// # Example
///
/// ```
/// use chartline_ta::{Indicator, Sma, SmaConfig};
/// use std::num::NonZero;
///
/// let mut sma = Sma::new(SmaConfig::new(NonZero::new(3).unwrap()));
///
/// assert_eq!(sma.compute(10.0), None);
/// assert_eq!(sma.compute(20.0), None);
/// assert_eq!(sma.compute(30.0), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for simple indicators,
    /// a struct for composite ones (e.g. Bollinger Bands).
    type Output: Copy + Send + Sync + Display + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next price and returns the updated value,
    /// or `None` if there is not enough history yet.
    fn compute(&mut self, price: Price) -> Option<Self::Output>;

    /// Returns the last computed value without advancing state.
    fn value(&self) -> Option<Self::Output>;

    /// Runs a fresh indicator over `prices`, returning one output per input
    /// price (index-aligned).
    fn series(config: Self::Config, prices: &[Price]) -> Vec<Option<Self::Output>> {
        let mut indicator = Self::new(config);
        prices.iter().map(|&price| indicator.compute(price)).collect()
    }
}
