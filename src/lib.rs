//! Technical analysis indicators for trading dashboards.
//!
//! Batch functions take a price slice and return a series aligned 1:1 with
//! it, `None` where the indicator has too little history:
//!
//! ```
//! let prices = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let sma = chartline_ta::sma(&prices, 3).unwrap();
//!
//! assert_eq!(sma, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
//! ```
//!
//! Every batch call starts from a fresh indicator, so results depend only on
//! the prices passed in. The streaming indicators behind them ([`Sma`],
//! [`Ema`], [`Rsi`], [`Macd`], [`Bb`]) are public too and expose
//! [`new`](Sma::new), [`compute`](Sma::compute), and [`value`](Sma::value)
//! as inherent methods, so no trait import is needed. Import [`Indicator`]
//! only for generic code.
//!
//! [`build_chart`] assembles the dashboard panes from a candle window and a
//! [`ChartSettings`], which can be loaded from TOML.

mod bb;
mod chart;
mod ema;
mod error;
mod fib;
mod indicator;
mod macd;
mod ohlcv;
mod price_window;
mod rsi;
mod series;
mod settings;
mod signal;
mod sma;

pub use crate::error::IndicatorError;
pub use crate::indicator::{Indicator, IndicatorConfig};
pub use crate::ohlcv::{Candle, Ohlcv, Price, Timestamp};
pub use crate::series::{IndicatorSeries, closes};

pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbSeries, BbValue, StdDev, bollinger_bands};
pub use crate::ema::{Ema, EmaConfig, ema};
pub use crate::fib::{FIB_RATIOS, FibLevel, fibonacci_levels};
pub use crate::macd::{
    Macd, MacdConfig, MacdConfigBuilder, MacdSeries, MacdValue, macd, macd_default,
};
pub use crate::rsi::{DEFAULT_RSI_PERIOD, Rsi, RsiConfig, rsi};
pub use crate::sma::{Sma, SmaConfig, sma};

pub use crate::chart::{
    ChartLayout, ChartSeries, SeriesData, SeriesKind, SeriesPoint, build_chart, points,
};
pub use crate::settings::{
    BollingerSettings, ChartConfigs, ChartSettings, MacdSettings, SettingsError,
};
pub use crate::signal::{
    RSI_OVERBOUGHT, RSI_OVERSOLD, SIGNAL_SMA_PERIOD, Signal, SignalSource, TechnicalSignal,
    rsi_signal, sma_signal, technical_signals,
};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, price: Price) -> Option<$output> {
                <Self as Indicator>::compute(self, price)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }

            /// See [`Indicator::series`].
            #[must_use]
            pub fn series(config: $config, prices: &[Price]) -> Vec<Option<$output>> {
                <Self as Indicator>::series(config, prices)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Bb, BbConfig, BbValue);

#[cfg(test)]
mod test_util;
