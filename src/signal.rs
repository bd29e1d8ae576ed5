//! Buy/sell hints derived from the latest indicator values.

use std::{fmt::Display, num::NonZero};

use serde::Serialize;

use crate::{Price, Rsi, RsiConfig, Sma, SmaConfig};

/// RSI above this level reads as overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// RSI below this level reads as oversold.
pub const RSI_OVERSOLD: f64 = 30.0;

/// SMA length used for the price-versus-average signal.
pub const SIGNAL_SMA_PERIOD: usize = 20;

const SIGNAL_SMA_LENGTH: NonZero<usize> = NonZero::new(SIGNAL_SMA_PERIOD).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Indicator a [`TechnicalSignal`] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalSource {
    Rsi,
    Sma,
}

/// A signal together with the indicator value and the threshold it was
/// compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TechnicalSignal {
    pub source: SignalSource,
    pub signal: Signal,
    pub value: f64,
    pub threshold: f64,
}

/// Reads the last defined RSI value: above 70 sells, below 30 buys.
///
/// The reported threshold is always the overbought level, matching how the
/// dashboard displays it.
#[must_use]
pub fn rsi_signal(rsi: &[Option<Price>]) -> Option<TechnicalSignal> {
    let value = last_defined(rsi)?;

    let signal = if value > RSI_OVERBOUGHT {
        Signal::Sell
    } else if value < RSI_OVERSOLD {
        Signal::Buy
    } else {
        Signal::Neutral
    };

    Some(TechnicalSignal {
        source: SignalSource::Rsi,
        signal,
        value,
        threshold: RSI_OVERBOUGHT,
    })
}

/// Compares the live price with the last defined SMA value: above the
/// average buys, otherwise sells.
///
/// A live price that is zero, negative or not finite means no quote is
/// available, so no signal is produced.
#[must_use]
pub fn sma_signal(sma: &[Option<Price>], live_price: Price) -> Option<TechnicalSignal> {
    if !(live_price.is_finite() && live_price > 0.0) {
        return None;
    }
    let value = last_defined(sma)?;

    Some(TechnicalSignal {
        source: SignalSource::Sma,
        signal: if live_price > value {
            Signal::Buy
        } else {
            Signal::Sell
        },
        value,
        threshold: live_price,
    })
}

/// RSI(14) and SMA(20) signals for a price history.
///
/// Signals whose indicator has no value yet are left out, so a short
/// history yields an empty list. The SMA signal is also skipped when
/// `live_price` is not a usable quote (see [`sma_signal`]).
///
/// # Example
///
/// ```
/// use chartline_ta::{Signal, technical_signals};
///
/// let prices: Vec<f64> = (1..=30).map(f64::from).collect();
/// let signals = technical_signals(&prices, 31.0);
///
/// assert_eq!(signals.len(), 2);
/// assert!(signals.iter().any(|s| s.signal == Signal::Sell)); // RSI 100
/// assert!(signals.iter().any(|s| s.signal == Signal::Buy)); // above SMA
/// ```
#[must_use]
pub fn technical_signals(prices: &[Price], live_price: Price) -> Vec<TechnicalSignal> {
    let rsi = Rsi::series(RsiConfig::default(), prices);
    let sma = Sma::series(SmaConfig::new(SIGNAL_SMA_LENGTH), prices);

    rsi_signal(&rsi)
        .into_iter()
        .chain(sma_signal(&sma, live_price))
        .collect()
}

fn last_defined(series: &[Option<Price>]) -> Option<Price> {
    series.last().copied().flatten()
}
