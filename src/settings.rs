//! Which indicators a chart shows, and with which parameters.
//!
//! Settings deserialize from TOML with every field optional:
//!
//! ```toml
//! show_macd = true
//! sma_period = 50
//!
//! [bollinger]
//! period = 20
//! std_dev = 2.5
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    BbConfig, DEFAULT_RSI_PERIOD, EmaConfig, IndicatorError, MacdConfig, RsiConfig, SmaConfig,
    StdDev, series,
};

/// Errors from loading or validating [`ChartSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings")]
    Invalid(#[from] IndicatorError),
}

/// MACD periods as written in a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdSettings {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdSettings {
    fn default() -> Self {
        let config = MacdConfig::default();
        Self {
            fast: config.fast(),
            slow: config.slow(),
            signal: config.signal(),
        }
    }
}

/// Bollinger Bands parameters as written in a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerSettings {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerSettings {
    fn default() -> Self {
        let config = BbConfig::default_20();
        Self {
            period: config.length(),
            std_dev: config.std_dev().value(),
        }
    }
}

/// Chart overlay toggles and indicator periods.
///
/// Defaults show SMA(20), EMA(20) and RSI(14); MACD, Bollinger Bands and
/// Fibonacci levels are off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ChartSettings {
    pub show_sma: bool,
    pub show_ema: bool,
    pub show_rsi: bool,
    pub show_macd: bool,
    pub show_bb: bool,
    pub show_fib: bool,
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub macd: MacdSettings,
    pub bollinger: BollingerSettings,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            show_sma: true,
            show_ema: true,
            show_rsi: true,
            show_macd: false,
            show_bb: false,
            show_fib: false,
            sma_period: 20,
            ema_period: 20,
            rsi_period: DEFAULT_RSI_PERIOD,
            macd: MacdSettings::default(),
            bollinger: BollingerSettings::default(),
        }
    }
}

/// Validated indicator configs for a chart, one per indicator kind.
///
/// Built by [`ChartSettings::validate`]; holding one means every period and
/// multiplier has already been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartConfigs {
    pub sma: SmaConfig,
    pub ema: EmaConfig,
    pub rsi: RsiConfig,
    pub macd: MacdConfig,
    pub bollinger: BbConfig,
}

impl ChartSettings {
    /// Parses settings from a TOML document. Missing fields take their
    /// defaults. The result is validated.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Parse`] on malformed TOML or wrongly typed fields
    /// (including negative periods), [`SettingsError::Invalid`] when a
    /// period is zero or the band multiplier is not positive.
    pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), "loaded chart settings");
        Ok(settings)
    }

    /// Checks every period and the band multiplier, returning the
    /// corresponding indicator configs.
    ///
    /// Periods of indicators that are switched off are still checked, so a
    /// bad value surfaces before the overlay is enabled.
    ///
    /// # Errors
    ///
    /// The first [`IndicatorError`] found.
    pub fn validate(&self) -> Result<ChartConfigs, IndicatorError> {
        self.configs().inspect_err(|err| {
            tracing::warn!(error = %err, "rejecting chart settings");
        })
    }

    fn configs(&self) -> Result<ChartConfigs, IndicatorError> {
        Ok(ChartConfigs {
            sma: SmaConfig::new(series::period("sma_period", self.sma_period)?),
            ema: EmaConfig::new(series::period("ema_period", self.ema_period)?),
            rsi: RsiConfig::new(series::period("rsi_period", self.rsi_period)?),
            macd: MacdConfig::try_new(self.macd.fast, self.macd.slow, self.macd.signal)?,
            bollinger: BbConfig::builder()
                .length(series::period("bollinger.period", self.bollinger.period)?)
                .std_dev(StdDev::new(self.bollinger.std_dev)?)
                .build(),
        })
    }
}
