//! Chart-ready series assembled from a candle window.
//!
//! [`build_chart`] recomputes every enabled indicator over the whole window
//! and lays the results out the way the trading dashboard draws them: one
//! price pane with overlays, plus optional RSI and MACD panes underneath.

use serde::Serialize;

use crate::{
    Bb, BbSeries, Candle, ChartSettings, Ema, FibLevel, IndicatorConfig, IndicatorError,
    IndicatorSeries, Macd, MacdSeries, Ohlcv, Price, Rsi, Sma, Timestamp, closes,
    fibonacci_levels,
};

/// One `(x, y)` sample of a line or bar series. `y` is `null` while the
/// indicator is still warming up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: Timestamp,
    pub y: Option<Price>,
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Candlestick,
    Line,
    Bar,
}

/// Samples of a [`ChartSeries`]: raw candles for the price series,
/// timestamped points for everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Candles(Vec<Candle>),
    Points(Vec<SeriesPoint>),
}

impl SeriesData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Candles(candles) => candles.len(),
            Self::Points(points) => points.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named series as handed to the charting widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub data: SeriesData,
}

impl ChartSeries {
    fn line(name: impl Into<String>, data: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Line,
            data: SeriesData::Points(data),
        }
    }

    fn bar(name: impl Into<String>, data: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            kind: SeriesKind::Bar,
            data: SeriesData::Points(data),
        }
    }
}

/// Every pane of a chart.
///
/// `rsi` and `macd` are `None` when the pane is switched off or the window
/// is too short for the indicator to produce a single value. `fibonacci`
/// is empty unless enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub price: Vec<ChartSeries>,
    pub rsi: Option<Vec<ChartSeries>>,
    pub macd: Option<Vec<ChartSeries>>,
    pub fibonacci: Vec<FibLevel>,
}

impl ChartLayout {
    /// Looks up a series by name in any pane.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&ChartSeries> {
        self.price
            .iter()
            .chain(self.rsi.iter().flatten())
            .chain(self.macd.iter().flatten())
            .find(|series| series.name == name)
    }
}

/// Pairs candle timestamps with indicator values.
///
/// Both inputs are normally the same length; if not, the result stops at
/// the shorter one.
///
/// ```
/// use chartline_ta::{Candle, SeriesPoint, points};
///
/// let candles = [
///     Candle::new(1_000, 1.0, 1.0, 1.0, 1.0),
///     Candle::new(2_000, 2.0, 2.0, 2.0, 2.0),
/// ];
/// let pts = points(&candles, &[None, Some(1.5)]);
///
/// assert_eq!(pts[0], SeriesPoint { x: 1_000, y: None });
/// assert_eq!(pts[1], SeriesPoint { x: 2_000, y: Some(1.5) });
/// ```
#[must_use]
pub fn points<C: Ohlcv>(candles: &[C], values: &[Option<Price>]) -> Vec<SeriesPoint> {
    candles
        .iter()
        .zip(values)
        .map(|(candle, &y)| SeriesPoint {
            x: candle.open_time(),
            y,
        })
        .collect()
}

/// Builds the chart panes for `candles` according to `settings`.
///
/// Each overlay is recomputed from the full window. An overlay or pane
/// whose indicator needs more candles than the window holds is left out
/// instead of being drawn as an all-`null` line.
///
/// # Errors
///
/// The first [`IndicatorError`] from validating `settings`, even for
/// overlays that are switched off.
///
/// # Example
///
/// ```
/// use chartline_ta::{Candle, ChartSettings, build_chart};
///
/// let candles: Vec<Candle> = (0..30u32)
///     .map(|i| {
///         let close = 100.0 + f64::from(i);
///         Candle::new(u64::from(i) * 60_000, close, close + 1.0, close - 1.0, close)
///     })
///     .collect();
///
/// let layout = build_chart(&candles, &ChartSettings::default()).unwrap();
///
/// assert_eq!(layout.price.len(), 3); // candles, SMA(20), EMA(20)
/// assert!(layout.rsi.is_some());
/// assert!(layout.macd.is_none()); // off by default
/// ```
pub fn build_chart<C: Ohlcv>(
    candles: &[C],
    settings: &ChartSettings,
) -> Result<ChartLayout, IndicatorError> {
    let configs = settings.validate()?;
    let prices = closes(candles);
    let fits = |required: usize| candles.len() >= required;

    let mut price = vec![ChartSeries {
        name: "Price".to_owned(),
        kind: SeriesKind::Candlestick,
        data: SeriesData::Candles(candles.iter().map(to_candle).collect()),
    }];

    if settings.show_sma && fits(configs.sma.required_prices()) {
        let values = Sma::series(configs.sma, &prices);
        price.push(ChartSeries::line(
            format!("SMA({})", configs.sma.length()),
            points(candles, &values),
        ));
    }

    if settings.show_ema && fits(configs.ema.required_prices()) {
        let values = Ema::series(configs.ema, &prices);
        price.push(ChartSeries::line(
            format!("EMA({})", configs.ema.length()),
            points(candles, &values),
        ));
    }

    if settings.show_bb && fits(configs.bollinger.required_prices()) {
        let bands: BbSeries = Bb::series(configs.bollinger, &prices).into_iter().collect();
        price.extend([
            ChartSeries::line("BB Upper", points(candles, &bands.upper)),
            ChartSeries::line("BB Middle", points(candles, &bands.middle)),
            ChartSeries::line("BB Lower", points(candles, &bands.lower)),
        ]);
    }

    let rsi = (settings.show_rsi && fits(configs.rsi.required_prices())).then(|| {
        let values: IndicatorSeries = Rsi::series(configs.rsi, &prices);
        vec![ChartSeries::line("RSI", points(candles, &values))]
    });

    let macd = (settings.show_macd && fits(configs.macd.required_prices())).then(|| {
        let lines: MacdSeries = Macd::series(configs.macd, &prices).into_iter().collect();
        vec![
            ChartSeries::line("MACD", points(candles, &lines.macd)),
            ChartSeries::line("Signal", points(candles, &lines.signal)),
            ChartSeries::bar("Histogram", points(candles, &lines.histogram)),
        ]
    });

    let fibonacci = if settings.show_fib {
        fibonacci_levels(candles)
    } else {
        Vec::new()
    };

    tracing::debug!(
        candles = candles.len(),
        overlays = price.len() - 1,
        rsi = rsi.is_some(),
        macd = macd.is_some(),
        fib_levels = fibonacci.len(),
        "built chart layout"
    );

    Ok(ChartLayout {
        price,
        rsi,
        macd,
        fibonacci,
    })
}

fn to_candle<C: Ohlcv>(bar: &C) -> Candle {
    Candle::new(bar.open_time(), bar.open(), bar.high(), bar.low(), bar.close())
}
