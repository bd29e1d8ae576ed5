mod fixtures;

use chartline_ta::{Ema, EmaConfig, closes, ema};
use std::num::NonZero;

use crate::fixtures::{assert_series_matches, load_ref_values, load_reference_ohlcvs};

const REF_PATH: &str = "tests/fixtures/data/ema-20-close.csv";

/// Tolerance: 1e-6.
/// EMA is seeded with the SMA of the first 20 closes, same as the reference.
const TOLERANCE: f64 = 1e-6;

#[test]
fn ema_20_close_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_ref_values(REF_PATH);

    let series = ema(&closes(&bars), 20).unwrap();

    assert_series_matches("EMA(20)", &bars, &series, &reference, TOLERANCE);
}

#[test]
fn ema_20_streaming_matches_batch() {
    let bars = load_reference_ohlcvs();
    let batch = ema(&closes(&bars), 20).unwrap();

    let mut streaming = Ema::new(EmaConfig::new(NonZero::new(20).unwrap()));
    for (i, bar) in bars.iter().enumerate() {
        assert_eq!(streaming.compute(bar.close), batch[i], "bar {i}");
    }
}

#[test]
fn ema_seed_equals_sma() {
    let bars = load_reference_ohlcvs();
    let prices = closes(&bars);

    let ema = ema(&prices, 20).unwrap();
    let sma = chartline_ta::sma(&prices, 20).unwrap();
    assert_eq!(ema[19], sma[19]);
}
