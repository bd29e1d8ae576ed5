#![allow(dead_code)]

use chartline_ta::{Ohlcv, Price, Timestamp};
use serde::{Deserialize, de::DeserializeOwned};

/// Hourly OHLCV bar parsed from the fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub open_time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn open_time(&self) -> Timestamp {
        self.open_time
    }
}

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub open_time: u64,
    pub expected: f64,
}

/// Reference BB value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefBbValue {
    pub open_time: u64,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Reference MACD value. Signal and histogram are empty until the signal
/// EMA has seeded.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub open_time: u64,
    pub macd: f64,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

const OHLCV_PATH: &str = "tests/fixtures/data/ohlcv-1h.csv";

/// Load the reference OHLCV bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load single-value reference data (SMA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load BB reference data (upper, middle, lower).
pub fn load_bb_ref(path: &str) -> Vec<RefBbValue> {
    load_records(path, "invalid BB reference record")
}

/// Load MACD reference data (macd, signal, histogram).
pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Walks a computed series alongside the bars it was computed from.
///
/// Reference files list every defined value and nothing else, so a bar
/// whose `open_time` has no reference row must map to `None`. Calls
/// `check` with the computed value and the reference index for every bar
/// that does have one.
pub fn walk_reference<T: Copy + std::fmt::Debug>(
    name: &str,
    bars: &[RefBar],
    series: &[Option<T>],
    reference_times: &[u64],
    mut check: impl FnMut(T, usize, &str),
) {
    assert_eq!(series.len(), bars.len(), "{name}: series length");

    let mut ref_idx = 0;
    for (bar, value) in bars.iter().zip(series) {
        if ref_idx < reference_times.len() && bar.open_time == reference_times[ref_idx] {
            let value = value
                .unwrap_or_else(|| panic!("{name} returned None at t={}", bar.open_time));
            check(
                value,
                ref_idx,
                &format!("{name} at bar {ref_idx} (t={})", bar.open_time),
            );
            ref_idx += 1;
        } else {
            assert!(
                value.is_none(),
                "{name} defined before reference at t={}: {value:?}",
                bar.open_time
            );
        }
    }

    assert_eq!(
        ref_idx,
        reference_times.len(),
        "not all reference values checked: {ref_idx}/{}",
        reference_times.len()
    );
}

/// Checks a single-value series against a reference file.
pub fn assert_series_matches(
    name: &str,
    bars: &[RefBar],
    series: &[Option<f64>],
    reference: &[RefValue],
    tolerance: f64,
) {
    let times: Vec<u64> = reference.iter().map(|r| r.open_time).collect();
    walk_reference(name, bars, series, &times, |value, idx, context| {
        assert_near(value, reference[idx].expected, tolerance, context);
    });
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
