mod fixtures;

use chartline_ta::{Macd, MacdConfig, closes, macd, macd_default};

use crate::fixtures::{assert_near, load_macd_ref, load_reference_ohlcvs, walk_reference};

const REF_PATH: &str = "tests/fixtures/data/macd-12-26-9-close.csv";

/// Tolerance: 1e-6.
/// Both EMAs and the signal EMA are SMA-seeded; the signal only sees
/// defined MACD values.
const TOLERANCE: f64 = 1e-6;

#[test]
fn macd_12_26_9_close_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_macd_ref(REF_PATH);

    let result = macd(&closes(&bars), 12, 26, 9).unwrap();
    let times: Vec<u64> = reference.iter().map(|r| r.open_time).collect();

    walk_reference("MACD line", &bars, &result.macd, &times, |value, idx, ctx| {
        assert_near(value, reference[idx].macd, TOLERANCE, ctx);
    });

    let offset = bars.len() - reference.len();
    for (idx, r) in reference.iter().enumerate() {
        let i = offset + idx;
        match (result.signal[i], r.signal) {
            (Some(actual), Some(expected)) => {
                assert_near(actual, expected, TOLERANCE, &format!("signal at bar {i}"));
            }
            (None, None) => {}
            (actual, expected) => {
                panic!("signal mismatch at bar {i}: got {actual:?}, expected {expected:?}")
            }
        }
        match (result.histogram[i], r.histogram) {
            (Some(actual), Some(expected)) => {
                assert_near(actual, expected, TOLERANCE, &format!("histogram at bar {i}"));
            }
            (None, None) => {}
            (actual, expected) => {
                panic!("histogram mismatch at bar {i}: got {actual:?}, expected {expected:?}")
            }
        }
    }
}

#[test]
fn macd_signal_starts_after_nine_line_values() {
    let bars = load_reference_ohlcvs();
    let result = macd_default(&closes(&bars));

    assert!(result.macd[24].is_none());
    assert!(result.macd[25].is_some());
    assert!(result.signal[32].is_none());
    assert!(result.signal[33].is_some());
}

#[test]
#[allow(clippy::float_cmp)]
fn macd_histogram_is_exact_difference() {
    let bars = load_reference_ohlcvs();
    let result = macd_default(&closes(&bars));

    for i in 0..result.len() {
        if let (Some(m), Some(s), Some(h)) = (result.macd[i], result.signal[i], result.histogram[i])
        {
            assert_eq!(h, m - s, "bar {i}");
        }
    }
}

#[test]
fn macd_streaming_matches_batch() {
    let bars = load_reference_ohlcvs();
    let batch = macd_default(&closes(&bars));

    let mut streaming = Macd::new(MacdConfig::default());
    for (i, bar) in bars.iter().enumerate() {
        let value = streaming.compute(bar.close);
        assert_eq!(value.map(|v| v.macd()), batch.macd[i], "bar {i}");
        assert_eq!(value.and_then(|v| v.signal()), batch.signal[i], "bar {i}");
    }
}
