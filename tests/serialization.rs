//! JSON shapes handed to the charting front end.

use chartline_ta::{
    Candle, ChartSettings, FibLevel, Signal, SignalSource, TechnicalSignal, build_chart, sma,
    technical_signals,
};
use serde_json::{Value, json};

fn candles(len: u32) -> Vec<Candle> {
    (1..=len)
        .map(|i| {
            let close = f64::from(i);
            Candle::new(u64::from(i) * 1_000, close, close + 0.5, close - 0.5, close)
        })
        .collect()
}

#[test]
fn candle_is_x_and_ohlc_array() {
    let candle = Candle::new(1_700_000_000_000, 10.0, 12.0, 9.5, 11.0);

    let value = serde_json::to_value(candle).unwrap();

    assert_eq!(
        value,
        json!({ "x": 1_700_000_000_000u64, "y": [10.0, 12.0, 9.5, 11.0] })
    );
}

#[test]
fn candle_round_trips() {
    let parsed: Candle = serde_json::from_str(r#"{"x": 5, "y": [1.0, 2.0, 0.5, 1.5]}"#).unwrap();
    assert_eq!(parsed, Candle::new(5, 1.0, 2.0, 0.5, 1.5));
}

#[test]
fn undefined_values_are_null() {
    let series = sma(&[1.0, 2.0, 3.0], 2).unwrap();

    let text = serde_json::to_string(&series).unwrap();

    assert_eq!(text, "[null,1.5,2.5]");
}

#[test]
fn chart_series_carry_name_type_and_points() {
    let layout = build_chart(&candles(25), &ChartSettings::default()).unwrap();

    let value = serde_json::to_value(&layout).unwrap();
    let price = value["price"].as_array().unwrap();

    assert_eq!(price[0]["name"], "Price");
    assert_eq!(price[0]["type"], "candlestick");
    assert_eq!(price[0]["data"][0], json!({ "x": 1_000, "y": [1.0, 1.5, 0.5, 1.0] }));

    assert_eq!(price[1]["name"], "SMA(20)");
    assert_eq!(price[1]["type"], "line");
    assert_eq!(price[1]["data"][0], json!({ "x": 1_000, "y": null }));
    assert_eq!(price[1]["data"][19]["y"], json!(10.5));

    assert_eq!(value["macd"], Value::Null);
}

#[test]
fn signals_serialize_lowercase() {
    let signal = TechnicalSignal {
        source: SignalSource::Rsi,
        signal: Signal::Sell,
        value: 75.0,
        threshold: 70.0,
    };

    assert_eq!(
        serde_json::to_value(signal).unwrap(),
        json!({ "source": "RSI", "signal": "sell", "value": 75.0, "threshold": 70.0 })
    );
}

#[test]
fn signals_from_price_history() {
    let prices: Vec<f64> = (1..=30).map(f64::from).collect();

    let signals = technical_signals(&prices, 10.0);
    let value = serde_json::to_value(&signals).unwrap();

    assert_eq!(value[0]["signal"], "sell");
    assert_eq!(value[1]["source"], "SMA");
    assert_eq!(value[1]["signal"], "sell");
}

#[test]
fn fib_levels_round_trip() {
    let level = FibLevel {
        label: "61.8%".to_owned(),
        ratio: 0.618,
        price: 138.2,
    };

    let text = serde_json::to_string(&level).unwrap();
    let parsed: FibLevel = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, level);
}
