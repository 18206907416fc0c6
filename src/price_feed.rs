// src/price_feed.rs - EUR/USD quote fetching
use std::env;

use serde_json::Value;

use crate::analyzer::round5;
use crate::errors::ServiceError;

const DEFAULT_QUOTE_URL: &str =
    "https://query1.finance.yahoo.com/v8/finance/chart/EURUSD=X?interval=1h&range=1d";

#[derive(Debug, Clone, Copy)]
pub struct Quote {
    pub price: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume: f64,
}

/// HTTP client for the upstream chart API. The URL is overridable through
/// `QUOTE_API_URL`, which tests and alternate data providers rely on.
#[derive(Clone)]
pub struct QuoteFetcher {
    client: reqwest::Client,
    url: String,
}

impl QuoteFetcher {
    pub fn from_env() -> Self {
        let url = env::var("QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_QUOTE_URL.to_string());
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn fetch(&self) -> Result<Quote, ServiceError> {
        let body: Value = self.client.get(&self.url).send().await?.json().await?;
        parse_chart_response(&body)
    }
}

/// Pulls price/high/low/volume out of a Yahoo-style chart payload. The meta
/// block is authoritative for the price; high/low/volume fall back to
/// scanning the per-candle arrays when the meta fields are absent.
fn parse_chart_response(body: &Value) -> Result<Quote, ServiceError> {
    let result = body
        .get("chart")
        .and_then(|c| c.get("result"))
        .and_then(|r| r.get(0))
        .ok_or_else(|| ServiceError::Parse("missing chart.result[0]".to_string()))?;

    let meta = result
        .get("meta")
        .ok_or_else(|| ServiceError::Parse("missing chart.result[0].meta".to_string()))?;

    let price = meta
        .get("regularMarketPrice")
        .and_then(Value::as_f64)
        .ok_or_else(|| ServiceError::Parse("missing regularMarketPrice".to_string()))?;

    let candles = result
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(|q| q.get(0));

    let high_24h = meta
        .get("regularMarketDayHigh")
        .and_then(Value::as_f64)
        .or_else(|| candles.and_then(|c| series_max(c, "high")))
        .unwrap_or(price);

    let low_24h = meta
        .get("regularMarketDayLow")
        .and_then(Value::as_f64)
        .or_else(|| candles.and_then(|c| series_min(c, "low")))
        .unwrap_or(price);

    let volume = meta
        .get("regularMarketVolume")
        .and_then(Value::as_f64)
        .or_else(|| candles.and_then(|c| series_sum(c, "volume")))
        .unwrap_or(0.0);

    Ok(Quote {
        price: round5(price),
        high_24h: round5(high_24h),
        low_24h: round5(low_24h),
        volume,
    })
}

fn series_values(candles: &Value, field: &str) -> Option<Vec<f64>> {
    let values: Vec<f64> = candles
        .get(field)?
        .as_array()?
        .iter()
        .filter_map(Value::as_f64)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn series_max(candles: &Value, field: &str) -> Option<f64> {
    series_values(candles, field)?.into_iter().reduce(f64::max)
}

fn series_min(candles: &Value, field: &str) -> Option<f64> {
    series_values(candles, field)?.into_iter().reduce(f64::min)
}

fn series_sum(candles: &Value, field: &str) -> Option<f64> {
    Some(series_values(candles, field)?.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_meta_fields() {
        let body = json!({
            "chart": { "result": [{
                "meta": {
                    "regularMarketPrice": 1.08523,
                    "regularMarketDayHigh": 1.09012,
                    "regularMarketDayLow": 1.08011,
                    "regularMarketVolume": 1500000.0
                },
                "indicators": { "quote": [{}] }
            }]}
        });

        let quote = parse_chart_response(&body).unwrap();
        assert_eq!(quote.price, 1.08523);
        assert_eq!(quote.high_24h, 1.09012);
        assert_eq!(quote.low_24h, 1.08011);
        assert_eq!(quote.volume, 1_500_000.0);
    }

    #[test]
    fn falls_back_to_candle_arrays() {
        let body = json!({
            "chart": { "result": [{
                "meta": { "regularMarketPrice": 1.085 },
                "indicators": { "quote": [{
                    "high": [1.0861, null, 1.0899],
                    "low": [1.0812, 1.0803, null],
                    "volume": [100.0, 200.0, 300.0]
                }]}
            }]}
        });

        let quote = parse_chart_response(&body).unwrap();
        assert_eq!(quote.high_24h, 1.0899);
        assert_eq!(quote.low_24h, 1.0803);
        assert_eq!(quote.volume, 600.0);
    }

    #[test]
    fn missing_price_is_an_error() {
        let body = json!({ "chart": { "result": [{ "meta": {} }] } });
        assert!(matches!(
            parse_chart_response(&body),
            Err(ServiceError::Parse(_))
        ));
    }
}
