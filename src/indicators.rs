// src/indicators.rs
use std::collections::BTreeMap;

use rand::{Rng, RngCore};

use crate::types::MarketData;

/// Technical indicators with the descriptions shown on the dashboard.
pub const INDICATORS: [(&str, &str); 10] = [
    (
        "EMA Crossover",
        "Exponential Moving Average crossover between 9 and 21 periods",
    ),
    (
        "MACD",
        "Moving Average Convergence Divergence showing bullish/bearish momentum",
    ),
    (
        "RSI Divergence",
        "Relative Strength Index divergence from price action",
    ),
    (
        "Liquidity Sweep",
        "Price sweeping liquidity levels before reversing",
    ),
    (
        "VWAP Bounce",
        "Price bouncing off the Volume Weighted Average Price",
    ),
    (
        "Breakout",
        "Price breaking through significant resistance/support level",
    ),
    (
        "Order Block",
        "Institutional order block identified on the chart",
    ),
    (
        "Volume Confirmation",
        "Trading volume supports the price direction",
    ),
    (
        "Fibonacci Retracement",
        "Price retracing to key Fibonacci levels",
    ),
    (
        "Bollinger Bands",
        "Price touching or breaking through Bollinger Bands",
    ),
];

/// Synthetic indicator injected while high-impact news is in effect.
pub const NEWS_SPIKE: &str = "News Spike";

pub const VOLUME_CONFIRMATION_INDICATOR: &str = "Volume Confirmation";
pub const VOLUME_CONFIRMATION_THRESHOLD: f64 = 1_000_000.0;

pub fn indicator_catalog() -> BTreeMap<String, String> {
    INDICATORS
        .iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect()
}

/// Produces a 0/1 flag per catalog indicator. The analyzer only depends on
/// this trait, so the coin-flip placeholder below can be swapped for real
/// technical-analysis computation without touching the tally logic.
pub trait IndicatorEngine: Send + Sync {
    fn evaluate(&self, market: &MarketData, rng: &mut dyn RngCore) -> BTreeMap<String, u8>;
}

/// Demo engine: "Volume Confirmation" is driven by actual volume, every other
/// indicator is a uniform coin flip standing in for real detection logic.
pub struct RandomIndicatorEngine;

impl IndicatorEngine for RandomIndicatorEngine {
    fn evaluate(&self, market: &MarketData, rng: &mut dyn RngCore) -> BTreeMap<String, u8> {
        let mut flags = BTreeMap::new();
        for (name, _) in INDICATORS.iter() {
            let flag = if *name == VOLUME_CONFIRMATION_INDICATOR {
                u8::from(market.volume > VOLUME_CONFIRMATION_THRESHOLD)
            } else {
                rng.gen_range(0..=1u8)
            };
            flags.insert(name.to_string(), flag);
        }
        flags
    }
}
