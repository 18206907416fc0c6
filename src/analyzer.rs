// src/analyzer.rs
use chrono::{DateTime, Timelike, Utc};
use rand::Rng;

use crate::indicators::{IndicatorEngine, NEWS_SPIKE};
use crate::types::{Direction, EconomicNews, MarketData, Signal, TradingHours};

/// Smallest quoted increment for EUR/USD.
pub const PIP_SIZE: f64 = 0.0001;

/// Indicators counted three times in the probability tally.
const WEIGHTED_INDICATORS: [&str; 3] = ["EMA Crossover", "MACD", "Volume Confirmation"];

/// Strength bucket and display color for a probability score.
pub fn calculate_signal_strength(probability: i64) -> (&'static str, &'static str) {
    if probability >= 75 {
        ("strong", "success")
    } else if probability >= 50 {
        ("moderate", "warning")
    } else {
        ("weak", "danger")
    }
}

pub fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

/// Synthesize a trading signal from the current market/news snapshot.
///
/// Pure function of its inputs plus the injected RNG; callers pass a seeded
/// `StdRng` in tests for deterministic output.
pub fn analyze_signal<R: Rng>(
    market: &MarketData,
    news: &EconomicNews,
    hours: &TradingHours,
    engine: &dyn IndicatorEngine,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Signal {
    let trading_allowed = hours.allows(now.hour(), news.high_impact);

    let mut strategies = engine.evaluate(market, rng);

    // News dominates pattern signals: flag the spike, drop the pattern-based
    // indicators that are unreliable while the market digests the release.
    if news.high_impact {
        strategies.insert(NEWS_SPIKE.to_string(), 1);
        strategies.insert("EMA Crossover".to_string(), 0);
        strategies.insert("RSI Divergence".to_string(), 0);
    }

    // Weighted tally: every flag once, the reliable three counted 3x.
    let mut active: i64 = strategies.values().map(|&v| i64::from(v)).sum();
    let mut total = strategies.len() as i64;
    for name in WEIGHTED_INDICATORS.iter() {
        let flag = i64::from(*strategies.get(*name).unwrap_or(&0));
        active += flag * 2;
        total += 2;
    }
    let mut probability = active * 100 / total;

    if !trading_allowed {
        probability = std::cmp::max(10, probability / 2);
    }

    let direction = pick_direction(market, rng);

    let base_duration = rng.gen_range(5i64..=15) as f64;
    let mut modifier = probability as f64 / 50.0;
    if news.high_impact {
        modifier *= 0.5;
    }
    let duration = ((base_duration * modifier).round() as i64).clamp(5, 45);

    let risk_reward = ((1.0 + (probability as f64 / 100.0) * 2.0) * 10.0).round() / 10.0;

    let mut current_price = market.current_price;
    if current_price == 0.0 {
        // Synthetic fallback so targets never degenerate to zero.
        current_price = round5(1.07 + rng.gen::<f64>() * 0.01);
    }

    let pips_target = probability / 10 + rng.gen_range(5i64..=15);

    let entry_price = current_price;
    let (target_price, stop_loss) = match direction {
        Direction::Long => (
            round5(entry_price + PIP_SIZE * pips_target as f64),
            round5(entry_price - PIP_SIZE * pips_target as f64 / risk_reward),
        ),
        Direction::Short => (
            round5(entry_price - PIP_SIZE * pips_target as f64),
            round5(entry_price + PIP_SIZE * pips_target as f64 / risk_reward),
        ),
    };

    let (strength_class, strength_color) = calculate_signal_strength(probability);

    Signal {
        id: None,
        timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        strategies,
        probability,
        direction,
        duration,
        risk_reward,
        current_price,
        entry_price,
        target_price,
        stop_loss,
        pips_target,
        strength_class: strength_class.to_string(),
        strength_color: strength_color.to_string(),
        trading_allowed,
        volume: market.volume,
        high_24h: market.high_24h,
        low_24h: market.low_24h,
        has_high_impact_news: news.high_impact,
    }
}

/// Direction biased by where price sits in the daily range: lower third
/// favors LONG 70/30, upper third favors SHORT 70/30, middle is a fair coin.
fn pick_direction<R: Rng>(market: &MarketData, rng: &mut R) -> Direction {
    if market.current_price > 0.0 {
        let daily_range = market.high_24h - market.low_24h;
        if daily_range > 0.0 {
            let position_in_range = (market.current_price - market.low_24h) / daily_range;
            if position_in_range < 0.33 {
                return if rng.gen::<f64>() > 0.3 {
                    Direction::Long
                } else {
                    Direction::Short
                };
            }
            if position_in_range > 0.66 {
                return if rng.gen::<f64>() > 0.3 {
                    Direction::Short
                } else {
                    Direction::Long
                };
            }
        }
    }
    if rng.gen::<f64>() > 0.5 {
        Direction::Long
    } else {
        Direction::Short
    }
}
