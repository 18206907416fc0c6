// Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use signal_dashboard::types::{
    Direction, EconomicNews, Impact, MarketData, NewsEvent, Signal, TradingHours,
};

pub fn sample_market() -> MarketData {
    MarketData {
        current_price: 1.085,
        high_24h: 1.09,
        low_24h: 1.08,
        volume: 2_000_000.0,
        last_update: Some(Utc::now()),
    }
}

pub fn quiet_news() -> EconomicNews {
    EconomicNews {
        latest: Vec::new(),
        high_impact: false,
        last_update: Some(Utc::now()),
    }
}

pub fn high_impact_news() -> EconomicNews {
    let now = Utc::now();
    EconomicNews {
        latest: vec![NewsEvent {
            title: "ECB Interest Rate Decision".to_string(),
            time: now,
            impact: Impact::High,
            currency: "EUR".to_string(),
        }],
        high_impact: true,
        last_update: Some(now),
    }
}

pub fn disabled_hours() -> TradingHours {
    TradingHours::default()
}

pub fn always_open_hours() -> TradingHours {
    TradingHours {
        enabled: true,
        start: 0,
        end: 24,
    }
}

pub fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

pub fn sample_signal() -> Signal {
    let mut strategies = BTreeMap::new();
    strategies.insert("EMA Crossover".to_string(), 1);
    strategies.insert("MACD".to_string(), 0);
    strategies.insert("Volume Confirmation".to_string(), 1);

    Signal {
        id: None,
        timestamp: "2024-03-15 12:00:00".to_string(),
        strategies,
        probability: 62,
        direction: Direction::Long,
        duration: 20,
        risk_reward: 2.2,
        current_price: 1.085,
        entry_price: 1.085,
        target_price: 1.0862,
        stop_loss: 1.08445,
        pips_target: 12,
        strength_class: "moderate".to_string(),
        strength_color: "warning".to_string(),
        trading_allowed: true,
        volume: 2_000_000.0,
        high_24h: 1.09,
        low_24h: 1.08,
        has_high_impact_news: false,
    }
}
