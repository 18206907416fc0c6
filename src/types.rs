// src/types.rs
use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Instrument served by this dashboard. Pip size is fixed per instrument.
pub const SYMBOL: &str = "EURUSD";

/// Latest quote for the instrument. Replaced wholesale by the refresh loop so
/// readers never observe a half-updated record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub current_price: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub volume: f64,
    pub last_update: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub title: String,
    pub time: DateTime<Utc>,
    pub impact: Impact,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomicNews {
    pub latest: Vec<NewsEvent>,
    /// True iff any high-impact event fell within the last two hours.
    pub high_impact: bool,
    pub last_update: Option<DateTime<Utc>>,
}

/// UTC trading-hours filter. Disabled by default (24h trading).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingHours {
    pub enabled: bool,
    pub start: u32,
    pub end: u32,
}

impl Default for TradingHours {
    fn default() -> Self {
        Self {
            enabled: false,
            start: 0,
            end: 24,
        }
    }
}

impl TradingHours {
    /// Whether signal generation is allowed at the given UTC hour.
    /// High-impact news vetoes trading inside the window.
    pub fn allows(&self, utc_hour: u32, high_impact_news: bool) -> bool {
        if !self.enabled {
            return true;
        }
        if utc_hour >= self.start && utc_hour < self.end {
            return !high_impact_news;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SHORT")]
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "SHORT" => Direction::Short,
            _ => Direction::Long,
        }
    }
}

/// One synthesized trading signal. Immutable once created; `id` is filled in
/// after the signal has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub timestamp: String,
    pub strategies: BTreeMap<String, u8>,
    pub probability: i64,
    pub direction: Direction,
    pub duration: i64,
    pub risk_reward: f64,
    pub current_price: f64,
    pub entry_price: f64,
    pub target_price: f64,
    pub stop_loss: f64,
    pub pips_target: i64,
    pub strength_class: String,
    pub strength_color: String,
    pub trading_allowed: bool,
    pub volume: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub has_high_impact_news: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "WIN")]
    Win,
    #[serde(rename = "LOSS")]
    Loss,
    #[serde(rename = "NEUTRAL")]
    Neutral,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Loss => "LOSS",
            Outcome::Neutral => "NEUTRAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "WIN" => Some(Outcome::Win),
            "LOSS" => Some(Outcome::Loss),
            "NEUTRAL" => Some(Outcome::Neutral),
            _ => None,
        }
    }
}

/// Operator-reported outcome for one signal. At most one per signal,
/// enforced by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResultRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub signal_id: i64,
    pub result: Outcome,
    pub pips_gained: Option<f64>,
    pub exit_price: Option<f64>,
    pub exit_time: Option<String>,
    pub notes: Option<String>,
}

/// Bounded FIFO of the most recent signals, for dashboard display only.
/// Separate from the persisted signal history.
#[derive(Debug)]
pub struct SignalHistory {
    signals: VecDeque<Signal>,
    capacity: usize,
}

impl SignalHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            signals: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a signal, evicting the oldest entry once at capacity.
    pub fn push(&mut self, signal: Signal) {
        if self.signals.len() == self.capacity {
            self.signals.pop_front();
        }
        self.signals.push_back(signal);
    }

    pub fn snapshot(&self) -> Vec<Signal> {
        self.signals.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal_with_probability(probability: i64) -> Signal {
        Signal {
            id: None,
            timestamp: "2024-01-01 00:00:00".to_string(),
            strategies: BTreeMap::new(),
            probability,
            direction: Direction::Long,
            duration: 15,
            risk_reward: 2.0,
            current_price: 1.085,
            entry_price: 1.085,
            target_price: 1.086,
            stop_loss: 1.0845,
            pips_target: 10,
            strength_class: "moderate".to_string(),
            strength_color: "warning".to_string(),
            trading_allowed: true,
            volume: 0.0,
            high_24h: 1.09,
            low_24h: 1.08,
            has_high_impact_news: false,
        }
    }

    #[test]
    fn history_evicts_oldest_first_at_capacity() {
        let mut history = SignalHistory::new(10);
        for p in 0..12 {
            history.push(signal_with_probability(p));
        }

        assert_eq!(history.len(), 10);
        let snapshot = history.snapshot();
        assert_eq!(snapshot.first().unwrap().probability, 2);
        assert_eq!(snapshot.last().unwrap().probability, 11);
    }

    #[test]
    fn history_keeps_insertion_order_below_capacity() {
        let mut history = SignalHistory::new(10);
        history.push(signal_with_probability(1));
        history.push(signal_with_probability(2));

        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].probability, 1);
        assert_eq!(snapshot[1].probability, 2);
    }

    #[test]
    fn trading_hours_disabled_always_allows() {
        let hours = TradingHours::default();
        assert!(hours.allows(3, true));
        assert!(hours.allows(23, false));
    }

    #[test]
    fn trading_hours_window_and_news_veto() {
        let hours = TradingHours {
            enabled: true,
            start: 8,
            end: 17,
        };
        assert!(hours.allows(8, false));
        assert!(hours.allows(16, false));
        assert!(!hours.allows(17, false));
        assert!(!hours.allows(7, false));
        // High-impact news vetoes even inside the window.
        assert!(!hours.allows(12, true));
    }
}
