// src/news_feed.rs - simulated economic calendar
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::types::{EconomicNews, Impact, NewsEvent};

/// Lookback window during which a high-impact event suppresses signals.
const HIGH_IMPACT_WINDOW_SECS: i64 = 7200;

/// Build a simulated batch of calendar events with randomized recency and
/// impact. A real economic-calendar API would replace this; the shape of the
/// output is what downstream code depends on.
pub fn simulate_news<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> EconomicNews {
    let latest = vec![
        NewsEvent {
            title: "ECB Interest Rate Decision".to_string(),
            time: now - Duration::hours(rng.gen_range(1i64..=8)),
            impact: if rng.gen::<f64>() > 0.7 {
                Impact::High
            } else {
                Impact::Medium
            },
            currency: "EUR".to_string(),
        },
        NewsEvent {
            title: "US Non-Farm Payrolls".to_string(),
            time: now - Duration::hours(rng.gen_range(2i64..=12)),
            impact: if rng.gen::<f64>() > 0.6 {
                Impact::High
            } else {
                Impact::Medium
            },
            currency: "USD".to_string(),
        },
        NewsEvent {
            title: "EU Manufacturing PMI".to_string(),
            time: now - Duration::hours(rng.gen_range(4i64..=24)),
            impact: Impact::Medium,
            currency: "EUR".to_string(),
        },
    ];

    let high_impact = has_recent_high_impact(&latest, now);

    EconomicNews {
        latest,
        high_impact,
        last_update: Some(now),
    }
}

pub fn has_recent_high_impact(events: &[NewsEvent], now: DateTime<Utc>) -> bool {
    events.iter().any(|event| {
        event.impact == Impact::High
            && (now - event.time).num_seconds() < HIGH_IMPACT_WINDOW_SECS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn event(hours_ago: i64, impact: Impact, now: DateTime<Utc>) -> NewsEvent {
        NewsEvent {
            title: "test".to_string(),
            time: now - Duration::hours(hours_ago),
            impact,
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn high_impact_only_within_two_hours() {
        let now = Utc::now();
        assert!(has_recent_high_impact(&[event(1, Impact::High, now)], now));
        assert!(!has_recent_high_impact(&[event(3, Impact::High, now)], now));
        assert!(!has_recent_high_impact(&[event(1, Impact::Medium, now)], now));
        assert!(!has_recent_high_impact(&[], now));
    }

    #[test]
    fn simulated_batch_is_consistent() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(9);
        let news = simulate_news(now, &mut rng);

        assert_eq!(news.latest.len(), 3);
        assert_eq!(news.last_update, Some(now));
        // Derived flag must agree with the events it was derived from.
        assert_eq!(news.high_impact, has_recent_high_impact(&news.latest, now));
        for event in &news.latest {
            assert!(event.time <= now);
        }
    }
}
