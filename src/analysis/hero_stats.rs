use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::window::Window;
use crate::extract::MatchRecord;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroStat {
    pub hero_name: String,
    pub matches_played: usize,
    pub wins: usize,
    /// Percentage in `[0, 100]`.
    pub win_rate: f64,
    pub window_label: String,
}

#[derive(Debug, Clone)]
struct HeroTally {
    name: String,
    played: usize,
    wins: usize,
}

impl HeroTally {
    fn new(name: String) -> Self {
        HeroTally {
            name,
            played: 0,
            wins: 0,
        }
    }

    fn win_rate(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            100.0 * self.wins as f64 / self.played as f64
        }
    }
}

/// Per-hero tallies kept in the order heroes were first seen.
pub struct HeroStatsTracker {
    tallies: Vec<HeroTally>,
    index: HashMap<String, usize>,
}

impl HeroStatsTracker {
    pub fn new() -> Self {
        HeroStatsTracker {
            tallies: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add_match(&mut self, hero_name: &str, won: bool) {
        let slot = match self.index.get(hero_name) {
            Some(&slot) => slot,
            None => {
                self.tallies.push(HeroTally::new(hero_name.to_string()));
                self.index.insert(hero_name.to_string(), self.tallies.len() - 1);
                self.tallies.len() - 1
            }
        };

        let tally = &mut self.tallies[slot];
        tally.played += 1;
        if won {
            tally.wins += 1;
        }
    }

    /// Most played first. The sort is stable, so heroes with equal counts
    /// keep their first-seen order.
    pub fn ranked(&self, window_label: &str, top_n: usize) -> Vec<HeroStat> {
        let mut stats: Vec<HeroStat> = self
            .tallies
            .iter()
            .map(|t| HeroStat {
                hero_name: t.name.clone(),
                matches_played: t.played,
                wins: t.wins,
                win_rate: t.win_rate(),
                window_label: window_label.to_string(),
            })
            .collect();

        stats.sort_by(|a, b| b.matches_played.cmp(&a.matches_played));
        stats.truncate(top_n);
        stats
    }
}

impl Default for HeroStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Top five heroes of `records` over the trailing week ending at `now`.
/// Records are expected to be window-filtered already.
pub fn aggregate(records: &[MatchRecord], now: DateTime<Utc>) -> Vec<HeroStat> {
    let window = Window::trailing_days(now, DEFAULT_WINDOW_DAYS);
    aggregate_in(records, &window, DEFAULT_TOP_N)
}

pub fn aggregate_in(records: &[MatchRecord], window: &Window, top_n: usize) -> Vec<HeroStat> {
    let mut tracker = HeroStatsTracker::new();
    for record in records {
        tracker.add_match(&record.hero_name, record.outcome.is_win());
    }
    tracker.ranked(&window.label(), top_n)
}
