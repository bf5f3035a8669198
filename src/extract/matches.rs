use chrono::{DateTime, Utc};
use serde::Serialize;

use super::dom::TreeElement;
use super::hero::identify_hero;
use super::outcome::{resolve_outcome, Outcome};

/// One match row that yielded a hero, a result and a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub hero_name: String,
    pub outcome: Outcome,
    pub occurred_at: DateTime<Utc>,
}

/// Counters describing how one page was read. Lets callers see how often the
/// lenient fallbacks kicked in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub rows_scanned: usize,
    pub missing_hero: usize,
    pub missing_outcome: usize,
    pub missing_timestamp: usize,
    /// Rows whose datetime did not parse and were dated "now" instead.
    pub timestamp_fallbacks: usize,
    /// Rows whose result indicator had no keyword and were counted as losses.
    pub outcome_defaulted_to_loss: usize,
    pub outside_window: usize,
    pub records_kept: usize,
}

impl ExtractionStats {
    pub fn rows_skipped(&self) -> usize {
        self.missing_hero + self.missing_outcome + self.missing_timestamp
    }
}

/// Turns candidate rows into match records for one pipeline run.
pub struct MatchExtractor {
    now: DateTime<Utc>,
    stats: ExtractionStats,
}

impl MatchExtractor {
    pub fn new(now: DateTime<Utc>) -> Self {
        MatchExtractor {
            now,
            stats: ExtractionStats::default(),
        }
    }

    /// A record when the row has a hero, a result and a datetime attribute;
    /// `None` otherwise. Rows like headers, ads and pagination land here.
    pub fn extract<E: TreeElement>(&mut self, row: &E) -> Option<MatchRecord> {
        self.stats.rows_scanned += 1;

        let Some(hero_name) = identify_hero(row) else {
            self.stats.missing_hero += 1;
            tracing::debug!(row = self.stats.rows_scanned, "skipping row: no hero");
            return None;
        };

        let Some(verdict) = resolve_outcome(row) else {
            self.stats.missing_outcome += 1;
            tracing::debug!(row = self.stats.rows_scanned, hero = %hero_name, "skipping row: no result");
            return None;
        };

        let Some(raw_time) = read_datetime(row) else {
            self.stats.missing_timestamp += 1;
            tracing::debug!(row = self.stats.rows_scanned, hero = %hero_name, "skipping row: no datetime");
            return None;
        };

        if verdict.defaulted {
            self.stats.outcome_defaulted_to_loss += 1;
            tracing::warn!(hero = %hero_name, "result indicator had no keyword, counting as a loss");
        }

        let occurred_at = match parse_timestamp(&raw_time) {
            Some(ts) => ts,
            None => {
                self.stats.timestamp_fallbacks += 1;
                tracing::warn!(datetime = %raw_time, hero = %hero_name, "unparseable datetime, using current time");
                self.now
            }
        };

        Some(MatchRecord {
            hero_name,
            outcome: verdict.outcome,
            occurred_at,
        })
    }

    pub fn stats_mut(&mut self) -> &mut ExtractionStats {
        &mut self.stats
    }

    pub fn into_stats(self) -> ExtractionStats {
        self.stats
    }
}

/// Single-row convenience over [`MatchExtractor`].
pub fn extract_match<E: TreeElement>(row: &E, now: DateTime<Utc>) -> Option<MatchRecord> {
    MatchExtractor::new(now).extract(row)
}

/// `datetime` of the first `<time>` in the row. Blank counts as missing.
fn read_datetime<E: TreeElement>(row: &E) -> Option<String> {
    let time = row.select("time").into_iter().next()?;
    let raw = time.attr("datetime")?;
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// RFC 3339 / ISO 8601 with an offset, normalised to UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
