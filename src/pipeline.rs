//! Markup in, ranked hero statistics out.
//!
//! A run is a pure function of the page bytes and the reference time: it
//! parses the page, reads every candidate row, keeps the matches inside the
//! trailing window and ranks heroes by how often they were played.

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::Serialize;

use crate::analysis::{aggregate_in, HeroStat, Window};
use crate::analysis::hero_stats::{DEFAULT_TOP_N, DEFAULT_WINDOW_DAYS};
use crate::error::AppError;
use crate::extract::{locate_rows, ExtractionStats, MatchExtractor, MatchRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub window_days: i64,
    pub top_n: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            window_days: DEFAULT_WINDOW_DAYS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub window_label: String,
    pub stats: Vec<HeroStat>,
    pub diagnostics: ExtractionStats,
}

impl StatsReport {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Runs the pipeline with the default week window and top five.
pub fn run(markup: &[u8], now: DateTime<Utc>) -> Result<StatsReport, AppError> {
    run_with(markup, now, &PipelineOptions::default())
}

pub fn run_with(
    markup: &[u8],
    now: DateTime<Utc>,
    options: &PipelineOptions,
) -> Result<StatsReport, AppError> {
    let text = std::str::from_utf8(markup).map_err(|e| {
        AppError::MalformedMarkup(format!("page is not valid UTF-8 ({})", e))
    })?;
    Ok(run_str(text, now, options))
}

/// Same as [`run_with`] for markup that is already text. Cannot fail.
pub fn run_str(markup: &str, now: DateTime<Utc>, options: &PipelineOptions) -> StatsReport {
    let window = Window::trailing_days(now, options.window_days);
    let (records, diagnostics) = extract_records(markup, &window);

    tracing::info!(
        rows = diagnostics.rows_scanned,
        kept = diagnostics.records_kept,
        skipped = diagnostics.rows_skipped(),
        too_old = diagnostics.outside_window,
        timestamp_fallbacks = diagnostics.timestamp_fallbacks,
        defaulted_losses = diagnostics.outcome_defaulted_to_loss,
        "match page processed"
    );

    StatsReport {
        window_label: window.label(),
        stats: aggregate_in(&records, &window, options.top_n),
        diagnostics,
    }
}

/// Every record on the page that falls inside `window`, in page order.
pub fn extract_records(markup: &str, window: &Window) -> (Vec<MatchRecord>, ExtractionStats) {
    let document = Html::parse_document(markup);
    let rows = locate_rows(&document.root_element());

    let mut extractor = MatchExtractor::new(window.end);
    let mut records = Vec::new();
    for row in &rows {
        let Some(record) = extractor.extract(row) else {
            continue;
        };
        if window.contains(record.occurred_at) {
            records.push(record);
        } else {
            extractor.stats_mut().outside_window += 1;
            tracing::debug!(hero = %record.hero_name, at = %record.occurred_at, "match outside window");
        }
    }

    let mut diagnostics = extractor.into_stats();
    diagnostics.records_kept = records.len();
    (records, diagnostics)
}
