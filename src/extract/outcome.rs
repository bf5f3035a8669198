use serde::Serialize;

use super::cascade::first_accepted;
use super::dom::TreeElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        self == Outcome::Win
    }
}

/// Result indicators, most specific first. The trailing `td` makes any cell
/// carrying a result keyword eligible.
pub const RESULT_SELECTORS: &[&str] = &[
    ".match-result",
    ".cell-result",
    ".match-cell--result",
    "td:nth-child(2)",
    "td:nth-child(3)",
    ".won",
    ".lost",
    "td[class*='won']",
    "td[class*='lost']",
    "td",
];

/// Colour-only indicators tried when no keyword was found anywhere.
pub const COLOR_SELECTORS: &[&str] = &[
    "td[style*='green']",
    "td[style*='red']",
    ".text-success",
    ".text-danger",
    ".text-green",
    ".text-red",
];

const RESULT_KEYWORDS: &[&str] = &["won", "victory", "win", "lost", "defeat", "loss"];
const WIN_KEYWORDS: &[&str] = &["won", "victory", "win"];
const LOSS_KEYWORDS: &[&str] = &["lost", "defeat", "loss"];

/// An accepted result indicator and what it says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    /// The indicator carried no win or loss keyword, so the verdict is the
    /// Loss default rather than an observed signal.
    pub defaulted: bool,
}

/// Win or Loss for `row`, or `None` when the row has no result indicator.
pub fn classify_outcome<E: TreeElement>(row: &E) -> Option<Outcome> {
    resolve_outcome(row).map(|verdict| verdict.outcome)
}

/// Like [`classify_outcome`], also reporting whether the Loss default was
/// used.
pub fn resolve_outcome<E: TreeElement>(row: &E) -> Option<Verdict> {
    let indicator = first_accepted(row, RESULT_SELECTORS, |el| {
        let text = el.text().to_lowercase();
        let class = el.attr_or_empty("class").to_lowercase();
        contains_any(&text, RESULT_KEYWORDS) || contains_any(&class, RESULT_KEYWORDS)
    })
    .or_else(|| first_accepted(row, COLOR_SELECTORS, |_| true))?;

    let text = indicator.text().to_lowercase();
    let class = indicator.attr_or_empty("class").to_lowercase();
    Some(classify_signals(&text, &class))
}

/// Text beats class, win beats loss; no keyword at all counts as a Loss.
fn classify_signals(text: &str, class: &str) -> Verdict {
    let observed = |outcome| Verdict {
        outcome,
        defaulted: false,
    };

    if contains_any(text, WIN_KEYWORDS) {
        observed(Outcome::Win)
    } else if contains_any(text, LOSS_KEYWORDS) {
        observed(Outcome::Loss)
    } else if contains_any(class, WIN_KEYWORDS) {
        observed(Outcome::Win)
    } else if contains_any(class, LOSS_KEYWORDS) {
        observed(Outcome::Loss)
    } else {
        // TODO: confirm against real colour-only rows before trusting this;
        // green cells without text currently count as losses.
        Verdict {
            outcome: Outcome::Loss,
            defaulted: true,
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
