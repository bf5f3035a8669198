//! Heuristic extraction of match rows from a player's match-list page.

pub mod cascade;
pub mod dom;
pub mod hero;
pub mod matches;
pub mod outcome;
pub mod rows;

pub use dom::TreeElement;
pub use hero::identify_hero;
pub use matches::{extract_match, ExtractionStats, MatchExtractor, MatchRecord};
pub use outcome::{classify_outcome, Outcome};
pub use rows::locate_rows;
