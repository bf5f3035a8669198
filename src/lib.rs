//! Most-played heroes and win rates from a player's match-list page.
//!
//! The page markup is read through layered heuristics (see [`extract`]),
//! matches are limited to a trailing window and ranked by [`analysis`]. The
//! whole flow is wrapped by [`pipeline::run`].

pub mod analysis;
pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;

pub use analysis::HeroStat;
pub use error::AppError;
pub use pipeline::{run, run_with, PipelineOptions, StatsReport};
