use crate::analysis::hero_stats::{DEFAULT_TOP_N, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::error::AppError;
use crate::pipeline::PipelineOptions;
use std::env;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://www.dotabuff.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 2;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub requests_per_second: u32,
    pub window_days: i64,
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            requests_per_second: DEFAULT_REQUESTS_PER_SECOND,
            window_days: DEFAULT_WINDOW_DAYS,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let base_url = lookup("HERO_STATS_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);
        let user_agent = lookup("HERO_STATS_USER_AGENT").unwrap_or(defaults.user_agent);

        let requests_per_second = parse_var(
            &lookup,
            "HERO_STATS_REQUESTS_PER_SECOND",
            defaults.requests_per_second,
        )?;
        if requests_per_second == 0 {
            return Err(AppError::ConfigError(
                "HERO_STATS_REQUESTS_PER_SECOND must be at least 1".to_string(),
            ));
        }

        let window_days = parse_var(&lookup, "HERO_STATS_WINDOW_DAYS", defaults.window_days)?;
        if !(1..=MAX_WINDOW_DAYS).contains(&window_days) {
            return Err(AppError::ConfigError(format!(
                "HERO_STATS_WINDOW_DAYS must be between 1 and {}",
                MAX_WINDOW_DAYS
            )));
        }

        let top_n = parse_var(&lookup, "HERO_STATS_TOP_N", defaults.top_n)?;

        Ok(Config {
            base_url,
            user_agent,
            requests_per_second,
            window_days,
            top_n,
        })
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            window_days: self.window_days,
            top_n: self.top_n,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(format!("{} is not a valid number: '{}'", key, raw))
        }),
        None => Ok(default),
    }
}
