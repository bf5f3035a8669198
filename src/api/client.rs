use crate::config::Config;
use crate::error::AppError;
use governor::{clock::DefaultClock, state::{InMemoryState, NotKeyed}, Quota, RateLimiter};
use std::io::Read;
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use super::endpoints::{matches_url, validate_player_id};

/// Pages larger than this are rejected; a match list is far smaller.
const MAX_PAGE_BYTES: u64 = 16 * 1024 * 1024;
const MAX_RETRIES: u32 = 3;

pub struct DotabuffClient {
    config: Config,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl DotabuffClient {
    pub fn new(config: Config) -> Self {
        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));
        DotabuffClient {
            config,
            rate_limiter,
        }
    }

    /// Raw bytes of the player's match-list page. Decoding is left to the
    /// pipeline so an undecodable body surfaces as a parse failure.
    pub fn fetch_matches_page(&self, player_id: &str) -> Result<Vec<u8>, AppError> {
        let id = validate_player_id(player_id)?;
        let url = matches_url(&self.config.base_url, id)?;
        tracing::info!(url = %url, "fetching match page");

        self.execute_request(&url, id)
    }

    fn execute_request(&self, url: &str, player_id: &str) -> Result<Vec<u8>, AppError> {
        let mut retry_count = 0;

        loop {
            while self.rate_limiter.check().is_err() {
                thread::sleep(Duration::from_millis(50));
            }

            let response = ureq::get(url)
                .set("User-Agent", &self.config.user_agent)
                .set(
                    "Accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .set("Accept-Language", "en-US,en;q=0.5")
                .set("DNT", "1")
                .set("Upgrade-Insecure-Requests", "1")
                .call();

            match response {
                Ok(resp) => {
                    tracing::debug!(status = resp.status(), "response received");
                    let body = read_capped(resp.into_reader(), MAX_PAGE_BYTES)?;
                    tracing::debug!(bytes = body.len(), "page downloaded");
                    return Ok(body);
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    tracing::warn!(wait_ms, "rate limited, backing off before retry");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(404, _)) => {
                    return Err(AppError::PlayerNotFound(player_id.to_string()));
                }
                Err(ureq::Error::Status(code, _)) => {
                    return Err(AppError::HttpError(format!("status {} from {}", code, url)));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }
}

/// Reads at most `limit` bytes. One extra byte is requested so an oversized
/// body is reported instead of being silently truncated.
fn read_capped(reader: impl Read, limit: u64) -> Result<Vec<u8>, AppError> {
    let mut body = Vec::new();
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut body)
        .map_err(|e| AppError::HttpError(e.to_string()))?;

    if body.len() as u64 > limit {
        return Err(AppError::HttpError(format!(
            "page too large: more than {} bytes",
            limit
        )));
    }
    Ok(body)
}
