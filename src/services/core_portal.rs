//! Online CORE portal conference rank resolver
//!
//! Fetches the portal page for a conference identifier and scans it for
//! result blocks carrying a `Source:` marker (with the edition year) next
//! to a `Rank:` marker. The rank returned for a target year is the one
//! from the best usable block whose year is not newer than the target.
//!
//! One fetch per call, no retry, no caching; callers needing
//! responsiveness run this off their latency-sensitive paths.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::models::CoreRanking;

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})").unwrap());
static RANK_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"Rank:\s*([A-Za-z*]+)").unwrap());

/// HTTP client for the public CORE conference ranking portal.
pub struct CorePortalClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CorePortalClient {
    /// Build a client from the engine configuration (base URL, user
    /// agent, request timeout).
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| Error::transport(&config.portal_base_url, e.to_string()))?;
        Ok(CorePortalClient {
            http_client,
            base_url: config.portal_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Deterministic page URL for a conference identifier.
    pub fn ranking_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.base_url, identifier.trim())
    }

    /// Resolve the rank of a conference for `target_year`.
    ///
    /// Failure ladder: empty identifier is `InvalidInput`; network or HTTP
    /// failure is `Transport`; a page with zero usable blocks is
    /// `Transport` too (structural failure); usable blocks all newer than
    /// the target is `NotFound`.
    pub async fn ranking_for(&self, identifier: &str, target_year: i32) -> Result<CoreRanking> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(Error::InvalidInput(
                "empty conference identifier".to_string(),
            ));
        }

        let url = self.ranking_url(identifier);
        debug!(identifier, url = %url, target_year, "Querying CORE portal");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::transport(&url, format!("HTTP status {status}")));
        }
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(&url, e.to_string()))?;

        let blocks = scan_ranked_blocks(&body);
        if blocks.is_empty() {
            return Err(Error::transport(&url, "no usable ranking blocks in page"));
        }
        let (year, ranking) = best_ranking(&blocks, target_year).ok_or_else(|| {
            Error::NotFound(format!(
                "no ranking for {identifier:?} at or before {target_year}"
            ))
        })?;

        info!(identifier, year, ranking = %ranking, "Resolved conference ranking");
        Ok(ranking)
    }
}

/// Scan a portal page for usable ranking blocks, in document order.
/// Public so saved pages can be resolved without a network round trip.
///
/// Markup is flattened to text, then each `Source:` marker opens a block
/// running until the next marker. A block is usable when it carries a
/// four-digit year and a parseable `Rank:` token; blocks failing either
/// test are dropped individually.
pub fn scan_ranked_blocks(html: &str) -> Vec<(i32, CoreRanking)> {
    let text = TAG_PATTERN.replace_all(html, " ");
    let mut blocks = Vec::new();

    let mut segments = text.split("Source:");
    // Text before the first marker belongs to no block.
    segments.next();
    for segment in segments {
        let Some(year) = YEAR_PATTERN
            .captures(segment)
            .and_then(|caps| caps[1].parse::<i32>().ok())
        else {
            continue;
        };
        let Some(token) = RANK_PATTERN.captures(segment).map(|caps| caps[1].to_string())
        else {
            continue;
        };
        if let Ok(ranking) = token.parse::<CoreRanking>() {
            blocks.push((year, ranking));
        }
    }
    blocks
}

/// Pick the block with the highest year ≤ `target_year`. The first block
/// seen wins when two blocks report the same winning year.
pub fn best_ranking(
    blocks: &[(i32, CoreRanking)],
    target_year: i32,
) -> Option<(i32, CoreRanking)> {
    let mut best: Option<(i32, CoreRanking)> = None;
    for &(year, ranking) in blocks {
        if year > target_year {
            continue;
        }
        match best {
            Some((best_year, _)) if best_year >= year => {}
            _ => best = Some((year, ranking)),
        }
    }
    best
}
