//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the single upstream HTTP client used for metadata scraping;
//! reqwest pools connections internally, so one client serves every request.

use std::time::Duration;

/// User-agent presented to scraped sites. Some hosts serve stripped-down or
/// bot-blocked pages to unknown agents, so this mimics a desktop browser.
pub const SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Upstream fetch timeout; a slow page must not hold a request open forever.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — `reqwest::Client` is internally reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
}

impl AppState {
    /// Build the state, configuring the scraper client. Redirects are
    /// followed automatically (reqwest's default policy).
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(SCRAPER_USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { http })
    }
}
