//! Best-effort link metadata scraping.
//!
//! DESIGN
//! ======
//! Given a syntactically valid absolute URL, fetch its HTML once and pull a
//! (title, description, image, favicon) tuple out of it with ordered,
//! case-insensitive regex fallbacks — no full HTML parse. Every failure mode
//! degrades to hostname-derived defaults: this module never returns an
//! error, because the client renders whatever comes back. One fetch per
//! call; no retries, no cache.

#[cfg(test)]
#[path = "metadata_test.rs"]
mod metadata_test;

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Scraped link metadata. `favicon` is always present — the favicon-service
/// template is a guaranteed final fallback — while `image` is omitted when
/// the page declares no `og:image`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataResult {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub favicon: String,
}

/// Why an upstream fetch was abandoned. Logged only; the caller always gets
/// the degraded fallback payload, never this error.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),
}

/// Compiled tag matchers, built once. First match wins per field.
struct Patterns {
    og_title: Regex,
    og_description: Regex,
    meta_description: Regex,
    og_image: Regex,
    icon_link: Regex,
    apple_touch_icon: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        og_title: meta_property_matcher("og:title"),
        og_description: meta_property_matcher("og:description"),
        meta_description: compile(
            r#"(?i)<meta\s+name=["']description["']\s+content=["']([^"']+)["']"#,
        ),
        og_image: meta_property_matcher("og:image"),
        icon_link: compile(r#"(?i)<link[^>]+rel=["'](?:shortcut )?icon["'][^>]*href=["']([^"']+)["']"#),
        apple_touch_icon: compile(
            r#"(?i)<link[^>]+rel=["']apple-touch-icon["'][^>]*href=["']([^"']+)["']"#,
        ),
    })
}

fn meta_property_matcher(property: &str) -> Regex {
    compile(&format!(
        r#"(?i)<meta\s+property=["']{property}["']\s+content=["']([^"']+)["']"#
    ))
}

fn compile(pattern: &str) -> Regex {
    // Patterns are fixed at compile time; a failure here is a typo, not data.
    Regex::new(pattern).expect("static pattern")
}

fn first_capture<'h>(re: &Regex, html: &'h str) -> Option<&'h str> {
    re.captures(html).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Resolve metadata for `url`. Never fails: network errors, timeouts, and
/// non-OK statuses all degrade to hostname-derived defaults.
pub async fn resolve(http: &reqwest::Client, url: &Url) -> MetadataResult {
    match fetch_html(http, url).await {
        Ok(html) => extract(&html, url),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "metadata fetch failed; using fallback");
            fallback(url)
        }
    }
}

async fn fetch_html(http: &reqwest::Client, url: &Url) -> Result<String, FetchError> {
    let response = http.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    Ok(response.text().await?)
}

/// Pull the metadata tuple out of raw HTML.
fn extract(html: &str, url: &Url) -> MetadataResult {
    let p = patterns();
    let title = first_capture(&p.og_title, html)
        .map_or_else(|| hostname(url).to_owned(), str::to_owned);
    let description = first_capture(&p.og_description, html)
        .or_else(|| first_capture(&p.meta_description, html))
        .map_or_else(|| url.as_str().to_owned(), str::to_owned);
    let image = first_capture(&p.og_image, html).and_then(|href| to_absolute(href, url));

    MetadataResult { title, description, image, favicon: favicon(html, url) }
}

/// Favicon fallback chain: `rel=icon` link, then `rel=apple-touch-icon`,
/// then `/favicon.ico` against the page origin, then the favicon-service
/// template — the last step is a deterministic URL, so this always yields
/// something.
fn favicon(html: &str, url: &Url) -> String {
    let p = patterns();
    first_capture(&p.icon_link, html)
        .or_else(|| first_capture(&p.apple_touch_icon, html))
        .and_then(|href| to_absolute(href, url))
        .or_else(|| to_absolute("/favicon.ico", url))
        .unwrap_or_else(|| favicon_service_url(hostname(url)))
}

/// Resolve a scraped href against the source page. Already-absolute hrefs
/// pass through; root-relative and bare-relative hrefs are prefixed with the
/// page origin. A base URL without a host yields `None` (absent, not an
/// error).
fn to_absolute(href: &str, base: &Url) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_owned());
    }
    base.host_str()?;
    let origin = base.origin().ascii_serialization();
    if href.starts_with('/') {
        Some(format!("{origin}{href}"))
    } else {
        Some(format!("{origin}/{href}"))
    }
}

fn hostname(url: &Url) -> &str {
    url.host_str().unwrap_or_default()
}

/// Deterministic third-party favicon URL for a hostname. A URL template
/// only; never checked against the network.
fn favicon_service_url(host: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={host}&sz=64")
}

/// Degraded payload used when the fetch fails outright.
fn fallback(url: &Url) -> MetadataResult {
    let host = hostname(url);
    MetadataResult {
        title: host.to_owned(),
        description: url.as_str().to_owned(),
        image: None,
        favicon: favicon_service_url(host),
    }
}
