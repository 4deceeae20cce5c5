//! URL input normalization.
//!
//! Accepts the lenient inputs users actually paste (`example.com`, stray
//! whitespace) and rejects the rest before any network call:
//! - missing scheme → assume `https://`
//! - scheme must be http(s)
//! - host must contain at least one dot

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static RE_HTTP_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^https?://").unwrap());
static RE_ANY_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap());

/// Normalize and validate a raw URL string.
pub fn normalize_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("empty URL");
    }

    let with_scheme = if RE_HTTP_SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else if RE_ANY_SCHEME.is_match(trimmed) {
        let scheme = trimmed.split("://").next().unwrap_or_default();
        bail!("unsupported scheme '{scheme}'");
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&with_scheme).with_context(|| format!("unparseable URL '{trimmed}'"))?;

    let host = match url.host_str() {
        Some(h) => h,
        None => bail!("URL has no host"),
    };
    if !host.contains('.') {
        bail!("invalid URL host '{host}'");
    }

    Ok(url)
}
