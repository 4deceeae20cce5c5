//! Page fetching behind a trait seam so tests can substitute fixtures.
//!
//! A fetch never returns `Err`: every failure mode is data in
//! [`FetchOutcome`], which keeps the scorer boundary infallible.

use async_trait::async_trait;
use metrics::{counter, histogram};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 8;
pub const ENV_FETCH_TIMEOUT_SECS: &str = "CREDIBILITY_FETCH_TIMEOUT_SECS";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; credibility-scorer/0.1)";

/// Body-level view of a fetched page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Html { title: Option<String>, text: String },
    /// Non-HTML bodies (PDF, images, ...) keep only their size; the scorer
    /// notes the limited analysis.
    Other { content_type: String, byte_len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub status: u16,
    /// Scheme of the final URL after redirects.
    pub used_https: bool,
    pub content: PageContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::Connect => write!(f, "connect"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Outcome of one fetch attempt. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(FetchedPage),
    BadStatus { status: u16 },
    Failed { kind: FailureKind, detail: String },
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> FetchOutcome;
    fn name(&self) -> &'static str;
}

/// Production fetcher: one shared `reqwest` client with a bounded timeout
/// and an identifying User-Agent. Redirects are followed; transport security
/// is judged on the final URL.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Timeout from `CREDIBILITY_FETCH_TIMEOUT_SECS`, default 8s.
    pub fn from_env() -> Self {
        let secs = std::env::var(ENV_FETCH_TIMEOUT_SECS)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        Self::with_timeout(Duration::from_secs(secs))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client");
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &Url) -> FetchOutcome {
        let t0 = std::time::Instant::now();
        let outcome = self.fetch_inner(url).await;
        histogram!("score_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        if let FetchOutcome::Failed { kind, detail } = &outcome {
            tracing::warn!(kind = %kind, detail = %detail, "fetch failed");
            counter!("score_fetch_failures_total").increment(1);
        }
        outcome
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

impl HttpFetcher {
    async fn fetch_inner(&self, url: &Url) -> FetchOutcome {
        let resp = match self.client.get(url.clone()).send().await {
            Ok(resp) => resp,
            Err(e) => return classify_error(&e),
        };

        let status = resp.status();
        if !status.is_success() {
            return FetchOutcome::BadStatus {
                status: status.as_u16(),
            };
        }

        let used_https = resp.url().scheme() == "https";
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.contains("text/html") {
            let body = match resp.text().await {
                Ok(b) => b,
                Err(e) => return classify_error(&e),
            };
            FetchOutcome::Success(FetchedPage {
                status: status.as_u16(),
                used_https,
                content: PageContent::Html {
                    title: crate::content::extract_title(&body),
                    text: crate::content::visible_text(&body),
                },
            })
        } else {
            let bytes = match resp.bytes().await {
                Ok(b) => b,
                Err(e) => return classify_error(&e),
            };
            FetchOutcome::Success(FetchedPage {
                status: status.as_u16(),
                used_https,
                content: PageContent::Other {
                    content_type,
                    byte_len: bytes.len(),
                },
            })
        }
    }
}

fn classify_error(e: &reqwest::Error) -> FetchOutcome {
    let kind = if e.is_timeout() {
        FailureKind::Timeout
    } else if e.is_connect() {
        FailureKind::Connect
    } else {
        FailureKind::Other
    };
    let detail = match kind {
        FailureKind::Timeout => "request timed out".to_string(),
        FailureKind::Connect => "connection failed".to_string(),
        FailureKind::Other => "request failed".to_string(),
    };
    FetchOutcome::Failed { kind, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_display_names() {
        assert_eq!(FailureKind::Timeout.to_string(), "timeout");
        assert_eq!(FailureKind::Connect.to_string(), "connect");
        assert_eq!(FailureKind::Other.to_string(), "other");
    }

    #[test]
    fn fetcher_from_env_ignores_nonsense_timeouts() {
        // Just exercises the parse path; the client itself is opaque.
        std::env::remove_var(ENV_FETCH_TIMEOUT_SECS);
        let _ = HttpFetcher::from_env();
    }
}
