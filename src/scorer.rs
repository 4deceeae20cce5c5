//! # Credibility Scorer
//! Pure, testable logic that maps `(url, fetch outcome)` → `ScoreResult`.
//!
//! The evaluation is linear and single-pass: validate the URL, apply the
//! domain prior, fetch once, walk the signal chain in a fixed order, then
//! clamp to `[0,1]`. Every failure path is converted into a valid result;
//! nothing is re-raised past this boundary.

use metrics::counter;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::DomainSuffix;
use crate::fetch::{FetchOutcome, HttpFetcher, PageContent, PageFetcher};
use crate::normalize::normalize_url;
use crate::weights::ScoringWeights;

/// The scorer's sole output: a bounded score plus the ordered explanation.
/// Serialized as a JSON object with exactly these two keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub explanation: String,
}

/// One named score contribution. Ephemeral: exists only during one call.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub label: &'static str,
    pub delta: f64,
    pub clause: String,
}

impl Signal {
    fn new(label: &'static str, delta: f64, clause: impl Into<String>) -> Self {
        Self {
            label,
            delta,
            clause: clause.into(),
        }
    }
}

static DEFAULT_FETCHER: Lazy<HttpFetcher> = Lazy::new(HttpFetcher::from_env);
static DEFAULT_WEIGHTS: Lazy<ScoringWeights> = Lazy::new(ScoringWeights::load_default);

/// Score a URL with the process-wide fetcher and weight table.
pub async fn score(raw_url: &str) -> ScoreResult {
    score_with(&*DEFAULT_FETCHER, &DEFAULT_WEIGHTS, raw_url).await
}

/// Score a URL with an explicit fetcher and weight table.
pub async fn score_with(
    fetcher: &dyn PageFetcher,
    weights: &ScoringWeights,
    raw_url: &str,
) -> ScoreResult {
    crate::metrics::ensure_described();
    counter!("score_requests_total").increment(1);

    let url = match normalize_url(raw_url) {
        Ok(u) => u,
        Err(e) => {
            counter!("score_invalid_url_total").increment(1);
            return invalid_input(&e);
        }
    };

    let suffix = DomainSuffix::classify(&url);
    let outcome = fetcher.fetch_page(&url).await;
    let result = evaluate(suffix, &outcome, weights);

    // Never log the raw URL; a short hash id is enough to correlate events.
    tracing::debug!(
        target: "scorer",
        id = %anon_hash(raw_url),
        suffix = suffix.as_str(),
        fetcher = fetcher.name(),
        score = result.score,
        "scored source"
    );
    result
}

/// Malformed input short-circuits to a zero score; no network call happens.
pub fn invalid_input(err: &anyhow::Error) -> ScoreResult {
    ScoreResult {
        score: 0.0,
        explanation: format!("Invalid input URL: {err}"),
    }
}

/// Pure evaluation of one fetch outcome. Deterministic: identical inputs
/// produce identical scores and explanations.
pub fn evaluate(suffix: DomainSuffix, outcome: &FetchOutcome, w: &ScoringWeights) -> ScoreResult {
    let prior = Signal::new("domain_prior", w.prior_for(suffix), suffix.clause());
    let adjusted_base = w.base + prior.delta;

    match outcome {
        FetchOutcome::Failed { detail, .. } => inaccessible(adjusted_base, detail, &prior, w),
        FetchOutcome::BadStatus { status } => {
            inaccessible(adjusted_base, &format!("HTTP {status}"), &prior, w)
        }
        FetchOutcome::Success(page) => {
            let mut signals = vec![prior];
            signals.push(transport_signal(page.used_https, w));
            signals.extend(content_signals(&page.content, w));

            let total = w.base + signals.iter().map(|s| s.delta).sum::<f64>();
            let clauses: Vec<&str> = signals.iter().map(|s| s.clause.as_str()).collect();
            ScoreResult {
                score: round3(clamp01(total)),
                explanation: clauses.join(" "),
            }
        }
    }
}

fn inaccessible(adjusted_base: f64, reason: &str, prior: &Signal, w: &ScoringWeights) -> ScoreResult {
    let raw = (adjusted_base - w.inaccessible_penalty).max(w.inaccessible_floor);
    ScoreResult {
        score: round3(clamp01(raw)),
        explanation: format!(
            "Could not reliably access the source ({reason}). {}",
            prior.clause
        ),
    }
}

fn transport_signal(used_https: bool, w: &ScoringWeights) -> Signal {
    if used_https {
        Signal::new("https", w.https_bonus, "Uses HTTPS (encrypted connection).")
    } else {
        // Plain HTTP earns no bonus; the clause still surfaces the signal.
        Signal::new(
            "plain_http",
            0.0,
            "Not using HTTPS; harder to trust transport security.",
        )
    }
}

/// Content checks composed in a fixed order so the explanation stays
/// deterministic: title → length → author → date → references.
fn content_signals(content: &PageContent, w: &ScoringWeights) -> Vec<Signal> {
    let checks: [fn(&PageContent, &ScoringWeights) -> Option<Signal>; 5] = [
        title_signal,
        text_length_signal,
        author_signal,
        date_signal,
        reference_signal,
    ];
    checks.iter().filter_map(|f| f(content, w)).collect()
}

fn title_signal(content: &PageContent, w: &ScoringWeights) -> Option<Signal> {
    match content {
        PageContent::Html { title: Some(_), .. } => Some(Signal::new(
            "title",
            w.title_bonus,
            "Page has a title, suggesting a structured page.",
        )),
        PageContent::Html { title: None, .. } => None,
        PageContent::Other { .. } => Some(Signal::new(
            "non_html",
            0.0,
            "Non-HTML content (limited text analysis).",
        )),
    }
}

fn text_length_signal(content: &PageContent, w: &ScoringWeights) -> Option<Signal> {
    let len = match content {
        PageContent::Html { text, .. } => text.chars().count(),
        PageContent::Other { byte_len, .. } => *byte_len,
    };
    let signal = if len >= w.long_text_chars {
        Signal::new(
            "text_length",
            w.long_text_bonus,
            "Has substantial content length.",
        )
    } else if len >= w.moderate_text_chars {
        Signal::new(
            "text_length",
            w.moderate_text_bonus,
            "Has moderate content length.",
        )
    } else {
        Signal::new(
            "text_length",
            -w.short_text_penalty,
            "Very little readable text; harder to assess credibility.",
        )
    };
    Some(signal)
}

fn author_signal(content: &PageContent, w: &ScoringWeights) -> Option<Signal> {
    hint_signal(content, |text| {
        crate::content::has_author_hint(text).then(|| {
            Signal::new("author_hint", w.author_bonus, "Author information detected.")
        })
    })
}

fn date_signal(content: &PageContent, w: &ScoringWeights) -> Option<Signal> {
    hint_signal(content, |text| {
        crate::content::has_date_hint(text).then(|| {
            Signal::new(
                "date_hint",
                w.date_bonus,
                "Publication/update date hints detected.",
            )
        })
    })
}

fn reference_signal(content: &PageContent, w: &ScoringWeights) -> Option<Signal> {
    hint_signal(content, |text| {
        crate::content::has_reference_hint(text).then(|| {
            Signal::new(
                "reference_hint",
                w.reference_bonus,
                "Reference/citation hints detected.",
            )
        })
    })
}

fn hint_signal<F>(content: &PageContent, check: F) -> Option<Signal>
where
    F: FnOnce(&str) -> Option<Signal>,
{
    match content {
        PageContent::Html { text, .. } => check(text),
        PageContent::Other { .. } => None,
    }
}

fn clamp01(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
