//! # Scoring Weights
//!
//! Every heuristic number used by the scorer, collected in one tunable table.
//!
//! - Defaults are named constants; control flow never hardcodes a weight.
//! - Optionally loaded from a TOML or JSON file (env path first, then the
//!   `config/` fallbacks), with silent fallback to the built-in defaults.
//! - All adjustment values are clamped to `[0.0, 1.0]` on load.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::DomainSuffix;

pub const ENV_WEIGHTS_PATH: &str = "CREDIBILITY_WEIGHTS_PATH";
pub const DEFAULT_WEIGHTS_TOML_PATH: &str = "config/weights.toml";
pub const DEFAULT_WEIGHTS_JSON_PATH: &str = "config/weights.json";

pub const DEFAULT_BASE: f64 = 0.35;
pub const DEFAULT_PRIOR_GOV: f64 = 0.25;
pub const DEFAULT_PRIOR_EDU: f64 = 0.20;
pub const DEFAULT_PRIOR_ORG: f64 = 0.08;
pub const DEFAULT_PRIOR_COM: f64 = 0.02;
pub const DEFAULT_PRIOR_OTHER: f64 = 0.0;
pub const DEFAULT_INACCESSIBLE_PENALTY: f64 = 0.25;
pub const DEFAULT_INACCESSIBLE_FLOOR: f64 = 0.05;
pub const DEFAULT_HTTPS_BONUS: f64 = 0.05;
pub const DEFAULT_TITLE_BONUS: f64 = 0.03;
pub const DEFAULT_LONG_TEXT_BONUS: f64 = 0.06;
pub const DEFAULT_MODERATE_TEXT_BONUS: f64 = 0.03;
pub const DEFAULT_SHORT_TEXT_PENALTY: f64 = 0.03;
pub const DEFAULT_AUTHOR_BONUS: f64 = 0.05;
pub const DEFAULT_DATE_BONUS: f64 = 0.04;
pub const DEFAULT_REFERENCE_BONUS: f64 = 0.06;
pub const DEFAULT_LONG_TEXT_CHARS: usize = 2000;
pub const DEFAULT_MODERATE_TEXT_CHARS: usize = 600;

/// Tunable weight table for the scorer, loaded from TOML/JSON or defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    /// Starting score before any signal fires.
    pub base: f64,
    pub prior_gov: f64,
    pub prior_edu: f64,
    pub prior_org: f64,
    pub prior_com: f64,
    pub prior_other: f64,
    /// Subtracted when the page cannot be fetched (network error or bad status).
    pub inaccessible_penalty: f64,
    /// Lower bound for inaccessible pages.
    pub inaccessible_floor: f64,
    pub https_bonus: f64,
    pub title_bonus: f64,
    pub long_text_bonus: f64,
    pub moderate_text_bonus: f64,
    pub short_text_penalty: f64,
    pub author_bonus: f64,
    pub date_bonus: f64,
    pub reference_bonus: f64,
    /// Visible-text length (chars) counted as substantial content.
    pub long_text_chars: usize,
    /// Visible-text length (chars) counted as moderate content.
    pub moderate_text_chars: usize,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            prior_gov: DEFAULT_PRIOR_GOV,
            prior_edu: DEFAULT_PRIOR_EDU,
            prior_org: DEFAULT_PRIOR_ORG,
            prior_com: DEFAULT_PRIOR_COM,
            prior_other: DEFAULT_PRIOR_OTHER,
            inaccessible_penalty: DEFAULT_INACCESSIBLE_PENALTY,
            inaccessible_floor: DEFAULT_INACCESSIBLE_FLOOR,
            https_bonus: DEFAULT_HTTPS_BONUS,
            title_bonus: DEFAULT_TITLE_BONUS,
            long_text_bonus: DEFAULT_LONG_TEXT_BONUS,
            moderate_text_bonus: DEFAULT_MODERATE_TEXT_BONUS,
            short_text_penalty: DEFAULT_SHORT_TEXT_PENALTY,
            author_bonus: DEFAULT_AUTHOR_BONUS,
            date_bonus: DEFAULT_DATE_BONUS,
            reference_bonus: DEFAULT_REFERENCE_BONUS,
            long_text_chars: DEFAULT_LONG_TEXT_CHARS,
            moderate_text_chars: DEFAULT_MODERATE_TEXT_CHARS,
        }
    }
}

impl ScoringWeights {
    /// Load the weight table from a TOML or JSON file.
    /// Falls back to the defaults on any read or parse error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => match parse_weights(&s, extension_hint(path)) {
                Ok(w) => w.sanitized(),
                Err(e) => {
                    tracing::warn!(error = ?e, path = %path.display(), "weights file unparseable, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Load using env var + fallbacks:
    /// 1) `$CREDIBILITY_WEIGHTS_PATH`
    /// 2) `config/weights.toml`
    /// 3) `config/weights.json`
    /// 4) built-in defaults
    pub fn load_default() -> Self {
        if let Ok(p) = std::env::var(ENV_WEIGHTS_PATH) {
            return Self::load_from_file(PathBuf::from(p));
        }
        let toml_p = PathBuf::from(DEFAULT_WEIGHTS_TOML_PATH);
        if toml_p.exists() {
            return Self::load_from_file(&toml_p);
        }
        let json_p = PathBuf::from(DEFAULT_WEIGHTS_JSON_PATH);
        if json_p.exists() {
            return Self::load_from_file(&json_p);
        }
        Self::default()
    }

    /// Prior adjustment for a classified domain suffix.
    pub fn prior_for(&self, suffix: DomainSuffix) -> f64 {
        match suffix {
            DomainSuffix::Gov => self.prior_gov,
            DomainSuffix::Edu => self.prior_edu,
            DomainSuffix::Org => self.prior_org,
            DomainSuffix::Com => self.prior_com,
            DomainSuffix::Other => self.prior_other,
        }
    }

    /// Clamp every adjustment into `[0.0, 1.0]`.
    fn sanitized(mut self) -> Self {
        for v in [
            &mut self.base,
            &mut self.prior_gov,
            &mut self.prior_edu,
            &mut self.prior_org,
            &mut self.prior_com,
            &mut self.prior_other,
            &mut self.inaccessible_penalty,
            &mut self.inaccessible_floor,
            &mut self.https_bonus,
            &mut self.title_bonus,
            &mut self.long_text_bonus,
            &mut self.moderate_text_bonus,
            &mut self.short_text_penalty,
            &mut self.author_bonus,
            &mut self.date_bonus,
            &mut self.reference_bonus,
        ] {
            *v = v.clamp(0.0, 1.0);
        }
        self
    }
}

fn extension_hint(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn parse_weights(s: &str, hint_ext: String) -> anyhow::Result<ScoringWeights> {
    if hint_ext == "json" {
        return Ok(serde_json::from_str(s)?);
    }
    // TOML first for everything else; JSON as last resort.
    match toml::from_str::<ScoringWeights>(s) {
        Ok(w) => Ok(w),
        Err(_) => Ok(serde_json::from_str(s)?),
    }
}
