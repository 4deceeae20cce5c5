//! Domain suffix classification for the credibility prior.
//!
//! The prior is keyed on the final host label only (`.gov`, `.edu`, `.org`,
//! `.com`, everything else). Multi-label public suffixes such as `gov.uk`
//! fall into `Other`. The numeric adjustments live in
//! [`crate::weights::ScoringWeights`] so the mapping here stays a read-only
//! process-wide constant.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainSuffix {
    Gov,
    Edu,
    Org,
    Com,
    Other,
}

impl DomainSuffix {
    /// Classify a host by its last dot-separated label (case-insensitive).
    pub fn classify_host(host: &str) -> Self {
        let label = host
            .trim_end_matches('.')
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match label.as_str() {
            "gov" => Self::Gov,
            "edu" => Self::Edu,
            "org" => Self::Org,
            "com" => Self::Com,
            _ => Self::Other,
        }
    }

    /// Classify a parsed URL; URLs without a host map to `Other`.
    pub fn classify(url: &Url) -> Self {
        url.host_str().map(Self::classify_host).unwrap_or(Self::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gov => "gov",
            Self::Edu => "edu",
            Self::Org => "org",
            Self::Com => "com",
            Self::Other => "other",
        }
    }

    /// Fixed explanation clause for this suffix's prior.
    pub fn clause(&self) -> &'static str {
        match self {
            Self::Gov => "Government domain (.gov) tends to be reliable.",
            Self::Edu => "Educational domain (.edu) tends to be reliable.",
            Self::Org => "Organization domain (.org) can be credible depending on the org.",
            Self::Com => "Commercial domain (.com) varies widely in credibility.",
            Self::Other => "Unknown/other domain suffix; credibility varies.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_suffixes() {
        assert_eq!(DomainSuffix::classify_host("www.nih.gov"), DomainSuffix::Gov);
        assert_eq!(DomainSuffix::classify_host("cs.stanford.edu"), DomainSuffix::Edu);
        assert_eq!(DomainSuffix::classify_host("wikipedia.org"), DomainSuffix::Org);
        assert_eq!(DomainSuffix::classify_host("example.com"), DomainSuffix::Com);
    }

    #[test]
    fn unknown_and_multi_label_suffixes_are_other() {
        assert_eq!(DomainSuffix::classify_host("example.io"), DomainSuffix::Other);
        assert_eq!(DomainSuffix::classify_host("service.gov.uk"), DomainSuffix::Other);
        assert_eq!(DomainSuffix::classify_host("127.0.0.1"), DomainSuffix::Other);
    }

    #[test]
    fn classification_is_case_insensitive_and_trailing_dot_safe() {
        assert_eq!(DomainSuffix::classify_host("WWW.NIH.GOV"), DomainSuffix::Gov);
        assert_eq!(DomainSuffix::classify_host("example.com."), DomainSuffix::Com);
    }

    #[test]
    fn classify_from_url() {
        let u = Url::parse("https://www.cdc.gov/flu").unwrap();
        assert_eq!(DomainSuffix::classify(&u), DomainSuffix::Gov);
    }
}
