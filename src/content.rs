//! Page content signals: title extraction, visible text, and the
//! case-insensitive hint detectors (author, date, references).
//!
//! Each detector is an independent pure predicate over the extracted text so
//! the scorer can compose them in a fixed order.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static AUTHOR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)\bby\s+[A-Za-z]+\s+[A-Za-z]+", // "By John Smith"
        r"(?i)author",                       // meta tags / visible labels
        r"(?i)written by",
    ])
});

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"\b(19|20)\d{2}\b", // bare year
        r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},\s+(19|20)\d{2}\b",
        r"\b\d{1,2}/\d{1,2}/(19|20)\d{2}\b",
        r"(?i)\bupdated\b|\bpublished\b|\blast reviewed\b",
    ])
});

static REFERENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)\breferences\b",
        r"(?i)\bcitations?\b",
        r"(?i)\bbibliography\b",
        r"(?i)\bdoi:",
        r"(?i)\bPMID\b",
        r"(?i)\bjournal\b",
    ])
});

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid content pattern"))
        .collect()
}

/// Extract the `<title>` text, entity-decoded and whitespace-collapsed.
/// Returns `None` when the tag is absent or empty.
pub fn extract_title(html: &str) -> Option<String> {
    let captured = RE_TITLE.captures(html)?.get(1)?.as_str();
    let title = collapse_ws(&html_escape::decode_html_entities(captured));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Rough visible text: decode entities, strip tags, collapse whitespace.
pub fn visible_text(html: &str) -> String {
    let decoded = html_escape::decode_html_entities(html).to_string();
    let stripped = RE_TAGS.replace_all(&decoded, " ");
    collapse_ws(&stripped)
}

pub fn has_author_hint(text: &str) -> bool {
    AUTHOR_PATTERNS.iter().any(|re| re.is_match(text))
}

pub fn has_date_hint(text: &str) -> bool {
    DATE_PATTERNS.iter().any(|re| re.is_match(text))
}

pub fn has_reference_hint(text: &str) -> bool {
    REFERENCE_PATTERNS.iter().any(|re| re.is_match(text))
}

fn collapse_ws(s: &str) -> String {
    RE_WS.replace_all(s, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_extracted_and_decoded() {
        let html = "<html><head><title>\n  Flu &amp; You </title></head><body></body></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Flu & You"));
    }

    #[test]
    fn missing_or_empty_title_is_none() {
        assert_eq!(extract_title("<html><body>hi</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
    }

    #[test]
    fn visible_text_strips_markup() {
        let html = "<p>Hello,&nbsp;<b>world</b>!</p>";
        assert_eq!(visible_text(html), "Hello, world !");
    }

    #[test]
    fn author_hints_match_case_insensitively() {
        assert!(has_author_hint("Written BY the editorial team"));
        assert!(has_author_hint("by Jane Doe"));
        assert!(has_author_hint("<meta name=\"author\">"));
        assert!(!has_author_hint("a plain sentence"));
    }

    #[test]
    fn date_hints_cover_years_and_labels() {
        assert!(has_date_hint("Published on Jan 5, 2024"));
        assert!(has_date_hint("last reviewed yesterday"));
        assert!(has_date_hint("copyright 1998"));
        assert!(has_date_hint("3/14/2021"));
        assert!(!has_date_hint("no dates here"));
    }

    #[test]
    fn reference_hints_cover_citation_vocab() {
        assert!(has_reference_hint("See the References section"));
        assert!(has_reference_hint("doi:10.1000/xyz"));
        assert!(has_reference_hint("PMID 123456"));
        assert!(has_reference_hint("peer-reviewed journal"));
        assert!(!has_reference_hint("nothing scholarly"));
    }
}
