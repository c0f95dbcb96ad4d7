//! Lexical URL scanner
//!
//! Matching is deliberately loose: explicit `http(s)://` tokens up to the
//! next whitespace or bracketing character, or bare `label.label.tld`
//! tokens with an optional `www.` and path. Tokens are recorded verbatim;
//! no case folding or trailing-slash normalization happens here.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::entities::NewLink;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"https?://[^\s<>"'\)\]]+|(?:www\.)?[a-zA-Z0-9.-]+\.[a-z]{2,}(?:/[^\s]*)?"#,
    )
    .expect("URL pattern is valid")
});

/// Every URL-like token in `text`, in order of appearance, repeats included
pub fn find_candidates(text: &str) -> Vec<&str> {
    URL_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Host portion of a token, or the token itself when no host can be parsed.
///
/// The host is normalized the way [`Url`] parses it: lowercased,
/// IDNA-encoded and without the port.
///
/// Scheme-less tokens such as `www.example.test/path` are read as if they
/// carried `http://`.
pub fn derive_domain(token: &str) -> String {
    let parsed = match Url::parse(token) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("http://{token}")).ok(),
        Err(_) => None,
    };

    parsed
        .as_ref()
        .and_then(Url::host_str)
        .filter(|host| !host.is_empty())
        .map_or_else(|| token.to_string(), str::to_string)
}

/// Counts reported by an extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub inserted: u64,
    pub skipped: u64,
}

impl ExtractionSummary {
    /// Links found in the text, whether new or not
    #[inline]
    pub fn found(&self) -> u64 {
        self.inserted + self.skipped
    }
}

/// Links to insert and how many tokens were exact duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPlan {
    pub to_insert: Vec<NewLink>,
    pub skipped: u64,
}

/// Split the tokens found in `text` into new links and duplicates of
/// `existing` (or of an earlier token in the same text).
pub fn plan_insertions(text: &str, existing: &HashSet<String>) -> LinkPlan {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut plan = LinkPlan::default();

    for token in find_candidates(text) {
        if !seen.insert(token) {
            plan.skipped += 1;
            continue;
        }
        plan.to_insert.push(NewLink {
            url: token.to_string(),
            domain: derive_domain(token),
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_scheme_and_bare_domains() {
        let found = find_candidates("Win now http://bit.ly/x and www.scam.test/y");
        assert_eq!(found, vec!["http://bit.ly/x", "www.scam.test/y"]);
    }

    #[test]
    fn test_scheme_token_stops_at_brackets_and_quotes() {
        let found = find_candidates(r#"(see https://evil.test/login) or "https://a.test/q""#);
        assert_eq!(found, vec!["https://evil.test/login", "https://a.test/q"]);
    }

    #[test]
    fn test_requires_lowercase_tld() {
        assert!(find_candidates("call me at HOME.NOW").is_empty());
        assert!(find_candidates("version 1.2 is out").is_empty());
    }

    #[test]
    fn test_no_normalization() {
        let found = find_candidates("HTTPS://Example.test/ https://example.test/");
        assert_eq!(found, vec!["Example.test/", "https://example.test/"]);
    }

    #[test]
    fn test_derive_domain() {
        assert_eq!(derive_domain("http://bit.ly/x"), "bit.ly");
        assert_eq!(derive_domain("https://Login.Bank.test:8443/a"), "login.bank.test");
        assert_eq!(derive_domain("http://Bücher.test/"), "xn--bcher-kva.test");
        assert_eq!(derive_domain("www.scam.test/y"), "www.scam.test");
        assert_eq!(derive_domain("http://"), "http://");
    }

    #[test]
    fn test_plan_skips_existing_and_repeats() {
        let existing: HashSet<String> = ["http://bit.ly/x".to_string()].into_iter().collect();
        let plan = plan_insertions(
            "http://bit.ly/x then pay.test twice pay.test",
            &existing,
        );
        assert_eq!(plan.skipped, 2);
        assert_eq!(
            plan.to_insert,
            vec![NewLink {
                url: "pay.test".to_string(),
                domain: "pay.test".to_string(),
            }]
        );
    }

    #[test]
    fn test_plan_empty_text() {
        let plan = plan_insertions("\n", &HashSet::new());
        assert!(plan.to_insert.is_empty());
        assert_eq!(plan.skipped, 0);
    }

    #[test]
    fn test_summary_found() {
        let summary = ExtractionSummary { inserted: 2, skipped: 3 };
        assert_eq!(summary.found(), 5);
    }
}
