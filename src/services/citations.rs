//! Citation extraction and restoration.
//!
//! Author-year citations are pulled out before any transformation and
//! replaced with opaque `[[REF_n]]` placeholders, which every stage treats
//! as indivisible tokens. The vault restores them afterwards; the tolerant
//! restore pattern accepts whitespace that normalization may have left
//! inside the brackets.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static CITATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*[A-Za-z&\-,\.\s]+(?:et al\.\s*)?,\s*\d{4}(?:,\s*(?:pp?\.\s*\d+(?:-\d+)?))?\s*\)")
        .expect("valid regex")
});

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*\[\s*REF_(\d+)\s*\]\s*\]").expect("valid regex"));

/// Request-scoped map from placeholder index to original citation text.
#[derive(Debug, Clone, Default)]
pub struct CitationVault {
    citations: Vec<String>,
}

impl CitationVault {
    /// Replace each citation with a numbered placeholder, first occurrence
    /// first. Returns the rewritten text and the vault for restoration.
    pub fn extract(text: &str) -> (String, CitationVault) {
        let mut citations = Vec::new();
        let mut replaced = text.to_string();
        for m in CITATION_RE.find_iter(text) {
            let placeholder = format!("[[REF_{}]]", citations.len() + 1);
            replaced = replaced.replacen(m.as_str(), &placeholder, 1);
            citations.push(m.as_str().to_string());
        }
        if !citations.is_empty() {
            debug!(count = citations.len(), "extracted citations");
        }
        (replaced, CitationVault { citations })
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    /// Substitute the original citation text back for every placeholder.
    /// Unknown placeholder numbers are left as-is.
    pub fn restore(&self, text: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &regex::Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.citations.get(i))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_single_citation() {
        let (text, vault) = CitationVault::extract("The effect is real (Smith, 2020).");
        assert_eq!(text, "The effect is real [[REF_1]].");
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn test_extract_et_al_with_pages() {
        let (text, vault) =
            CitationVault::extract("Results vary (Jones et al., 2019, pp. 12-14) widely.");
        assert_eq!(text, "Results vary [[REF_1]] widely.");
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn test_extract_multiple_citations_numbered_in_order() {
        let input = "A claim (Smith, 2020). Another (Lee, 2021).";
        let (text, vault) = CitationVault::extract(input);
        assert_eq!(text, "A claim [[REF_1]]. Another [[REF_2]].");
        assert_eq!(vault.len(), 2);
    }

    #[test]
    fn test_restore_roundtrip() {
        let input = "A claim (Smith, 2020). Another (Lee, 2021).";
        let (replaced, vault) = CitationVault::extract(input);
        assert_eq!(vault.restore(&replaced), input);
    }

    #[test]
    fn test_restore_tolerates_spaced_brackets() {
        let (_, vault) = CitationVault::extract("A claim (Smith, 2020).");
        assert_eq!(vault.restore("A claim [ [ REF_1 ] ]."), "A claim (Smith, 2020).");
    }

    #[test]
    fn test_restore_leaves_unknown_placeholders() {
        let vault = CitationVault::default();
        assert_eq!(vault.restore("See [[REF_7]]."), "See [[REF_7]].");
    }

    #[test]
    fn test_plain_parenthetical_is_not_a_citation() {
        let (text, vault) = CitationVault::extract("The value (roughly four) grows.");
        assert_eq!(text, "The value (roughly four) grows.");
        assert!(vault.is_empty());
    }
}
