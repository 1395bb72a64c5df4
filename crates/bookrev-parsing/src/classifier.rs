//! Cheap gate deciding whether a citation title is plausibly a book review.

use bookrev_core::Strictness;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DEFAULT_CONFIG, ParsingConfig};
use crate::markup::{emphasis_texts, normalize_emphasis, strip_tags};
use crate::names::{looks_like_name_with_config, split_leading_name};
use crate::text_processing::normalize;

/// Outcome of classification, naming the evidence that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// An exclusion marker (correction, erratum, reply, ...) was found.
    Excluded,
    /// A long italic span, taken to be the book title.
    Emphasis,
    /// A literal review marker such as "book review" or "review of".
    ExplicitMarker,
    /// A structural cue that is reliable in every venue.
    StructuralMarker,
    /// A weaker cue accepted only for lenient venues.
    LenientEvidence,
    NoEvidence,
}

impl Verdict {
    pub fn is_review(self) -> bool {
        !matches!(self, Verdict::Excluded | Verdict::NoEvidence)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Excluded => "excluded",
            Verdict::Emphasis => "emphasis",
            Verdict::ExplicitMarker => "explicit_marker",
            Verdict::StructuralMarker => "structural_marker",
            Verdict::LenientEvidence => "lenient_evidence",
            Verdict::NoEvidence => "no_evidence",
        }
    }
}

/// Review classifier holding an immutable [`ParsingConfig`].
#[derive(Debug, Clone, Default)]
pub struct ReviewClassifier {
    config: ParsingConfig,
}

impl ReviewClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn classify(&self, title: &str, strictness: Strictness) -> Verdict {
        classify_with_config(title, strictness, &self.config)
    }

    pub fn is_review(&self, title: &str, strictness: Strictness) -> bool {
        self.classify(title, strictness).is_review()
    }
}

/// Decide whether `title` is plausibly a book review, using the built-in vocabulary.
pub fn is_review(title: &str, strictness: Strictness) -> bool {
    classify_with_config(title, strictness, &DEFAULT_CONFIG).is_review()
}

/// Classify `title` under `strictness`.
///
/// Exclusion markers veto unconditionally. Evidence is then checked in
/// tiers: long emphasis spans, literal and structural markers (all venues),
/// and finally weaker opener shapes for [`Strictness::Lenient`] venues only.
pub fn classify_with_config(title: &str, strictness: Strictness, config: &ParsingConfig) -> Verdict {
    static LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)\(review\)|\bbook\s+reviews?\b|\breview\s+of\b|\breviewed\s+works?\b|^\s*review\s*:")
            .unwrap()
    });
    static QUOTED_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"^[^"]{2,120},\s*"[^"]{10,}""#).unwrap());
    static BOLD_AUTHOR_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^\s*<\s*(?:b|strong)\b[^>]*>[^<]{2,80}<\s*/\s*(?:b|strong)\s*>\s*:").unwrap()
    });
    static BYLINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+By\s+\p{Lu}").unwrap());

    let normalized = normalize(title);
    let italicized = normalize_emphasis(&normalized);
    let plain = strip_tags(&italicized);
    let lowered = plain.to_lowercase();

    if let Some(marker) = config
        .exclusion_markers
        .iter()
        .find(|m| lowered.contains(m.as_str()))
    {
        tracing::debug!(title = %plain, marker = %marker, "not a review: exclusion marker");
        return Verdict::Excluded;
    }

    if emphasis_texts(&italicized)
        .iter()
        .any(|t| t.trim().chars().count() >= config.min_emphasis_chars)
    {
        return Verdict::Emphasis;
    }

    if LITERAL_RE.is_match(&plain) {
        return Verdict::ExplicitMarker;
    }

    if QUOTED_RE.is_match(&plain)
        || BOLD_AUTHOR_RE.is_match(&normalized)
        || BYLINE_RE.is_match(&plain)
    {
        return Verdict::StructuralMarker;
    }

    if strictness == Strictness::ItalicOnly {
        tracing::debug!(title = %plain, "not a review: no evidence for italic-only venue");
        return Verdict::NoEvidence;
    }

    if has_lenient_evidence(&plain, config) {
        return Verdict::LenientEvidence;
    }

    tracing::debug!(title = %plain, "not a review: no evidence");
    Verdict::NoEvidence
}

fn has_lenient_evidence(plain: &str, config: &ParsingConfig) -> bool {
    static POSSESSIVE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\p{Lu}[\w.\-]*(?:\s+\p{Lu}[\w.\-]*){0,3}'s?\s+\S").unwrap()
    });
    static PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b\d+\s*pp\b").unwrap());
    static SURNAME_COMMA_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(\p{Lu}[\p{L}'\-]{1,19}),\s").unwrap());
    static COMMA_BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s+by\s+\p{Lu}").unwrap());
    static AUTHOR_COLON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^:]{3,80}):\s*\S").unwrap());
    static EDS_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[^.]{2,60},\s*[Ee]ds?\.?\s+\p{Lu}").unwrap());

    if POSSESSIVE_RE.is_match(plain) || PAGES_RE.is_match(plain) {
        return true;
    }

    if let Some(caps) = SURNAME_COMMA_RE.captures(plain) {
        let surname = caps[1].to_lowercase();
        if !config.topic_nouns.contains(surname.as_str())
            && !config.stopwords.contains(surname.as_str())
        {
            return true;
        }
    }

    if COMMA_BY_RE.is_match(plain) || EDS_RE.is_match(plain) {
        return true;
    }

    if let Some(caps) = AUTHOR_COLON_RE.captures(plain) {
        let author = caps[1].trim();
        let words = author.split_whitespace().count();
        if (2..=6).contains(&words) && looks_like_name_with_config(author, config) {
            return true;
        }
    }

    split_leading_name(plain, config).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(title: &str) -> bool {
        is_review(title, Strictness::Lenient)
    }

    fn italic_only(title: &str) -> bool {
        is_review(title, Strictness::ItalicOnly)
    }

    // =========================================================================
    // Exclusions
    // =========================================================================

    #[test]
    fn test_exclusion_beats_italics() {
        assert!(!lenient("Correction to: a prior review"));
        assert!(!lenient("Correction to: <i>Climate Matters: Ethics in a Warming World</i>"));
        assert!(!italic_only("Erratum: <i>Climate Matters: Ethics in a Warming World</i>"));
        assert!(!lenient("Reply to Critics"));
        assert!(!lenient("Books Received"));
    }

    #[test]
    fn test_custom_exclusion_marker() {
        let config = crate::ParsingConfigBuilder::new()
            .add_exclusion_marker("Obituary".to_string())
            .build()
            .unwrap();
        let classifier = ReviewClassifier::with_config(config);
        assert_eq!(
            classifier.classify("Obituary: <i>A Life in Philosophy and Letters</i>", Strictness::Lenient),
            Verdict::Excluded
        );
    }

    // =========================================================================
    // Venue-independent evidence
    // =========================================================================

    #[test]
    fn test_long_emphasis() {
        let c = ReviewClassifier::new();
        assert_eq!(
            c.classify("<i>Climate Matters: Ethics in a Warming World</i>", Strictness::ItalicOnly),
            Verdict::Emphasis
        );
        assert_eq!(
            c.classify("<em>Reasons and Persons</em>", Strictness::ItalicOnly),
            Verdict::Emphasis
        );
        // Too short to count on its own.
        assert!(!italic_only("<i>Plato</i>"));
    }

    #[test]
    fn test_literal_markers() {
        let c = ReviewClassifier::new();
        assert_eq!(
            c.classify("Book Review: Beast and Man", Strictness::ItalicOnly),
            Verdict::ExplicitMarker
        );
        assert!(italic_only("Review of Beast and Man"));
        assert!(italic_only("Beast and Man (review)"));
        assert!(italic_only("Review: Mary Midgley: Beast and Man"));
        assert!(italic_only("Reviewed Work: Beast and Man by Mary Midgley"));
    }

    #[test]
    fn test_structural_markers() {
        let c = ReviewClassifier::new();
        assert_eq!(
            c.classify("Held, \"The Ethics of Care\"", Strictness::ItalicOnly),
            Verdict::StructuralMarker
        );
        assert!(italic_only("<b>Peter Singer</b>: Animal Liberation"));
        assert!(italic_only("Animal Liberation. By Peter Singer"));
    }

    // =========================================================================
    // Lenient-only evidence
    // =========================================================================

    #[test]
    fn test_lenient_openers() {
        assert!(lenient("Rawls's Theory of Justice"));
        assert!(!italic_only("Rawls's Theory of Justice"));
        assert!(lenient("Animal Liberation, 224 pp."));
        assert!(lenient("Singer, Animal Liberation"));
        assert!(lenient("Animal Liberation, by Peter Singer"));
        assert!(lenient("Mary Midgley: Beast and Man"));
        assert!(lenient("Mary Midgley. Beast and Man"));
        assert!(lenient("Smith, John, eds. Essays on Virtue"));
    }

    #[test]
    fn test_lenient_rejects_topic_openers() {
        assert!(!lenient("Ethics, Animals and the Environment"));
        assert!(!lenient("Environmental Ethics: A Reader"));
        assert!(!lenient("The moral status of animals"));
    }

    #[test]
    fn test_verdict_is_review() {
        assert!(Verdict::Emphasis.is_review());
        assert!(Verdict::LenientEvidence.is_review());
        assert!(!Verdict::Excluded.is_review());
        assert!(!Verdict::NoEvidence.is_review());
    }
}
