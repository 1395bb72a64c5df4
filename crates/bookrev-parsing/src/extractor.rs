use std::fmt;

use bookrev_core::ParseResult;
use bookrev_core::matching::normalize_for_comparison;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::markup::{normalize_emphasis, strip_tags};
use crate::rules::{FormatRule, RuleContext, TitleView, default_rules};
use crate::text_processing::normalize;
use crate::vocabulary::GENERIC_PLACEHOLDERS;

static DEFAULT_EXTRACTOR: Lazy<FormatExtractor> = Lazy::new(FormatExtractor::new);

/// Extract the reviewed book's title and author with the built-in cascade.
///
/// `subtitle` may be empty. It is only parsed when the title yields nothing.
pub fn extract(title: &str, subtitle: &str) -> Option<ParseResult> {
    DEFAULT_EXTRACTOR.extract(title, subtitle)
}

/// Remove a leading "Book Review(s):" or "Review of" from emphasis-normalized text.
pub(crate) fn strip_review_prefix(text: &str) -> String {
    static PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)^\s*(?:book\s*reviews?\s*[:.\-]?\s*|review\s+of\s*:?\s+)").unwrap()
    });
    PREFIX_RE.replace(text, "").into_owned()
}

/// True for section headings like "Book Reviews" that carry no citation.
pub(crate) fn is_placeholder(plain: &str) -> bool {
    let key = plain
        .trim()
        .trim_end_matches(['.', ':', ';', ',', ' '])
        .to_lowercase();
    key.is_empty() || GENERIC_PLACEHOLDERS.contains(&key.as_str())
}

/// Edge-case policy shared by every rule: reject short or placeholder
/// titles, and authors that merely repeat the title.
pub(crate) fn accept(result: ParseResult, config: &ParsingConfig) -> Option<ParseResult> {
    let title = result.book_title.trim();
    if title.chars().count() < config.min_title_chars || is_placeholder(title) {
        return None;
    }
    if result.has_author() {
        let author = normalize_for_comparison(&result.author_display());
        if author.is_empty() || author == normalize_for_comparison(title) {
            return None;
        }
    }
    Some(result)
}

/// The format cascade: an ordered list of [`FormatRule`]s over one config.
pub struct FormatExtractor {
    config: ParsingConfig,
    rules: Vec<Box<dyn FormatRule>>,
}

impl fmt::Debug for FormatExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatExtractor")
            .field("config", &self.config)
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl Default for FormatExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatExtractor {
    /// Create an extractor with default configuration and rules.
    pub fn new() -> Self {
        Self::with_config(ParsingConfig::default())
    }

    /// Create an extractor with a custom configuration and the default rules.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
        }
    }

    /// Replace the whole rule list.
    pub fn with_rules(mut self, rules: Vec<Box<dyn FormatRule>>) -> Self {
        self.rules = rules;
        self
    }

    /// Insert a rule at `index` (clamped to the end of the list).
    pub fn insert_rule(mut self, index: usize, rule: Box<dyn FormatRule>) -> Self {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
        self
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Parse `title`; fall back to `subtitle` when the title yields nothing.
    pub fn extract(&self, title: &str, subtitle: &str) -> Option<ParseResult> {
        self.extract_one(title).or_else(|| {
            if subtitle.trim().is_empty() {
                None
            } else {
                tracing::trace!(subtitle, "title gave no parse, trying subtitle");
                self.extract_one(subtitle)
            }
        })
    }

    /// Parse an alternate title from a secondary metadata source.
    pub fn extract_alternate(&self, alternate: &str) -> Option<ParseResult> {
        crate::alternate::parse_alternate_title_with_config(alternate, &self.config)
    }

    fn extract_one(&self, raw: &str) -> Option<ParseResult> {
        let full = normalize_emphasis(&normalize(raw));
        let full_plain = strip_tags(&full);
        if is_placeholder(&full_plain) {
            tracing::trace!(title = %full_plain, "placeholder title");
            return None;
        }

        let body = strip_review_prefix(&full);
        let plain = strip_tags(&body);
        let view = TitleView {
            full: &full,
            body: &body,
            plain: &plain,
            full_plain: &full_plain,
        };
        let ctx = RuleContext::new(&self.config);

        for rule in &self.rules {
            let Some(candidate) = rule.try_match(&view, &ctx) else {
                continue;
            };
            match accept(candidate, &self.config) {
                Some(result) => {
                    tracing::trace!(
                        rule = rule.name(),
                        format = %result.matched_format,
                        title = %result.book_title,
                        author = %result.author_display(),
                        "rule committed"
                    );
                    return Some(result);
                }
                None => tracing::trace!(rule = rule.name(), "candidate rejected"),
            }
        }
        tracing::trace!(title = %full_plain, "no rule matched");
        None
    }
}
