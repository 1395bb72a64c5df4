//! Format rules tried in order by [`FormatExtractor`](crate::FormatExtractor).
//!
//! Each rule recognizes one citation convention. A rule either declines
//! (`None`) or proposes a [`ParseResult`]; the extractor validates the
//! proposal and moves on to the next rule if it is rejected.

mod byline;
mod fallback;
mod markup;
mod prefix;
mod quoted;
mod separator;

use bookrev_core::{MatchedFormat, ParseResult};

use crate::authors::{NameSplit, has_editor_marker, split_authors};
use crate::config::ParsingConfig;
use crate::markup::strip_tags;
use crate::names::looks_like_name_with_config;
use crate::noise::{strip_author_noise_with_config, strip_title_noise_with_config};

pub use byline::{CommaBy, EditedBy, FrenchPar, ReviewSuffix, SentenceBy, TitleByAuthor, WrittenBy};
pub use fallback::PlainFallback;
pub use markup::EmphasisMarkup;
pub use prefix::{BookReviewColon, ReviewOf};
pub use quoted::{Possessive, Quoted};
pub use separator::{
    AuthorColon, AuthorCommaTitle, AuthorPeriodTitle, Dash, EditorsPrefix, ReviewColonAuthor,
    TitleCommaAuthor,
};

/// One citation convention in the cascade.
pub trait FormatRule: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Propose a parse, or decline with `None`.
    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult>;
}

/// The forms of one citation title that rules read from.
#[derive(Debug, Clone, Copy)]
pub struct TitleView<'a> {
    /// Normalized title, emphasis tags rewritten to `<i>`.
    pub full: &'a str,
    /// `full` without a leading "Book Review:" or "Review of".
    pub body: &'a str,
    /// `body` with tags stripped.
    pub plain: &'a str,
    /// `full` with tags stripped.
    pub full_plain: &'a str,
}

/// Shared helpers handed to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    config: &'a ParsingConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(config: &'a ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a ParsingConfig {
        self.config
    }

    pub fn looks_like_name(&self, span: &str) -> bool {
        looks_like_name_with_config(span, self.config)
    }

    /// Strip tags and bibliographic noise from a title span.
    pub fn clean_title(&self, raw: &str) -> String {
        strip_title_noise_with_config(&strip_tags(raw), self.config)
    }

    /// Turn a raw author span into a validated first-author split.
    ///
    /// Editor markers are detected before noise stripping, since a trailing
    /// `(ed.)` may sit inside an imprint parenthetical.
    pub fn author(&self, span: &str) -> Option<NameSplit> {
        let edited = has_editor_marker(span);
        let plain = strip_tags(span);
        let plain = plain.trim_start_matches(['.', ',', ';', ':', '-', ' ']);
        let cleaned = strip_author_noise_with_config(plain, self.config);
        let mut split = split_authors(&cleaned);
        split.edited |= edited;
        if split.is_empty() || !self.looks_like_name(&split.display()) {
            return None;
        }
        Some(split)
    }

    /// A parse carrying a validated author.
    pub fn authored(&self, title: &str, author: NameSplit, format: MatchedFormat) -> ParseResult {
        ParseResult::authored(self.clean_title(title), author.given, author.family, format)
            .edited(author.edited)
            .multiple(author.multiple)
    }

    /// A title-only parse that asks for an external author lookup.
    pub fn title_only(&self, title: &str, format: MatchedFormat) -> ParseResult {
        ParseResult::title_only(self.clean_title(title), format)
    }

    /// Authored parse when `author_span` validates, else title-only.
    ///
    /// For rules with an explicit author marker ("by", "written by"): the
    /// title is trusted even when the name is not.
    pub fn authored_or_lookup(
        &self,
        title: &str,
        author_span: &str,
        format: MatchedFormat,
        fallback: MatchedFormat,
    ) -> ParseResult {
        match self.author(author_span) {
            Some(author) => self.authored(title, author, format),
            None => self.title_only(title, fallback),
        }
    }
}

/// The built-in cascade, most distinctive convention first.
pub fn default_rules() -> Vec<Box<dyn FormatRule>> {
    vec![
        Box::new(BookReviewColon),
        Box::new(ReviewOf),
        Box::new(EmphasisMarkup),
        Box::new(WrittenBy),
        Box::new(EditedBy),
        Box::new(SentenceBy),
        Box::new(FrenchPar),
        Box::new(TitleCommaAuthor),
        Box::new(ReviewSuffix),
        Box::new(CommaBy),
        Box::new(ReviewColonAuthor),
        Box::new(Possessive),
        Box::new(EditorsPrefix),
        Box::new(Dash),
        Box::new(AuthorColon),
        Box::new(Quoted),
        Box::new(AuthorCommaTitle),
        Box::new(AuthorPeriodTitle),
        Box::new(TitleByAuthor),
        Box::new(PlainFallback),
    ]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_order() {
        let names: Vec<&str> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), 20);
        assert_eq!(names[0], "book_review_colon");
        assert_eq!(names[2], "emphasis_markup");
        assert_eq!(names[19], "plain_fallback");
    }

    #[test]
    fn test_context_author_validates_first_author() {
        let config = ParsingConfig::default();
        let ctx = RuleContext::new(&config);

        let split = ctx.author("John Broome and Derek Parfit").unwrap();
        assert_eq!(split.family, "Broome");
        assert!(split.multiple);

        let split = ctx.author(", Thomas Hurka (ed.), Oxford University Press").unwrap();
        assert_eq!(split.display(), "Thomas Hurka");
        assert!(split.edited);

        assert!(ctx.author("Environmental Ethics").is_none());
        assert!(ctx.author(". Oxford University Press, 2010").is_none());
        assert!(ctx.author("").is_none());
    }

    #[test]
    fn test_context_authored_or_lookup() {
        let config = ParsingConfig::default();
        let ctx = RuleContext::new(&config);

        let r = ctx.authored_or_lookup(
            "Animal Liberation.",
            "Peter Singer",
            MatchedFormat::TitleCommaByAuthor,
            MatchedFormat::TitleCommaByAuthor,
        );
        assert_eq!(r.author_family, "Singer");
        assert_eq!(r.book_title, "Animal Liberation");

        let r = ctx.authored_or_lookup(
            "Animal Liberation",
            "the animal rights movement",
            MatchedFormat::TitleCommaByAuthor,
            MatchedFormat::TitleCommaByAuthor,
        );
        assert!(r.needs_external_lookup);
        assert!(r.author_family.is_empty());
    }
}
