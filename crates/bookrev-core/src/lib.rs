use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config_file;
pub mod lookup;
pub mod matching;

// Re-export for convenience
pub use lookup::{LookupError, WorksLookup};
pub use matching::{best_match, title_match_score};

/// How much evidence a venue needs before an item counts as a book review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Any tier of inclusion evidence is accepted.
    #[default]
    Lenient,
    /// Only emphasis spans and explicit review markers are accepted.
    ItalicOnly,
}

impl Strictness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Lenient => "lenient",
            Strictness::ItalicOnly => "italic_only",
        }
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown strictness '{0}' (expected 'lenient' or 'italic_only')")]
pub struct ParseStrictnessError(String);

impl FromStr for Strictness {
    type Err = ParseStrictnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "lenient" | "all" => Ok(Strictness::Lenient),
            "italic_only" | "italic" => Ok(Strictness::ItalicOnly),
            _ => Err(ParseStrictnessError(s.to_string())),
        }
    }
}

/// A personal name split into given and family parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    #[serde(default)]
    pub given: String,
    #[serde(default)]
    pub family: String,
}

impl Reviewer {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            family: family.into(),
        }
    }

    /// "Given Family", or just the family name when no given name is known.
    pub fn display_name(&self) -> String {
        join_name(&self.given, &self.family)
    }
}

fn join_name(given: &str, family: &str) -> String {
    match (given.trim(), family.trim()) {
        ("", f) => f.to_string(),
        (g, "") => g.to_string(),
        (g, f) => format!("{g} {f}"),
    }
}

/// A citation as handed over by the metadata collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationItem {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub strictness: Strictness,
    /// Declared author of the article itself (the reviewer).
    #[serde(default)]
    pub reviewer: Option<Reviewer>,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    /// Title of the same item as reported by a secondary metadata source.
    #[serde(default)]
    pub alternate_title: Option<String>,
}

impl CitationItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Year component of `published`, if it starts with four digits.
    pub fn publication_year(&self) -> Option<i32> {
        let published = self.published.as_deref()?.trim();
        let year = published.get(..4)?;
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        year.parse().ok()
    }
}

/// Which format rule produced a [`ParseResult`]. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedFormat {
    BookReviewColon,
    BookReviewColonTitleOnly,
    ReviewOfBy,
    ReviewOfPossessive,
    ReviewOfTitleOnly,
    ItalicAuthorColonTitle,
    ItalicThenAuthor,
    ItalicTags,
    ItalicTitleOnly,
    TitleWrittenByAuthor,
    TitleEditedByAuthor,
    TitleEditedByMid,
    TitleByAuthorSentence,
    TitleParAuthor,
    TitleCommaAuthor,
    TitleByAuthorReview,
    TitleReviewSuffix,
    TitleCommaByAuthor,
    ReviewColonAuthorTitle,
    PossessiveAuthorTitle,
    EditorsAuthorTitle,
    TitleDashAuthor,
    AuthorColonTitle,
    QuotedTitle,
    AuthorCommaTitle,
    AuthorPeriodTitle,
    TitleByAuthor,
    Fallback,
    AlternateTitle,
}

impl MatchedFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedFormat::BookReviewColon => "book_review_colon",
            MatchedFormat::BookReviewColonTitleOnly => "book_review_colon_title_only",
            MatchedFormat::ReviewOfBy => "review_of_by",
            MatchedFormat::ReviewOfPossessive => "review_of_possessive",
            MatchedFormat::ReviewOfTitleOnly => "review_of_title_only",
            MatchedFormat::ItalicAuthorColonTitle => "italic_author_colon_title",
            MatchedFormat::ItalicThenAuthor => "italic_then_author",
            MatchedFormat::ItalicTags => "italic_tags",
            MatchedFormat::ItalicTitleOnly => "italic_title_only",
            MatchedFormat::TitleWrittenByAuthor => "title_written_by_author",
            MatchedFormat::TitleEditedByAuthor => "title_edited_by_author",
            MatchedFormat::TitleEditedByMid => "title_edited_by_mid",
            MatchedFormat::TitleByAuthorSentence => "title_by_author_sentence",
            MatchedFormat::TitleParAuthor => "title_par_author",
            MatchedFormat::TitleCommaAuthor => "title_comma_author",
            MatchedFormat::TitleByAuthorReview => "title_by_author_review",
            MatchedFormat::TitleReviewSuffix => "title_review_suffix",
            MatchedFormat::TitleCommaByAuthor => "title_comma_by_author",
            MatchedFormat::ReviewColonAuthorTitle => "review_colon_author_title",
            MatchedFormat::PossessiveAuthorTitle => "possessive_author_title",
            MatchedFormat::EditorsAuthorTitle => "editors_author_title",
            MatchedFormat::TitleDashAuthor => "title_dash_author",
            MatchedFormat::AuthorColonTitle => "author_colon_title",
            MatchedFormat::QuotedTitle => "quoted_title",
            MatchedFormat::AuthorCommaTitle => "author_comma_title",
            MatchedFormat::AuthorPeriodTitle => "author_period_title",
            MatchedFormat::TitleByAuthor => "title_by_author",
            MatchedFormat::Fallback => "fallback",
            MatchedFormat::AlternateTitle => "alternate_title",
        }
    }
}

impl fmt::Display for MatchedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the format extractor recovered from one citation title.
///
/// `needs_external_lookup` is only ever set when no family name was found;
/// the constructors enforce that. Values are never mutated after creation;
/// [`with_author`](Self::with_author) returns a merged copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub book_title: String,
    pub author_given: String,
    pub author_family: String,
    pub is_edited_volume: bool,
    pub has_multiple_authors: bool,
    pub needs_external_lookup: bool,
    pub matched_format: MatchedFormat,
}

impl ParseResult {
    /// A parse that recovered an author span. Falls back to a title-only
    /// parse when `family` is empty.
    pub fn authored(
        book_title: impl Into<String>,
        given: impl Into<String>,
        family: impl Into<String>,
        format: MatchedFormat,
    ) -> Self {
        let family = family.into();
        let needs_external_lookup = family.trim().is_empty();
        Self {
            book_title: book_title.into(),
            author_given: if needs_external_lookup {
                String::new()
            } else {
                given.into()
            },
            author_family: family,
            is_edited_volume: false,
            has_multiple_authors: false,
            needs_external_lookup,
            matched_format: format,
        }
    }

    /// A parse that found the book title but no usable author.
    pub fn title_only(book_title: impl Into<String>, format: MatchedFormat) -> Self {
        Self {
            book_title: book_title.into(),
            author_given: String::new(),
            author_family: String::new(),
            is_edited_volume: false,
            has_multiple_authors: false,
            needs_external_lookup: true,
            matched_format: format,
        }
    }

    pub fn edited(mut self, edited: bool) -> Self {
        self.is_edited_volume = self.is_edited_volume || edited;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.has_multiple_authors = self.has_multiple_authors || multiple;
        self
    }

    pub fn has_author(&self) -> bool {
        !self.author_family.is_empty()
    }

    pub fn author_display(&self) -> String {
        join_name(&self.author_given, &self.author_family)
    }

    /// A new result carrying an author recovered elsewhere.
    pub fn with_author(&self, given: impl Into<String>, family: impl Into<String>) -> Self {
        let family = family.into();
        if family.trim().is_empty() {
            return self.clone();
        }
        Self {
            author_given: given.into(),
            author_family: family,
            needs_external_lookup: false,
            ..self.clone()
        }
    }

    /// True when the recovered book author is the reviewer themself.
    pub fn is_self_authored(&self, reviewer: &Reviewer) -> bool {
        if self.author_family.is_empty() || reviewer.family.trim().is_empty() {
            return false;
        }
        self.author_given.trim().eq_ignore_ascii_case(reviewer.given.trim())
            && self
                .author_family
                .trim()
                .eq_ignore_ascii_case(reviewer.family.trim())
    }
}

/// A work returned by the lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCandidate {
    pub title: String,
    #[serde(default, alias = "author")]
    pub author_display_name: String,
    #[serde(default, alias = "year")]
    pub publication_year: Option<i32>,
}

impl WorkCandidate {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            author_display_name: author.into(),
            publication_year: year,
        }
    }
}

/// Where the book author in a [`ReviewRecord`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorSource {
    Citation,
    Lookup,
    Missing,
}

/// Final per-item output of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_title: String,
    pub venue: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<Reviewer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(flatten)]
    pub parse: ParseResult,
    pub author_source: AuthorSource,
}

impl ReviewRecord {
    pub fn new(item: &CitationItem, parse: ParseResult, author_source: AuthorSource) -> Self {
        Self {
            review_title: item.title.clone(),
            venue: item.venue.clone(),
            doi: item.doi.clone(),
            reviewer: item.reviewer.clone(),
            published: item.published.clone(),
            parse,
            author_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authored_without_family_needs_lookup() {
        let r = ParseResult::authored("Plato", "John", "", MatchedFormat::ItalicTags);
        assert!(r.needs_external_lookup);
        assert!(r.author_given.is_empty());
        assert!(!r.has_author());
    }

    #[test]
    fn test_with_author_returns_new_value() {
        let original = ParseResult::title_only("Plato", MatchedFormat::ItalicTitleOnly);
        let merged = original.with_author("Julia", "Annas");
        assert!(original.needs_external_lookup);
        assert!(!merged.needs_external_lookup);
        assert_eq!(merged.author_display(), "Julia Annas");
        assert_eq!(merged.matched_format, MatchedFormat::ItalicTitleOnly);
    }

    #[test]
    fn test_with_empty_author_keeps_lookup_flag() {
        let original = ParseResult::title_only("Plato", MatchedFormat::ItalicTitleOnly);
        assert_eq!(original.with_author("", "  "), original);
    }

    #[test]
    fn test_self_authored_case_insensitive() {
        let r = ParseResult::authored("Essays", "John", "Broome", MatchedFormat::ReviewOfBy);
        assert!(r.is_self_authored(&Reviewer::new("john", "BROOME")));
        assert!(!r.is_self_authored(&Reviewer::new("Jane", "Broome")));
        assert!(!r.is_self_authored(&Reviewer::default()));
    }

    #[test]
    fn test_publication_year() {
        let mut item = CitationItem::new("x");
        assert_eq!(item.publication_year(), None);
        item.published = Some("2014-03-01".into());
        assert_eq!(item.publication_year(), Some(2014));
        item.published = Some("20xx".into());
        assert_eq!(item.publication_year(), None);
    }

    #[test]
    fn test_strictness_from_str() {
        assert_eq!("lenient".parse::<Strictness>().unwrap(), Strictness::Lenient);
        assert_eq!("italic-only".parse::<Strictness>().unwrap(), Strictness::ItalicOnly);
        assert_eq!("all".parse::<Strictness>().unwrap(), Strictness::Lenient);
        assert!("strict".parse::<Strictness>().is_err());
    }

    #[test]
    fn test_record_flattens_parse() {
        let item = CitationItem {
            title: "<i>Plato</i>".into(),
            venue: "Mind".into(),
            ..Default::default()
        };
        let parse = ParseResult::authored("Plato", "Julia", "Annas", MatchedFormat::ItalicTags);
        let record = ReviewRecord::new(&item, parse, AuthorSource::Citation);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["book_title"], "Plato");
        assert_eq!(json["author_family"], "Annas");
        assert_eq!(json["matched_format"], "italic_tags");
        assert_eq!(json["author_source"], "citation");
        assert!(json.get("doi").is_none());
    }

    #[test]
    fn test_work_candidate_aliases() {
        let w: WorkCandidate =
            serde_json::from_str(r#"{"title":"Plato","author":"Julia Annas","year":1981}"#)
                .unwrap();
        assert_eq!(w.author_display_name, "Julia Annas");
        assert_eq!(w.publication_year, Some(1981));
    }
}
