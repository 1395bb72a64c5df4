use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormatRule, RuleContext, TitleView};

/// Cut an unpunctuated imprint off an author span ("Jane Heal Oxford University Press").
///
/// The cut is skipped when it would leave a single word, so a surname that
/// doubles as a publisher ("Anne Norton") survives.
fn trim_bare_imprint<'s>(span: &'s str, ctx: &RuleContext<'_>) -> &'s str {
    if let Some(m) = ctx.config().imprint().bare_imprint.find(span)
        && m.start() > 0
    {
        let head = span[..m.start()].trim_end();
        if head.split_whitespace().count() >= 2 {
            return head;
        }
    }
    span
}

/// First " by " whose right-hand side validates as an author.
fn split_at_valid_by<'s>(
    text: &'s str,
    ctx: &RuleContext<'_>,
) -> Option<(&'s str, crate::authors::NameSplit)> {
    static BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+by\s+").unwrap());
    BY_RE.find_iter(text).find_map(|m| {
        let right = &text[m.end()..];
        if !right.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }
        ctx.author(right).map(|author| (&text[..m.start()], author))
    })
}

/// "Title, written by Author".
pub struct WrittenBy;

impl FormatRule for WrittenBy {
    fn name(&self) -> &'static str {
        "written_by"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)^(.+?),?\s+written\s+by\s+(.+)$").unwrap());
        let c = RE.captures(view.plain)?;
        Some(ctx.authored_or_lookup(
            &c[1],
            &c[2],
            MatchedFormat::TitleWrittenByAuthor,
            MatchedFormat::TitleWrittenByAuthor,
        ))
    }
}

/// "Title, edited by Author" and "Title Edited by Author Publisher, Year".
pub struct EditedBy;

impl FormatRule for EditedBy {
    fn name(&self) -> &'static str {
        "edited_by"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static COMMA_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)^(.+?),\s*(?:edited|ed\.)\s+(?:and\s+\w+\s+)?by\s+(.+)$").unwrap()
        });
        static MID_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(.+?)\s+[Ee]dited\s+by\s+(.+)$").unwrap());

        let (c, format) = match COMMA_RE.captures(view.plain) {
            Some(c) => (c, MatchedFormat::TitleEditedByAuthor),
            None => (MID_RE.captures(view.plain)?, MatchedFormat::TitleEditedByMid),
        };
        let author_span = trim_bare_imprint(c.get(2)?.as_str(), ctx);
        Some(ctx.authored_or_lookup(&c[1], author_span, format, format).edited(true))
    }
}

/// "Title. By Author. (Publisher, Year)".
pub struct SentenceBy;

impl FormatRule for SentenceBy {
    fn name(&self) -> &'static str {
        "sentence_by"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\.\s+[Bb]y\s+(.+)$").unwrap());
        let c = RE.captures(view.plain)?;
        Some(ctx.authored_or_lookup(
            &c[1],
            &c[2],
            MatchedFormat::TitleByAuthorSentence,
            MatchedFormat::TitleByAuthorSentence,
        ))
    }
}

/// "Titre. Par Auteur."
pub struct FrenchPar;

impl FormatRule for FrenchPar {
    fn name(&self) -> &'static str {
        "french_par"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\.\s+[Pp]ar\s+(.+)$").unwrap());
        let c = RE.captures(view.plain)?;
        Some(ctx.authored_or_lookup(
            &c[1],
            &c[2],
            MatchedFormat::TitleParAuthor,
            MatchedFormat::TitleParAuthor,
        ))
    }
}

/// "Title by Author (review)", else "Title (review)" title only.
pub struct ReviewSuffix;

impl FormatRule for ReviewSuffix {
    fn name(&self) -> &'static str {
        "review_suffix"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(.+?)\s*\(review\)\s*$").unwrap());

        let c = RE.captures(view.plain)?;
        let head = c.get(1)?.as_str();
        if let Some((title, author)) = split_at_valid_by(head, ctx) {
            return Some(ctx.authored(title, author, MatchedFormat::TitleByAuthorReview));
        }
        Some(ctx.title_only(head, MatchedFormat::TitleReviewSuffix))
    }
}

/// "Title, by Author", optionally after "A Review of".
pub struct CommaBy;

impl FormatRule for CommaBy {
    fn name(&self) -> &'static str {
        "comma_by"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(?:(?i:a\s+review\s+of)\s+)?(.+),\s+[Bb]y\s+(.+)$").unwrap()
        });
        let c = RE.captures(view.plain)?;
        Some(ctx.authored_or_lookup(
            &c[1],
            &c[2],
            MatchedFormat::TitleCommaByAuthor,
            MatchedFormat::TitleCommaByAuthor,
        ))
    }
}

/// "Title by Author" with no punctuation around the byline.
///
/// "by" is common inside titles, so every occurrence is tried and the rule
/// declines unless one of them is followed by a valid name.
pub struct TitleByAuthor;

impl FormatRule for TitleByAuthor {
    fn name(&self) -> &'static str {
        "title_by_author"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        let (title, author) = split_at_valid_by(view.plain, ctx)?;
        Some(ctx.authored(title, author, MatchedFormat::TitleByAuthor))
    }
}
