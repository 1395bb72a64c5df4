use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormatRule, RuleContext, TitleView};
use crate::names::{is_initial_before, split_leading_name};

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Text up to the first `. ` that does not close an initial.
fn first_sentence(text: &str) -> &str {
    static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").unwrap());
    BOUNDARY_RE
        .find_iter(text)
        .find(|m| !is_initial_before(text, m.start()))
        .map_or(text, |m| &text[..m.start()])
}

/// "Title, Author Name. Publisher, Year, pages."
///
/// The sentence after the author must carry imprint evidence; otherwise a
/// comma inside the title, or the comma of "Last, First. Title. Imprint",
/// would be taken for the author boundary.
pub struct TitleCommaAuthor;

impl FormatRule for TitleCommaAuthor {
    fn name(&self) -> &'static str {
        "title_comma_author"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static IMPRINT_HINT_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(?:1[5-9]|20)\d{2}\b|\bpp\b|\bpages\b|[Pp]ress\b|[Pp]ublish|ISBN|[$£€]\s?\d|\b\p{Lu}[a-z]+\s*:")
                .unwrap()
        });
        static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").unwrap());

        let text = view.plain;
        for (comma, _) in text.match_indices(", ") {
            let rest = &text[comma + 2..];
            if !rest.chars().next().is_some_and(char::is_uppercase) {
                continue;
            }
            let Some(dot) = BOUNDARY_RE
                .find_iter(rest)
                .find(|m| !is_initial_before(rest, m.start()))
            else {
                continue;
            };
            let author_span = &rest[..dot.start()];
            let imprint = &rest[dot.end()..];
            if author_span.contains(',') || !IMPRINT_HINT_RE.is_match(first_sentence(imprint)) {
                continue;
            }
            if let Some(author) = ctx.author(author_span) {
                return Some(ctx.authored(&text[..comma], author, MatchedFormat::TitleCommaAuthor));
            }
        }
        None
    }
}

/// "Review: Author: Title".
pub struct ReviewColonAuthor;

impl FormatRule for ReviewColonAuthor {
    fn name(&self) -> &'static str {
        "review_colon_author"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)^review\s*:\s*([^:]+?)\s*:\s*(.+)$").unwrap());
        let c = RE.captures(view.plain)?;
        let author = ctx.author(&c[1])?;
        Some(ctx.authored(&c[2], author, MatchedFormat::ReviewColonAuthorTitle))
    }
}

/// "Author, eds. Title" and "Author (ed.), Title".
pub struct EditorsPrefix;

impl FormatRule for EditorsPrefix {
    fn name(&self) -> &'static str {
        "editors_prefix"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(.+?)(?:,\s*(?:[Ee]ds?\.?|[Ee]ditors?)|\s*\([Ee]ds?\.?\))\s*[.,:]?\s+(\p{Lu}.+)$",
            )
            .unwrap()
        });
        let c = RE.captures(view.plain)?;
        let author = ctx.author(&c[1])?;
        Some(
            ctx.authored(&c[2], author, MatchedFormat::EditorsAuthorTitle)
                .edited(true),
        )
    }
}

/// "Title - Author". The title side must be free of quote characters.
pub struct Dash;

impl FormatRule for Dash {
    fn name(&self) -> &'static str {
        "dash"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        let text = view.plain;
        let (dash, _) = text.rmatch_indices(" - ").next()?;
        let title = &text[..dash];
        if title.contains('"') {
            return None;
        }
        let author = ctx.author(&text[dash + 3..])?;
        Some(ctx.authored(title, author, MatchedFormat::TitleDashAuthor))
    }
}

/// "Author: Title", when the left side is a 2–6 word name within one sentence.
pub struct AuthorColon;

impl FormatRule for AuthorColon {
    fn name(&self) -> &'static str {
        "author_colon"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        let (left, right) = view.plain.split_once(':')?;
        let left = left.trim();
        if first_sentence(left).len() < left.len() {
            return None;
        }
        if !(2..=6).contains(&word_count(left)) || !ctx.looks_like_name(left) {
            return None;
        }
        let author = ctx.author(left)?;
        Some(ctx.authored(right, author, MatchedFormat::AuthorColonTitle))
    }
}

/// "Author, Title" (title at least 15 characters), trying "Last, First, Title" first.
pub struct AuthorCommaTitle;

impl FormatRule for AuthorCommaTitle {
    fn name(&self) -> &'static str {
        "author_comma_title"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static LAST_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(\p{Lu}[\p{L}'\-]+),\s+(\p{Lu}[\p{L}.'\-]*(?:\s+\p{Lu}[\p{L}.'\-]*){0,2}),\s+(.+)$")
                .unwrap()
        });
        static FIRST_LAST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^,]+),\s+(.+)$").unwrap());

        let min_chars = 15;
        if let Some(c) = LAST_FIRST_RE.captures(view.plain)
            && let Some(author) = ctx.author(&format!("{}, {}", &c[1], &c[2]))
        {
            let result = ctx.authored(&c[3], author, MatchedFormat::AuthorCommaTitle);
            if result.book_title.chars().count() >= min_chars {
                return Some(result);
            }
        }

        let c = FIRST_LAST_RE.captures(view.plain)?;
        if word_count(&c[1]) < 2 {
            return None;
        }
        let author = ctx.author(&c[1])?;
        let result = ctx.authored(&c[2], author, MatchedFormat::AuthorCommaTitle);
        (result.book_title.chars().count() >= min_chars).then_some(result)
    }
}

/// "Author. Title" (author 2–6 words, surname at least 3 letters).
pub struct AuthorPeriodTitle;

impl FormatRule for AuthorPeriodTitle {
    fn name(&self) -> &'static str {
        "author_period_title"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        let (author_span, title) = split_leading_name(view.plain, ctx.config())?;
        let author = ctx.author(author_span)?;
        Some(ctx.authored(title, author, MatchedFormat::AuthorPeriodTitle))
    }
}
