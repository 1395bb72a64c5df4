use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormatRule, RuleContext, TitleView};
use crate::markup::{first_emphasis, strip_tags};

/// The italic span is the book title; the author is looked for around it.
pub struct EmphasisMarkup;

impl FormatRule for EmphasisMarkup {
    fn name(&self) -> &'static str {
        "emphasis_markup"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static EDITED_BY_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^\s*[,.:;]?\s*(?:[Ee]dited|[Ee]d\.)\s+(?:and\s+\w+\s+)?by\s+(.+)$").unwrap()
        });
        static BY_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*[,.:;]?\s*(?:[Ww]ritten\s+)?[Bb]y\s+(.+)$").unwrap());
        static BARE_AFTER_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^\s*[,.:;-]\s*(\p{Lu}.*)$").unwrap());
        static REVIEW_OF_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)^(?:a\s+)?(?:review\s+of|symposium\s+on)\s+(.+?)'s?\s*$").unwrap()
        });
        static POSSESSIVE_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'s?\s*$").unwrap());

        let span = first_emphasis(view.body)?;
        let inner = strip_tags(span.inner);
        let before = strip_tags(span.before);
        let after = strip_tags(span.after);

        // <b>Author</b>: Title
        if before.is_empty()
            && inner.split_whitespace().count() >= 2
            && let Some(title) = after.strip_prefix(':')
            && !title.trim().is_empty()
            && let Some(author) = ctx.author(&inner)
        {
            return Some(ctx.authored(title, author, MatchedFormat::ItalicAuthorColonTitle));
        }

        if let Some(c) = EDITED_BY_RE.captures(&after) {
            let result = ctx.authored_or_lookup(
                &inner,
                &c[1],
                MatchedFormat::ItalicThenAuthor,
                MatchedFormat::ItalicTitleOnly,
            );
            return Some(result.edited(true));
        }

        if let Some(c) = BY_RE.captures(&after) {
            return Some(ctx.authored_or_lookup(
                &inner,
                &c[1],
                MatchedFormat::ItalicThenAuthor,
                MatchedFormat::ItalicTitleOnly,
            ));
        }

        if let Some(c) = BARE_AFTER_RE.captures(&after)
            && let Some(author) = ctx.author(&c[1])
        {
            return Some(ctx.authored(&inner, author, MatchedFormat::ItalicThenAuthor));
        }

        let prefix = before.trim().trim_end_matches([',', '.', ':', ';', '-', ' ']);
        if !prefix.is_empty() {
            let author_span = match REVIEW_OF_RE.captures(prefix) {
                Some(c) => c[1].to_string(),
                None => POSSESSIVE_TAIL_RE.replace(prefix, "").into_owned(),
            };
            if let Some(author) = ctx.author(&author_span) {
                return Some(ctx.authored(&inner, author, MatchedFormat::ItalicTags));
            }
        }

        Some(ctx.title_only(&inner, MatchedFormat::ItalicTitleOnly))
    }
}
