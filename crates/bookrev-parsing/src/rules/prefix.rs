use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::quoted::possessive_heads_title;
use super::{FormatRule, RuleContext, TitleView};
use crate::markup::{has_emphasis, strip_tags};
use crate::names::split_trailing_name;

/// Signs that the remainder follows a more specific convention than a bare title.
fn has_inner_structure(rest: &str, ctx: &RuleContext<'_>) -> bool {
    static STRUCTURE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"\bby\s+\p{Lu}|\s-\s|"|\([Rr]eview\)"#).unwrap());
    if STRUCTURE_RE.is_match(rest) {
        return true;
    }
    // "Mary Midgley: Beast and Man"
    rest.split_once(':')
        .is_some_and(|(left, _)| ctx.author(left).is_some())
}

/// "Book Review: Title. Author", else "Book Review: Title" (title only).
pub struct BookReviewColon;

impl FormatRule for BookReviewColon {
    fn name(&self) -> &'static str {
        "book_review_colon"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(?i)^\s*book\s+reviews?\s*[:.\-]\s*(.+)$").unwrap());

        let caps = RE.captures(view.full)?;
        let rest = caps.get(1)?.as_str();
        if has_emphasis(rest) {
            return None;
        }
        let rest = strip_tags(rest);

        if let Some((title, author_span)) = split_trailing_name(&rest, ctx.config())
            && let Some(author) = ctx.author(author_span)
        {
            return Some(ctx.authored(title, author, MatchedFormat::BookReviewColon));
        }
        if has_inner_structure(&rest, ctx) {
            return None;
        }
        Some(ctx.title_only(&rest, MatchedFormat::BookReviewColonTitleOnly))
    }
}

/// "Review of Title, by Author", "Review of Author's Title",
/// "Review Essay: Title", else title only.
pub struct ReviewOf;

impl FormatRule for ReviewOf {
    fn name(&self) -> &'static str {
        "review_of"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)^\s*(?:a\s+)?review\s+(?:of|essay\s*:|essay\s+on)\s*(.+)$").unwrap()
        });
        static COMMA_BY_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(.+),\s+(?:[Bb]y|[Ee]dited\s+by)\s+(.+)$").unwrap());
        static BARE_BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+by\s+").unwrap());
        static POSSESSIVE_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(\p{Lu}[\w.\-]*(?:\s+\p{Lu}[\w.\-]*){0,4})'s?\s+(.+)$").unwrap()
        });

        if has_emphasis(view.full) {
            return None;
        }
        let caps = RE.captures(view.full_plain)?;
        let rest = caps.get(1)?.as_str().trim();

        if let Some(c) = COMMA_BY_RE.captures(rest) {
            return Some(ctx.authored_or_lookup(
                &c[1],
                &c[2],
                MatchedFormat::ReviewOfBy,
                MatchedFormat::ReviewOfTitleOnly,
            ));
        }

        // Without a comma, "by" may belong to the title ("Killing by Remote Control").
        for m in BARE_BY_RE.find_iter(rest) {
            if let Some(author) = ctx.author(&rest[m.end()..]) {
                return Some(ctx.authored(&rest[..m.start()], author, MatchedFormat::ReviewOfBy));
            }
        }

        if let Some(c) = POSSESSIVE_RE.captures(rest)
            && !possessive_heads_title(&c[2])
            && let Some(author) = ctx.author(&c[1])
        {
            return Some(ctx.authored(&c[2], author, MatchedFormat::ReviewOfPossessive));
        }

        Some(ctx.title_only(rest, MatchedFormat::ReviewOfTitleOnly))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{parts, run};

    #[test]
    fn test_book_review_colon_with_author() {
        let r = run(&BookReviewColon, "Book Review: Beast and Man. Mary Midgley").unwrap();
        assert_eq!(parts(&r), ("Beast and Man", "Mary", "Midgley", false));
        assert_eq!(r.matched_format, MatchedFormat::BookReviewColon);
    }

    #[test]
    fn test_book_review_colon_title_only() {
        let r = run(&BookReviewColon, "Book Review: Beast and Man").unwrap();
        assert_eq!(parts(&r), ("Beast and Man", "", "", true));
        assert_eq!(r.matched_format, MatchedFormat::BookReviewColonTitleOnly);
    }

    #[test]
    fn test_book_review_colon_defers() {
        assert!(run(&BookReviewColon, "Book Review: <i>Beast and Man</i>").is_none());
        assert!(run(&BookReviewColon, "Book Reviews: Animal Liberation, by Peter Singer").is_none());
        assert!(run(&BookReviewColon, "Book Review: Mary Midgley: Beast and Man").is_none());
        assert!(run(&BookReviewColon, "Beast and Man").is_none());
    }

    #[test]
    fn test_review_of_comma_by() {
        let r = run(
            &ReviewOf,
            "Review of Climate Matters: Ethics in a Warming World, by John Broome",
        )
        .unwrap();
        assert_eq!(
            parts(&r),
            ("Climate Matters: Ethics in a Warming World", "John", "Broome", false)
        );
    }

    #[test]
    fn test_review_of_by_unvalidated_author_needs_lookup() {
        let r = run(&ReviewOf, "Review of Animal Liberation, by the editors of this journal")
            .unwrap();
        assert_eq!(parts(&r), ("Animal Liberation", "", "", true));
    }

    #[test]
    fn test_review_of_bare_by() {
        let r = run(&ReviewOf, "Review of Beast and Man by Mary Midgley").unwrap();
        assert_eq!(parts(&r), ("Beast and Man", "Mary", "Midgley", false));
    }

    #[test]
    fn test_review_of_possessive() {
        let r = run(&ReviewOf, "Review of Rawls's A Theory of Justice").unwrap();
        assert_eq!(parts(&r), ("A Theory of Justice", "", "Rawls", false));
        assert_eq!(r.matched_format, MatchedFormat::ReviewOfPossessive);

        let r = run(
            &ReviewOf,
            "Review of Hume's Problem: Induction and the Justification of Belief",
        )
        .unwrap();
        assert_eq!(
            parts(&r),
            (
                "Hume's Problem: Induction and the Justification of Belief",
                "",
                "",
                true
            )
        );
    }

    #[test]
    fn test_review_essay_title_only() {
        let r = run(&ReviewOf, "Review Essay: The Moral Status of Animals").unwrap();
        assert_eq!(parts(&r), ("The Moral Status of Animals", "", "", true));
    }

    #[test]
    fn test_review_of_defers_on_markup() {
        assert!(run(&ReviewOf, "Review of <i>Beast and Man</i>").is_none());
    }
}
