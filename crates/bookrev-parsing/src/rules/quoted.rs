use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormatRule, RuleContext, TitleView};

/// `Author, "Title"` followed by anything.
pub struct Quoted;

impl FormatRule for Quoted {
    fn name(&self) -> &'static str {
        "quoted"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^([^"]+?),\s*"([^"]+)""#).unwrap());
        let c = RE.captures(view.plain)?;
        let author = ctx.author(&c[1])?;
        Some(ctx.authored(&c[2], author, MatchedFormat::QuotedTitle))
    }
}

/// True when the possessive is part of a main title ("Hume's Problem: Induction and ...").
pub(crate) fn possessive_heads_title(rest: &str) -> bool {
    rest.split_whitespace()
        .next()
        .is_some_and(|word| word.ends_with(':'))
}

/// "Author's Title".
pub struct Possessive;

impl FormatRule for Possessive {
    fn name(&self) -> &'static str {
        "possessive"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^(\p{Lu}[\w.\-]*(?:\s+\p{Lu}[\w.\-]*){0,4})'s?\s+(\S.*)$").unwrap()
        });
        let c = RE.captures(view.plain)?;
        if possessive_heads_title(&c[2]) {
            return None;
        }
        let author = ctx.author(&c[1])?;
        Some(ctx.authored(&c[2], author, MatchedFormat::PossessiveAuthorTitle))
    }
}
