use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{FormatRule, RuleContext, TitleView};

/// First `Last, First. Title.` shape anywhere in the plain text. Low confidence.
pub struct PlainFallback;

impl FormatRule for PlainFallback {
    fn name(&self) -> &'static str {
        "plain_fallback"
    }

    fn try_match(&self, view: &TitleView<'_>, ctx: &RuleContext<'_>) -> Option<ParseResult> {
        static RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\b(\p{Lu}[\p{L}'\-]+),\s+(\p{Lu}[\p{L}'\-]+(?:\s+\p{Lu}[\p{L}'\-]+)?)\.\s+(\p{Lu}[^.]+)")
                .unwrap()
        });
        let c = RE.captures(view.plain)?;
        let author = ctx.author(&format!("{}, {}", &c[1], &c[2]))?;
        Some(ctx.authored(&c[3], author, MatchedFormat::Fallback))
    }
}
