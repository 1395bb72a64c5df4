//! Parsing of alternate titles supplied by a secondary metadata source.
//!
//! Alternate titles follow fewer conventions than primary ones, so only a
//! short list of shapes is tried, in order:
//! 1. "Title, by Author"
//! 2. "Book Review. Title First Last" (2–3 trailing name words)
//! 3. "Title. Author"
//! 4. "Title - Author"

use bookrev_core::{MatchedFormat, ParseResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DEFAULT_CONFIG, ParsingConfig};
use crate::extractor::{accept, is_placeholder};
use crate::markup::strip_tags;
use crate::names::split_trailing_name;
use crate::rules::RuleContext;
use crate::text_processing::normalize;

/// Parse an alternate title with the built-in vocabulary.
pub fn parse_alternate_title(alternate: &str) -> Option<ParseResult> {
    parse_alternate_title_with_config(alternate, &DEFAULT_CONFIG)
}

/// Config-aware version of [`parse_alternate_title`].
pub fn parse_alternate_title_with_config(
    alternate: &str,
    config: &ParsingConfig,
) -> Option<ParseResult> {
    let plain = strip_tags(&normalize(alternate));
    if is_placeholder(&plain) {
        return None;
    }
    let ctx = RuleContext::new(config);

    let candidates = [
        comma_by(&plain, &ctx),
        book_review_trailing_name(&plain, &ctx),
        split_trailing_name(&plain, config)
            .and_then(|(title, author)| Some((title, ctx.author(author)?)))
            .map(|(title, author)| ctx.authored(title, author, MatchedFormat::AlternateTitle)),
        dash(&plain, &ctx),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| accept(candidate, config))
}

fn comma_by(plain: &str, ctx: &RuleContext<'_>) -> Option<ParseResult> {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+),\s+[Bb]y\s+(.+)$").unwrap());
    let c = RE.captures(plain)?;
    let author = ctx.author(&c[2])?;
    Some(ctx.authored(&c[1], author, MatchedFormat::AlternateTitle))
}

/// "Book Review. Beast and Man Mary Midgley": the name is the last two
/// words, or three when the middle one is an initial.
fn book_review_trailing_name(plain: &str, ctx: &RuleContext<'_>) -> Option<ParseResult> {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)^book\s+reviews?\s*[.:]\s*(.+)$").unwrap());
    static INITIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Lu}\.$").unwrap());

    let c = RE.captures(plain)?;
    let words: Vec<&str> = c.get(1)?.as_str().split_whitespace().collect();
    let name_len = match words.as_slice() {
        [.., _, middle, _] if INITIAL_RE.is_match(middle) => 3,
        _ => 2,
    };
    if words.len() <= name_len {
        return None;
    }
    let (title, name) = words.split_at(words.len() - name_len);
    if !name
        .iter()
        .all(|w| w.chars().next().is_some_and(char::is_uppercase))
    {
        return None;
    }
    let author = ctx.author(&name.join(" "))?;
    Some(ctx.authored(&title.join(" "), author, MatchedFormat::AlternateTitle))
}

fn dash(plain: &str, ctx: &RuleContext<'_>) -> Option<ParseResult> {
    let (title, author) = plain.rsplit_once(" - ")?;
    let author = ctx.author(author)?;
    Some(ctx.authored(title, author, MatchedFormat::AlternateTitle))
}
