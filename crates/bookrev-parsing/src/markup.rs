//! Inline markup helpers. Citation titles carry `<i>`, `<em>`, `<b>` and
//! `<strong>` spans; every emphasis variant is treated as italic.

use once_cell::sync::Lazy;
use regex::Regex;

static EMPHASIS_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<\s*(/?)\s*(?:i|em|b|strong)(?:\s[^>]*)?>").unwrap()
});

/// Rewrite every emphasis tag (`em`, `b`, `strong`, any case) to `<i>`/`</i>`.
pub fn normalize_emphasis(text: &str) -> String {
    EMPHASIS_TAG_RE.replace_all(text, "<${1}i>").into_owned()
}

/// True if `text` contains any emphasis tag.
pub fn has_emphasis(text: &str) -> bool {
    EMPHASIS_TAG_RE.is_match(text)
}

/// Remove all tags, decode common entities, collapse whitespace.
pub fn strip_tags(text: &str) -> String {
    static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
    let stripped = TAG_RE.replace_all(text, "");
    let decoded = stripped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first `<i>…</i>` span of emphasis-normalized text, with its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisSpan<'a> {
    pub before: &'a str,
    pub inner: &'a str,
    pub after: &'a str,
}

/// Locate the first italic span. Expects [`normalize_emphasis`] to have run.
pub fn first_emphasis(text: &str) -> Option<EmphasisSpan<'_>> {
    static SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<i>(.*?)</i>").unwrap());
    let caps = SPAN_RE.captures(text)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1)?;
    Some(EmphasisSpan {
        before: &text[..whole.start()],
        inner: inner.as_str(),
        after: &text[whole.end()..],
    })
}

/// Inner text of every italic span, tags stripped.
pub fn emphasis_texts(text: &str) -> Vec<String> {
    static SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<i>(.*?)</i>").unwrap());
    let normalized = normalize_emphasis(text);
    SPAN_RE
        .captures_iter(&normalized)
        .filter_map(|c| c.get(1))
        .map(|m| strip_tags(m.as_str()))
        .collect()
}
