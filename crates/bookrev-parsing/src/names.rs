//! Name plausibility: does a word span read as a personal name or as a
//! title fragment?

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DEFAULT_CONFIG, ParsingConfig};

/// Check whether `span` plausibly names a person, using the built-in vocabulary.
pub fn looks_like_name(span: &str) -> bool {
    looks_like_name_with_config(span, &DEFAULT_CONFIG)
}

/// Config-aware version of [`looks_like_name`].
///
/// A span qualifies only if:
/// - it has between 1 and `max_name_words` words
/// - fewer than half of its words are stopwords
/// - it contains no topic noun, unless it also has a single-letter initial
/// - its last word starts with an uppercase letter or an apostrophe
pub fn looks_like_name_with_config(span: &str, config: &ParsingConfig) -> bool {
    static INITIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Lu}\.$").unwrap());

    let words: Vec<&str> = span.split_whitespace().collect();
    if words.is_empty() || words.len() > config.max_name_words {
        return false;
    }

    let lowered: Vec<String> = words
        .iter()
        .map(|w| {
            w.trim_end_matches(['.', ',', ';', ':', '?', '!'])
                .to_lowercase()
        })
        .collect();

    let stop_count = lowered
        .iter()
        .filter(|w| config.stopwords.contains(w.as_str()))
        .count();
    if stop_count * 2 >= words.len() {
        return false;
    }

    let has_topic = lowered
        .iter()
        .any(|w| config.topic_nouns.contains(w.as_str()));
    let has_initial = words.iter().any(|w| INITIAL_RE.is_match(w));
    if has_topic && !has_initial {
        return false;
    }

    words
        .last()
        .and_then(|w| w.chars().next())
        .is_some_and(|c| c.is_uppercase() || c == '\'')
}

/// True when the token before a `.` is a lone capital (an initial like `J.`).
pub(crate) fn is_initial_before(text: &str, dot: usize) -> bool {
    let head = &text[..dot];
    let mut chars = head.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase(),
        (Some(c), Some(prev)) => c.is_uppercase() && !prev.is_alphanumeric(),
        _ => false,
    }
}

/// Byte offsets of every `. ` boundary (period followed by whitespace).
fn sentence_boundaries(text: &str) -> Vec<(usize, usize)> {
    static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s+").unwrap());
    BOUNDARY_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Split `Title. Author Name` at the rightmost period that is not part of an
/// initial and whose remainder looks like a name.
pub(crate) fn split_trailing_name<'a>(
    text: &'a str,
    config: &ParsingConfig,
) -> Option<(&'a str, &'a str)> {
    for (dot, rest_start) in sentence_boundaries(text).into_iter().rev() {
        if is_initial_before(text, dot) {
            continue;
        }
        let rest = text[rest_start..].trim().trim_end_matches('.');
        if rest.chars().next().is_some_and(char::is_uppercase)
            && looks_like_name_with_config(rest, config)
        {
            return Some((text[..dot].trim(), rest));
        }
    }
    None
}

/// Split `Author Name. Title` at the first period that closes a plausible
/// surname (at least three letters) and is followed by an uppercase word.
///
/// Only the first such boundary is considered; if the span before it is not
/// a 2–6 word name, there is no split.
pub(crate) fn split_leading_name<'a>(
    text: &'a str,
    config: &ParsingConfig,
) -> Option<(&'a str, &'a str)> {
    for (dot, rest_start) in sentence_boundaries(text) {
        let rest = text[rest_start..].trim();
        if !rest.chars().next().is_some_and(char::is_uppercase) {
            continue;
        }
        let author = text[..dot].trim();
        let last_word = author.split_whitespace().last().unwrap_or("");
        if last_word.trim_end_matches('.').chars().count() < 3 {
            continue;
        }
        let words = author.split_whitespace().count();
        if (2..=6).contains(&words) && looks_like_name_with_config(author, config) {
            return Some((author, rest));
        }
        return None;
    }
    None
}
