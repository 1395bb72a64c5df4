use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Common surname prefixes (case-insensitive).
static SURNAME_PREFIXES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "van", "von", "de", "del", "della", "der", "den", "di", "da", "du", "al", "el", "la", "le",
        "ben", "ibn", "st", "st.", "ter", "ten",
    ]
    .into_iter()
    .collect()
});

/// Generational suffixes that stay attached to the family name.
static NAME_SUFFIXES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["jr", "sr", "ii", "iii", "iv"].into_iter().collect());

static AND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+(?:and|&)\s+").unwrap());

/// First author of a (possibly multi-author) name string, split into parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSplit {
    pub given: String,
    pub family: String,
    /// More than one author was listed; only the first is kept.
    pub multiple: bool,
    /// An editor marker ("ed.", "eds.", "editor", "edited by") was present.
    pub edited: bool,
}

impl NameSplit {
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
    }

    /// "Given Family" form, used for validation and comparisons.
    pub fn display(&self) -> String {
        if self.given.is_empty() {
            self.family.clone()
        } else {
            format!("{} {}", self.given, self.family)
        }
    }
}

/// True if `text` carries an editor marker.
pub fn has_editor_marker(text: &str) -> bool {
    static EDITOR_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\([Ee]ds?\.?\)|\b[Ee]dited\s+by\b|\b[Ee]ds?\.|\beds?\b|\b[Ee]ditors?\b|\b[Ee]d\s*\.?\s*by\b")
            .unwrap()
    });
    EDITOR_RE.is_match(text)
}

/// Remove editor/translator role markers and a leading "by".
pub fn strip_role_markers(text: &str) -> String {
    static ROLE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?x)
            ,?\s*\(\s*(?:[Ee]ds?|[Tt]rans|[Tt]rs?)\.?\s*\)     # (Ed.) (eds) (trans.)
            | ^\s*(?:[Ee]dited|[Tt]ranslated|[Ee]d\.|[Tt]rans\.)\s+(?:and\s+(?:[Ee]dited|[Tt]ranslated)\s+)?by\s+
            | ,?\s*\b(?:[Ee]dited|[Tt]ranslated)\s+by\b
            | ,?\s*\b[Ee]ds?\.
            | ,?\s*\beds?\b
            | ,?\s*\b(?:[Ee]ditors?|[Tt]ranslators?)\b
            | ,?\s*\b[Tt]rans\.
            ",
        )
        .unwrap()
    });
    static BY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i:by)\s+").unwrap());

    let text = BY_RE.replace(text.trim(), "");
    let text = ROLE_RE.replace_all(&text, " ");
    let text = BY_RE.replace(text.trim(), "");
    collapse(&text)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim separators from the end, keeping the period of a trailing initial or suffix.
fn trim_trailing(text: &str) -> &str {
    let mut text = text.trim().trim_end_matches([',', ';', ':']).trim_end();
    while let Some(head) = text.strip_suffix('.') {
        let last = head.split_whitespace().last().unwrap_or("");
        if (last.chars().count() == 1 && last.chars().all(char::is_uppercase)) || is_suffix(last) {
            break;
        }
        text = head.trim_end().trim_end_matches([',', ';', ':']).trim_end();
    }
    text
}

fn is_suffix(token: &str) -> bool {
    let t = token.trim().trim_end_matches('.').to_lowercase();
    NAME_SUFFIXES.contains(t.as_str())
}

/// `First Middle Last` → (`First Middle`, `Last`). A trailing suffix stays
/// with the family name.
fn split_plain(name: &str) -> (String, String) {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (String::new(), only.to_string()),
        [rest @ .., last, suffix] if !rest.is_empty() && is_suffix(suffix) => {
            (rest.join(" "), format!("{last}, {suffix}"))
        }
        [rest @ .., last] => (rest.join(" "), last.to_string()),
    }
}

/// Whether a comma list reads as `First Last, First Last` rather than `Last, First`.
fn is_full_name_list(parts: &[&str]) -> bool {
    let first_words: Vec<&str> = parts[0].split_whitespace().collect();
    if first_words.len() < 2 {
        return false;
    }
    let lead = first_words[0].to_lowercase();
    if SURNAME_PREFIXES.contains(lead.as_str()) {
        return false;
    }
    parts[1].split_whitespace().count() >= 2 && !is_suffix(parts[1])
}

/// Split a comma-bearing single name into (given, family).
fn split_comma_form(parts: &[&str]) -> (String, String) {
    if parts.len() >= 2 && is_suffix(parts[1]) {
        let (given, family) = split_plain(parts[0]);
        return (given, format!("{}, {}", family, parts[1].trim()));
    }
    let family = parts[0].to_string();
    let given = parts.get(1).map(|g| g.to_string()).unwrap_or_default();
    match parts.get(2) {
        Some(third) if is_suffix(third) => (given, format!("{}, {}", family, third.trim())),
        _ => (given, family),
    }
}

/// Split a raw author string into the first author's (given, family) plus flags.
///
/// - Semicolons count as commas.
/// - "and"/"&", or more than one comma not owed to a Jr./Sr. suffix, marks
///   the list as multi-author; only the first author is returned.
/// - `Last, First` when a comma separates a single name; otherwise the last
///   token is the family name.
/// - Editor and translator markers are removed; editor markers set `edited`.
/// - Empty input yields an empty split.
pub fn split_authors(raw: &str) -> NameSplit {
    static SUFFIX_COMMA_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i),\s*(?:jr|sr|ii|iii|iv)\b\.?").unwrap());

    let edited = has_editor_marker(raw);
    let cleaned = strip_role_markers(&raw.replace(';', ","));
    let text = trim_trailing(&cleaned).trim_start_matches([',', ' ']);
    if text.is_empty() {
        return NameSplit {
            edited,
            ..Default::default()
        };
    }

    let has_and = AND_RE.is_match(text);
    let commas = text.matches(',').count();
    let suffix_commas = SUFFIX_COMMA_RE.find_iter(text).count();
    let effective_commas = commas.saturating_sub(suffix_commas);

    let parts: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut multiple = has_and || effective_commas > 1;
    if !multiple && effective_commas == 1 && parts.len() == 2 && is_full_name_list(&parts) {
        multiple = true;
    }

    let (given, family) = if multiple {
        let first_chunk = AND_RE.split(text).next().unwrap_or(text);
        let first_chunk = trim_trailing(first_chunk);
        let chunk_parts: Vec<&str> = first_chunk
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        match chunk_parts.len() {
            0 => (String::new(), String::new()),
            1 => split_plain(chunk_parts[0]),
            _ if is_full_name_list(&chunk_parts) => split_plain(chunk_parts[0]),
            _ => split_comma_form(&chunk_parts[..2]),
        }
    } else if parts.len() >= 2 {
        split_comma_form(&parts)
    } else {
        split_plain(parts.first().copied().unwrap_or(""))
    };

    NameSplit {
        given: trim_trailing(&given).to_string(),
        family: trim_trailing(&family).to_string(),
        multiple,
        edited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(raw: &str) -> (String, String, bool) {
        let s = split_authors(raw);
        (s.given, s.family, s.multiple)
    }

    #[test]
    fn test_first_last() {
        assert_eq!(split("John Broome"), ("John".into(), "Broome".into(), false));
        assert_eq!(
            split("Martha C. Nussbaum"),
            ("Martha C.".into(), "Nussbaum".into(), false)
        );
    }

    #[test]
    fn test_single_token() {
        assert_eq!(split("Plato"), ("".into(), "Plato".into(), false));
    }

    #[test]
    fn test_last_comma_first() {
        assert_eq!(split("Broome, John"), ("John".into(), "Broome".into(), false));
        assert_eq!(split("Smith, J."), ("J.".into(), "Smith".into(), false));
    }

    #[test]
    fn test_suffix_reattached() {
        assert_eq!(
            split("King, Martin Luther, Jr."),
            ("Martin Luther".into(), "King, Jr.".into(), false)
        );
        assert_eq!(
            split("Martin Luther King, Jr."),
            ("Martin Luther".into(), "King, Jr.".into(), false)
        );
        assert_eq!(
            split("Martin Luther King Jr."),
            ("Martin Luther".into(), "King, Jr.".into(), false)
        );
    }

    #[test]
    fn test_multiple_with_and() {
        assert_eq!(
            split("John Broome and Derek Parfit"),
            ("John".into(), "Broome".into(), true)
        );
        assert_eq!(
            split("Smith, John & Doe, Jane"),
            ("John".into(), "Smith".into(), true)
        );
    }

    #[test]
    fn test_multiple_with_commas() {
        assert_eq!(
            split("John Smith, Jane Doe, and Bob Roe"),
            ("John".into(), "Smith".into(), true)
        );
        assert_eq!(
            split("Smith, J.; Doe, K."),
            ("J.".into(), "Smith".into(), true)
        );
        assert_eq!(
            split("John Smith, Jane Doe"),
            ("John".into(), "Smith".into(), true)
        );
    }

    #[test]
    fn test_surname_prefix_is_not_a_list() {
        assert_eq!(
            split("van der Berg, Jan Peter"),
            ("Jan Peter".into(), "van der Berg".into(), false)
        );
    }

    #[test]
    fn test_editor_markers() {
        let s = split_authors("Smith, John, eds.");
        assert_eq!(s.given, "John");
        assert_eq!(s.family, "Smith");
        assert!(s.edited);
        assert!(!s.multiple);

        let s = split_authors("Thomas Hurka (ed.)");
        assert_eq!(s.display(), "Thomas Hurka");
        assert!(s.edited);

        let s = split_authors("edited by Jane Heal");
        assert_eq!(s.display(), "Jane Heal");
        assert!(s.edited);
    }

    #[test]
    fn test_translator_marker_not_edited() {
        let s = split_authors("Paul Guyer, trans.");
        assert_eq!(s.display(), "Paul Guyer");
        assert!(!s.edited);
    }

    #[test]
    fn test_leading_by() {
        assert_eq!(split("by John Broome"), ("John".into(), "Broome".into(), false));
    }

    #[test]
    fn test_names_containing_ed_are_untouched() {
        assert_eq!(split("Fred Dretske"), ("Fred".into(), "Dretske".into(), false));
        assert_eq!(split("Ned Block"), ("Ned".into(), "Block".into(), false));
    }

    #[test]
    fn test_empty() {
        assert_eq!(split_authors(""), NameSplit::default());
        assert!(split_authors("  , ").is_empty());
    }
}
