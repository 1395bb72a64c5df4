//! Bibliographic noise: imprint, price, ISBN and page-count tails that
//! journals append to the reviewed book's title or author.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{DEFAULT_CONFIG, ParsingConfig};
use crate::names::is_initial_before;
use crate::vocabulary::{DEFAULT_CITIES, DEFAULT_PUBLISHERS};

/// A pattern that can never match, used when a list is empty.
const NEVER: &str = r"\b\B";

/// Four-digit publication year (1500–2099).
const YEAR: &str = r"(?:1[5-9]|20)\d{2}";

/// Publisher names no list can enumerate.
///
/// Only a lone initial may carry a period, so the chain never crosses the
/// sentence break after an author ("Bernard Williams. Cambridge University Press").
const GENERIC_PUBLISHER: &str = r"[A-Z][A-Za-z&'-]*(?:\s+(?:of|and|&|[A-Z]\.|[A-Z][A-Za-z&'-]*))*\s+(?:University\s+Press|Press|Publishers|Publishing|Verlag|Books)";

/// US state or country abbreviation after a city (`Cambridge, MA`, `Ithaca, N.Y.`).
const REGION: &str = r"(?:,\s*[A-Z][A-Za-z.]{1,5})?";

/// Compiled publisher/city recognizers.
#[derive(Debug, Clone)]
pub struct ImprintPatterns {
    /// Title tail starting with a publisher.
    pub(crate) publisher_tail: Regex,
    /// Title tail starting with an imprint city.
    pub(crate) city_tail: Regex,
    /// First publisher inside an author span.
    pub(crate) author_publisher: Regex,
    /// First imprint city inside an author span.
    pub(crate) author_city: Regex,
    /// Any listed publisher or city, or a `<Word> Press` name, with no separator required.
    pub(crate) bare_imprint: Regex,
}

fn alternation(items: &[String]) -> String {
    let mut items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return NEVER.to_string();
    }
    // Longest first so "Clarendon Press" wins over "Clarendon".
    items.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    items.dedup();
    items
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|")
}

impl ImprintPatterns {
    /// Compile recognizers from publisher and city lists.
    pub fn compile(publishers: &[String], cities: &[String]) -> Result<Self, regex::Error> {
        let listed_publishers = alternation(publishers);
        let listed_cities = alternation(cities);
        let publisher = format!("(?:{listed_publishers}|{GENERIC_PUBLISHER})");
        let city = format!("(?:{listed_cities}){REGION}");

        Ok(Self {
            publisher_tail: Regex::new(&format!(r"[.,:;]\s+\(?{publisher}\s*(?:[,.;:(].*)?$"))?,
            city_tail: Regex::new(&format!(
                r"[.,;]\s+\(?{city}\s*(?::.*|,\s*{YEAR}\b.*|\.)?$"
            ))?,
            author_publisher: Regex::new(&format!(
                r"[.,;:(]\s*{publisher}\b|^\s*{publisher}\s*(?:[,.;:]\s*{YEAR}\b.*)?[.,;]?\s*$"
            ))?,
            author_city: Regex::new(&format!(
                r"(?:^|[.,;:(])\s*{city}\s*(?::|,\s*{YEAR}\b|$)"
            ))?,
            bare_imprint: Regex::new(&format!(
                r"\b(?:{listed_publishers}|{listed_cities})\b|\b\p{{Lu}}[\w&'-]*\s+(?:University\s+Press|Press|Publishers|Publishing|Books|Verlag)\b"
            ))?,
        })
    }

    /// Patterns built from the built-in publisher and city lists.
    pub(crate) fn defaults() -> &'static Self {
        static DEFAULT_IMPRINT: Lazy<ImprintPatterns> = Lazy::new(|| {
            let publishers: Vec<String> = DEFAULT_PUBLISHERS.iter().map(|s| s.to_string()).collect();
            let cities: Vec<String> = DEFAULT_CITIES.iter().map(|s| s.to_string()).collect();
            ImprintPatterns::compile(&publishers, &cities).unwrap()
        });
        &DEFAULT_IMPRINT
    }
}

/// Strip trailing bibliographic noise from a book title.
pub fn strip_title_noise(title: &str) -> String {
    strip_title_noise_with_config(title, &DEFAULT_CONFIG)
}

/// Config-aware version of [`strip_title_noise`].
///
/// Cutoffs are applied repeatedly until the title stops changing, since
/// imprints stack (`Oxford: Clarendon Press, 1984. Pp. xii + 543. $24.95`).
pub fn strip_title_noise_with_config(title: &str, config: &ParsingConfig) -> String {
    static TITLE_CUTOFFS: Lazy<Vec<Regex>> = Lazy::new(|| {
        vec![
            // ISBN and everything after it
            Regex::new(r"(?i)[,.;:]?\s*\(?\bISBN\b.*$").unwrap(),
            // Parenthetical imprint: (Oxford: OUP, 2010), (Routledge, 224 pp.)
            Regex::new(r"\s*\([^()]*(?:\b(?:1[5-9]|20)\d{2}\b|[Pp]ress\b|[Pp]ublish|[Uu]niversity\b|\bBooks\b|\bpp\b|[$£€]|\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)?\s*:)[^()]*\)\s*[.,;]?\s*$").unwrap(),
            // Price, optionally followed by a binding
            Regex::new(r"(?i)[,.;:]?\s*\(?[$£€]\s?\d[\d.,]*\)?(?:\s*\(?(?:hb|pb|hbk|pbk|cloth|paper|paperback|hardback|hardcover)\b\.?\)?)?\s*[.,;]?\s*$").unwrap(),
            // Binding on its own
            Regex::new(r"(?i)(?:[,.;:]\s*|\s*\()(?:hb|pb|hbk|pbk|cloth|paper|paperback|hardback|hardcover)\b\.?\)?\s*[.,;]?\s*$").unwrap(),
            // 224 pp. / 224 pages / xii + 224 pp.
            Regex::new(r"(?i)[,.;:]?\s*(?:[xivlc]+\s*\+\s*)?\d+\s*(?:pp|pages)\b\.?\s*[.,;]?\s*$").unwrap(),
            // Pp. 224 / pp. xii + 224
            Regex::new(r"(?i)[,.;:]?\s*pp?\.\s*(?:[xivlc]+\s*\+\s*)?\d+\s*[.,;]?\s*$").unwrap(),
            // Roman front matter: xii + 224, 31.00
            Regex::new(r"[,.;:]\s*[xivlc]+\s*\+\s*\d+\b.*$").unwrap(),
            // Edited by / translated by clause
            Regex::new(r"[,.;:]?\s+(?:[Ee]dited|[Tt]ranslated|[Ee]d\.|[Tt]rans\.)\s+(?:and\s+[a-z]+\s+)?by\b.*$").unwrap(),
            // ". By Author" byline
            Regex::new(r"\.\s+[Bb]y\s+\p{Lu}.*$").unwrap(),
            // Trailing year
            Regex::new(r"[,.;:]\s*\(?(?:1[5-9]|20)\d{2}\)?\s*[.,;]?\s*$").unwrap(),
            Regex::new(r"(?i)\s*\(review\)\s*$").unwrap(),
            Regex::new(r"\s*\(\s*\)\s*$").unwrap(),
            // Parenthetical cut off by truncation
            Regex::new(r"\s*\([^)]*$").unwrap(),
        ]
    });

    let imprint = config.imprint();
    let mut current = trim_title_edges(title);
    for _ in 0..8 {
        let mut next = current.clone();
        for re in TITLE_CUTOFFS.iter() {
            next = re.replace(&next, "").into_owned();
        }
        next = imprint.publisher_tail.replace(&next, "").into_owned();
        next = imprint.city_tail.replace(&next, "").into_owned();
        next = trim_title_edges(&next);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Trim separators from both ends and drop enclosing quotes.
fn trim_title_edges(text: &str) -> String {
    let mut text = text
        .trim()
        .trim_start_matches([',', ';', ':', '.', '-', ' '])
        .trim_end_matches([',', ';', ':', '.', ' '])
        .trim();

    let quotes = text.matches('"').count();
    if quotes == 2 && text.starts_with('"') && text.ends_with('"') && text.len() > 1 {
        text = text[1..text.len() - 1].trim();
    } else if quotes == 1 {
        text = text.trim_matches('"').trim();
    }
    if text.len() > 2 && text.starts_with('\'') && text.ends_with('\'') {
        text = text[1..text.len() - 1].trim();
    }
    text.trim_end_matches([',', ';', ':', '.', ' ']).to_string()
}

/// Cut imprint, year, page, ISBN and price tails from an author span.
pub fn strip_author_noise(span: &str) -> String {
    strip_author_noise_with_config(span, &DEFAULT_CONFIG)
}

/// Config-aware version of [`strip_author_noise`].
///
/// The span is cut at the earliest noise marker; whatever precedes it is
/// kept. A colon cut also drops the unrecognized city in front of it.
pub fn strip_author_noise_with_config(span: &str, config: &ParsingConfig) -> String {
    static AUTHOR_CUTOFFS: Lazy<Vec<Regex>> = Lazy::new(|| {
        vec![
            Regex::new(r"\(").unwrap(),
            Regex::new(r"(?i)\bISBN\b").unwrap(),
            Regex::new(r"[$£€]\s?\d").unwrap(),
            Regex::new(r",\s*\(?(?:1[5-9]|20)\d{2}\b").unwrap(),
            Regex::new(r"(?i)[,.;]?\s*\b\d+\s*(?:pp|pages)\b").unwrap(),
            Regex::new(r"(?i)[,.;]\s*pp?\.\s*[\dxivlc]").unwrap(),
            Regex::new(r"[,.;]\s*[xivlc]+\s*\+\s*\d").unwrap(),
        ]
    });
    // Sentence break into an imprint: ". Oxford: ", ". (", ". 1999", ". xii,", ". 224 p"
    static PUB_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\.\s+(?:\(|[A-Z][a-z]{3,}[\s:,]|\d{4}|[xivlc]+[,.]|\d+\s+p)").unwrap()
    });
    static CITY_BEFORE_COLON_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"[.,;]\s*[A-Z][\w.]*(?:\s+[A-Z][\w.]*)?(?:,\s*[A-Z][A-Za-z.]{1,5})?\s*$")
            .unwrap()
    });

    let imprint = config.imprint();
    let mut cut = span.len();
    for re in AUTHOR_CUTOFFS.iter() {
        if let Some(m) = re.find(span) {
            cut = cut.min(m.start());
        }
    }
    for re in [&imprint.author_publisher, &imprint.author_city] {
        if let Some(m) = re.find(span) {
            cut = cut.min(m.start());
        }
    }
    if let Some(m) = PUB_SPLIT_RE
        .find_iter(span)
        .find(|m| !is_initial_before(span, m.start()))
    {
        cut = cut.min(m.start());
    }

    let mut kept = &span[..cut];
    if let Some(colon) = kept.find(':') {
        kept = &kept[..colon];
        if let Some(m) = CITY_BEFORE_COLON_RE.find(kept) {
            kept = &kept[..m.start()];
        }
    }
    kept.trim().trim_end_matches([',', ';', ':', ' ']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Title noise
    // =========================================================================

    #[test]
    fn test_stacked_imprint() {
        assert_eq!(
            strip_title_noise(
                "Reasons and Persons. Oxford: Clarendon Press, 1984. Pp. xii + 543. $24.95"
            ),
            "Reasons and Persons"
        );
    }

    #[test]
    fn test_parenthetical_imprint() {
        assert_eq!(
            strip_title_noise(
                "Climate Matters: Ethics in a Warming World (New York: W. W. Norton, 2012)"
            ),
            "Climate Matters: Ethics in a Warming World"
        );
    }

    #[test]
    fn test_isbn_and_price() {
        assert_eq!(
            strip_title_noise("Moral Tribes, ISBN 978-1-59420-605-4, £20.00 (hb)"),
            "Moral Tribes"
        );
        assert_eq!(strip_title_noise("Moral Tribes, $29.95 cloth"), "Moral Tribes");
    }

    #[test]
    fn test_page_counts() {
        assert_eq!(strip_title_noise("The Ethics of Care, 224 pp."), "The Ethics of Care");
        assert_eq!(strip_title_noise("The Ethics of Care. pp. 224"), "The Ethics of Care");
    }

    #[test]
    fn test_edited_by_clause() {
        assert_eq!(
            strip_title_noise("Justice as Fairness, edited by Erin Kelly"),
            "Justice as Fairness"
        );
    }

    #[test]
    fn test_publisher_and_city_tails() {
        assert_eq!(strip_title_noise("Animal Liberation. Routledge"), "Animal Liberation");
        assert_eq!(
            strip_title_noise("Animal Liberation, New York, 1975"),
            "Animal Liberation"
        );
        assert_eq!(
            strip_title_noise("Animal Liberation. Harper Perennial Press, 2009"),
            "Animal Liberation"
        );
    }

    #[test]
    fn test_keeps_meaningful_content() {
        assert_eq!(strip_title_noise("Europe After 1989"), "Europe After 1989");
        assert_eq!(
            strip_title_noise("The Cambridge Companion to Kant"),
            "The Cambridge Companion to Kant"
        );
        assert_eq!(strip_title_noise("Why Paper Matters"), "Why Paper Matters");
        assert_eq!(strip_title_noise("What Is Justice?"), "What Is Justice?");
    }

    #[test]
    fn test_review_suffix_and_quotes() {
        assert_eq!(strip_title_noise("Beast and Man (review)"), "Beast and Man");
        assert_eq!(strip_title_noise("\"Plato's Ghost\""), "Plato's Ghost");
        assert_eq!(strip_title_noise("\"Plato's Ghost."), "Plato's Ghost");
    }

    #[test]
    fn test_custom_publisher() {
        let config = crate::ParsingConfigBuilder::new()
            .add_publisher("Acumen Arts".to_string())
            .build()
            .unwrap();
        assert_eq!(
            strip_title_noise_with_config("Virtue Ethics, Acumen Arts", &config),
            "Virtue Ethics"
        );
    }

    // =========================================================================
    // Author noise
    // =========================================================================

    #[test]
    fn test_author_city_publisher() {
        assert_eq!(
            strip_author_noise("John Broome, Oxford: Clarendon Press, 1999"),
            "John Broome"
        );
        assert_eq!(
            strip_author_noise("Martha C. Nussbaum. Princeton University Press"),
            "Martha C. Nussbaum"
        );
    }

    #[test]
    fn test_author_sentence_before_bare_publisher() {
        assert_eq!(
            strip_author_noise("Bernard Williams. Cambridge University Press, 1981"),
            "Bernard Williams"
        );
        assert_eq!(
            strip_author_noise("Timothy Williamson. Oxford University Press, 2000."),
            "Timothy Williamson"
        );
        assert_eq!(
            strip_author_noise("Anthony Kenny. W. W. Norton, 1990"),
            "Anthony Kenny"
        );
    }

    #[test]
    fn test_author_named_like_publisher() {
        assert_eq!(strip_author_noise("Anne Norton, Norton, 2012"), "Anne Norton");
        assert_eq!(strip_author_noise("Anne Norton"), "Anne Norton");
    }

    #[test]
    fn test_author_parenthetical_and_pages() {
        assert_eq!(
            strip_author_noise("Jane Heal (Cambridge University Press, 2003)"),
            "Jane Heal"
        );
        assert_eq!(strip_author_noise("Peter Singer, 224 pp."), "Peter Singer");
        assert_eq!(strip_author_noise("Peter Singer, $25.00"), "Peter Singer");
    }

    #[test]
    fn test_author_unknown_city_before_colon() {
        assert_eq!(
            strip_author_noise("Holmes Rolston, Hassocksville: Harvester"),
            "Holmes Rolston"
        );
    }

    #[test]
    fn test_author_span_that_is_only_a_publisher() {
        assert_eq!(strip_author_noise("Oxford University Press, 2010"), "");
        assert_eq!(strip_author_noise("Macmillan, Margaret"), "Macmillan, Margaret");
    }

    #[test]
    fn test_bare_imprint() {
        let imprint = ImprintPatterns::defaults();
        let m = imprint
            .bare_imprint
            .find("Jane Heal Oxford University Press, 2003")
            .unwrap();
        assert_eq!(m.start(), 10);
        assert!(imprint.bare_imprint.find("Jane Heal").is_none());
    }

    #[test]
    fn test_author_plain_names_untouched() {
        assert_eq!(strip_author_noise("Smith, John, eds."), "Smith, John, eds.");
        assert_eq!(strip_author_noise("Durham, John"), "Durham, John");
        assert_eq!(strip_author_noise("J. Baird Callicott"), "J. Baird Callicott");
    }
}
