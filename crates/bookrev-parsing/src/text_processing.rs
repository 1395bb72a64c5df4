/// Canonicalize whitespace, quote and dash variants.
///
/// - non-breaking, thin, figure, en/em and other Unicode spaces → `' '`
/// - curly single quotes and primes → `'`, curly double quotes → `"`
/// - hyphen, non-breaking hyphen, figure/en/em dash, horizontal bar, minus → `-`
/// - zero-width characters are dropped
/// - whitespace runs collapse to one space, ends are trimmed
///
/// Total and idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter(|c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}'))
        .map(|c| match c {
            '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => ' ',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => '"',
            '\u{2010}'..='\u{2015}' | '\u{2212}' => '-',
            c => c,
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
