// WHY: Character-class filtering down to the Pali alphabet
// Root text and quoted terms are compared only after both pass through here

use unicode_normalization::UnicodeNormalization;

/// Letters of the romanized Pali alphabet, aspirates spelled as digraphs.
///
/// Filtering works per character, so the digraphs contribute nothing
/// beyond their component letters.
pub const PALI_ALPHABET: &[&str] = &[
    "a", "ā", "i", "ī", "u", "ū", "e", "o", "ṁ", "k", "kh", "g", "gh", "ṅ", "c", "ch", "j", "jh",
    "ñ", "ṭ", "ṭh", "ḍ", "ḍh", "ṇ", "t", "th", "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r",
    "l", "ḷ", "v", "s", "h",
];

/// Replaces equivalent characters with the standard form without dropping anything.
///
/// Applies NFC composition, then unifies the dot-below niggahīta `ṃ` with
/// the dot-above `ṁ` used throughout the tables.
pub fn normalize(text: &str) -> String {
    text.nfc().map(|c| if c == 'ṃ' { 'ṁ' } else { c }).collect()
}

/// Lowercase letters allowed through `sanitize`.
fn is_pali_letter(c: char) -> bool {
    matches!(
        c,
        'a' | 'ā'
            | 'i'
            | 'ī'
            | 'u'
            | 'ū'
            | 'e'
            | 'o'
            | 'ṁ'
            | 'k'
            | 'g'
            | 'ṅ'
            | 'c'
            | 'j'
            | 'ñ'
            | 'ṭ'
            | 'ḍ'
            | 'ṇ'
            | 't'
            | 'd'
            | 'n'
            | 'p'
            | 'b'
            | 'm'
            | 'y'
            | 'r'
            | 'l'
            | 'ḷ'
            | 'v'
            | 's'
            | 'h'
    )
}

/// Capitals of the alphabet, for case-preserving sanitization.
fn is_pali_capital(c: char) -> bool {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l != c => {
            is_pali_letter(l) && l.to_uppercase().eq(std::iter::once(c))
        }
        _ => false,
    }
}

/// Strips a string of all non-Pali characters.
///
/// With `lower` the text is lowercased first and only lowercase letters
/// survive; without it capitals of the alphabet are kept as well. Never
/// fails: anything outside the alphabet (punctuation, quotes, digits,
/// foreign letters) is silently dropped.
pub fn sanitize(text: &str, lower: bool) -> String {
    if lower {
        normalize(&text.to_lowercase())
            .chars()
            .filter(|&c| is_pali_letter(c))
            .collect()
    } else {
        normalize(text)
            .chars()
            .filter(|&c| is_pali_letter(c) || is_pali_capital(c))
            .collect()
    }
}
