// WHY: Turns a quoted commentary term into the stems the matcher looks for
// Quotation artifacts only exist on terms, never on root-text words

use super::alphabet::sanitize;
use super::overrides::OverrideTables;
use super::stemmer::SuffixStemmer;

/// Quotation marker word, "by name"
const NAMA: &str = "nāma";

/// Trailing copula dropped from the end of quoted terms
const QUOTED_HOTI: &str = "hotīti";

/// Remove the quotative `ti` (or a trailing ` nāma`) from the last word of a quote.
///
/// Dropping `ti` exposes the lengthened vowel or `n` that sandhi produced,
/// which is restored to its plain form: `ā`→`a`, `ī`→`i`, `ū`→`u`, `n`→`ṁ`.
pub fn unquote(quote: &str) -> String {
    if let Some(stripped) = quote.strip_suffix("ti") {
        let mut chars: Vec<char> = stripped.chars().collect();
        if let Some(last) = chars.last_mut() {
            *last = match *last {
                'ā' => 'a',
                'ī' => 'i',
                'ū' => 'u',
                'n' => 'ṁ',
                other => other,
            };
        }
        return chars.into_iter().collect();
    }
    if let Some(stripped) = quote.strip_suffix(" nāma") {
        return stripped.to_string();
    }
    quote.to_string()
}

/// Normalizes raw terms into stem sequences using a set of override tables
pub struct TermNormalizer<'a> {
    tables: &'a OverrideTables,
    stemmer: &'a SuffixStemmer,
}

impl<'a> TermNormalizer<'a> {
    pub fn new(tables: &'a OverrideTables, stemmer: &'a SuffixStemmer) -> Self {
        Self { tables, stemmer }
    }

    /// Normalizer over the built-in tables and stemmer
    pub fn builtin() -> TermNormalizer<'static> {
        TermNormalizer::new(OverrideTables::builtin(), SuffixStemmer::shared())
    }

    /// Produce the stemmed token sequence for one raw term.
    ///
    /// A manual override replaces sanitizing, unquoting and compound
    /// splitting; its tokens are still stemmed.
    pub fn normalize<S: AsRef<str>>(&self, term: &[S]) -> Vec<String> {
        let tokens = match self.tables.manual(term) {
            Some(manual) => manual.to_vec(),
            None => self.expand_compounds(self.strip_quotation(term)),
        };

        tokens.iter().map(|t| self.stemmer.stem(t)).collect()
    }

    /// Sanitize every token and remove the quotation artifacts; exactly one rule applies
    pub fn strip_quotation<S: AsRef<str>>(&self, term: &[S]) -> Vec<String> {
        let mut tokens: Vec<String> = term.iter().map(|t| sanitize(t.as_ref(), true)).collect();

        if let Some(nama) = tokens.iter().position(|t| t == NAMA) {
            // usually last, but some quotes (e.g. Sg7) carry it mid-term
            tokens.truncate(nama);
        } else if term.last().map(|t| t.as_ref()) == Some(QUOTED_HOTI) {
            tokens.pop();
            if tokens.is_empty() {
                tokens.push("hoti".to_string());
            }
        } else if let Some(last) = tokens.last_mut() {
            *last = unquote(last);
        }

        tokens
    }

    /// Splice in compound replacements left to right; spliced tokens are not rescanned
    pub fn expand_compounds(&self, tokens: Vec<String>) -> Vec<String> {
        let mut expanded = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.tables.compound(&token) {
                Some(parts) => expanded.extend(parts.iter().cloned()),
                None => expanded.push(token),
            }
        }
        expanded
    }
}
