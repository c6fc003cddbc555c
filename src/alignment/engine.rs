use tracing::debug;

use super::location::{validate_succession, MatchLocation};
use super::{AlignOptions, Cursor};
use crate::error::{AlignError, AlignResult};
use crate::pali::{sanitize, OverrideTables, SuffixStemmer, TermNormalizer};

/// Negative prefix that quotes sometimes elide relative to the root text
const NEGATIVE_PREFIX: char = 'a';

/// Term-to-root-text aligner over a fixed set of override tables
pub struct Aligner<'a> {
    tables: &'a OverrideTables,
    stemmer: &'a SuffixStemmer,
    options: AlignOptions,
}

impl<'a> Aligner<'a> {
    pub fn new(tables: &'a OverrideTables, options: AlignOptions) -> Self {
        Self {
            tables,
            stemmer: SuffixStemmer::shared(),
            options,
        }
    }

    /// Aligner over the built-in tables with default options
    pub fn builtin() -> Aligner<'static> {
        Aligner::new(OverrideTables::builtin(), AlignOptions::default())
    }

    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Stemmed token sequence for every term, in order
    pub fn normalize_terms<S: AsRef<str>>(&self, terms: &[Vec<S>]) -> Vec<Vec<String>> {
        let normalizer = TermNormalizer::new(self.tables, self.stemmer);
        terms.iter().map(|term| normalizer.normalize(term)).collect()
    }

    /// Sanitized and stemmed root text; no quotation or compound handling
    pub fn normalize_root_text<W: AsRef<str>>(&self, root_text: &[Vec<W>]) -> Vec<Vec<String>> {
        root_text
            .iter()
            .map(|line| {
                line.iter()
                    .map(|word| self.stemmer.stem(&sanitize(word.as_ref(), true)))
                    .collect()
            })
            .collect()
    }

    /// Locate every term in `root_text`, in order.
    ///
    /// Each term must be found within a single line, at or after the
    /// cursor left by the previous term. A single-word term starting with
    /// the negative prefix that cannot be found gets one retry without the
    /// prefix, searching again from the previous match.
    pub fn align<S, W>(
        &self,
        terms: &[Vec<S>],
        root_text: &[Vec<W>],
    ) -> AlignResult<Vec<MatchLocation>>
    where
        S: AsRef<str>,
        W: AsRef<str>,
    {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut terms = self.normalize_terms(terms);
        let root = self.normalize_root_text(root_text);

        let mut matched: Vec<MatchLocation> = Vec::with_capacity(terms.len());
        let mut cursor = Cursor::default();
        let mut retried = false;

        while matched.len() < terms.len() {
            let term_index = matched.len();

            match find_term(&root, &terms[term_index], cursor) {
                Some(location) => {
                    if let Some(previous) = matched.last() {
                        validate_succession(
                            term_index,
                            *previous,
                            terms[term_index - 1].len(),
                            location,
                            terms[term_index].len(),
                        )?;
                    }

                    debug!(term_index, %location, "Matched term");
                    matched.push(location);
                    cursor = self.options.cursor.next_cursor(&root[location.line], &location);
                    retried = false;
                }
                None => {
                    let term = &mut terms[term_index];
                    if !retried && is_elision_candidate(term) {
                        term[0].remove(0);
                        cursor = matched.last().map(Cursor::at).unwrap_or_default();
                        retried = true;
                        debug!(term_index, stripped = %term[0], ?cursor, "Retrying term without negative prefix");
                        continue;
                    }

                    return Err(AlignError::AlignmentNotFound {
                        term_index,
                        term: terms.swap_remove(term_index),
                        matched,
                        normalized_root_text: root,
                    });
                }
            }
        }

        Ok(matched)
    }
}

/// Single-word term beginning with the negative prefix
fn is_elision_candidate(term: &[String]) -> bool {
    term.len() == 1 && term[0].starts_with(NEGATIVE_PREFIX)
}

/// First position at or after `cursor` where `term` matches within one line
fn find_term(root: &[Vec<String>], term: &[String], cursor: Cursor) -> Option<MatchLocation> {
    if term.is_empty() {
        return None;
    }

    let mut line = cursor.line;
    let mut word = cursor.word;

    while line < root.len() {
        let words = &root[line];
        if word + term.len() > words.len() {
            line += 1;
            word = 0;
            continue;
        }
        if is_match(&words[word..word + term.len()], term) {
            return Some(MatchLocation::spanning(line, word, term.len()));
        }
        word += 1;
    }

    None
}

/// Every term stem must be contained in the root stem at the same offset
fn is_match(window: &[String], term: &[String]) -> bool {
    window
        .iter()
        .zip(term)
        .all(|(root_stem, term_stem)| root_stem.contains(term_stem.as_str()))
}
