// WHY: Locates each quoted term of a commentary in the root text, in order
// Single pass, greedy first match, one bounded elision retry per term

use serde::{Deserialize, Serialize};

pub mod engine;
pub mod location;

pub use engine::Aligner;
pub use location::{validate_succession, MatchLocation};

use crate::error::AlignResult;

/// Root-text token marking a repeated verse line
pub const VERSE_MARKER: &str = "v";

/// Where scanning resumes after a term has been matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorPolicy {
    /// Resume at the start of the match so the next term may reuse its last word.
    /// A repetition of the last matched word moves the cursor onto the repetition,
    /// directly or after the verse marker
    #[default]
    HoldAtMatchStart,
    /// Resume one word past the match; after the verse marker, on the repeated word
    AdvancePastMatch,
}

/// Position in the normalized root text where the next search starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub line: usize,
    pub word: usize,
}

impl Cursor {
    /// Cursor sitting on the first word of `location`
    pub fn at(location: &MatchLocation) -> Self {
        Self {
            line: location.line,
            word: location.start,
        }
    }
}

impl CursorPolicy {
    /// Cursor for the next term, given the normalized words of the line `location` is on
    pub fn next_cursor(&self, words: &[String], location: &MatchLocation) -> Cursor {
        let next = location.end + 1;
        let last = words.get(location.end);
        let duplicate = last.is_some() && words.get(next) == last;
        let verse_repeat = last.is_some()
            && words.get(next).map(String::as_str) == Some(VERSE_MARKER)
            && words.get(next + 1) == last;

        let word = match self {
            CursorPolicy::AdvancePastMatch => {
                if verse_repeat {
                    next + 1
                } else {
                    next
                }
            }
            CursorPolicy::HoldAtMatchStart => {
                let mut word = location.start;
                if duplicate {
                    word = next;
                }
                if verse_repeat {
                    word = next + 1;
                }
                word
            }
        };

        Cursor {
            line: location.line,
            word,
        }
    }
}

/// Configuration for an alignment run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignOptions {
    pub cursor: CursorPolicy,
}

/// Align `terms` against `root_text` with the built-in tables and default options.
///
/// Returns one `(line, start, end)` location per term, in term order, or
/// fails without partial output.
///
/// ```
/// use vinaya_align::match_terms_to_root_text;
///
/// let terms = vec![vec!["Yo", "panāti"], vec!["bhikkhu", "nāma"]];
/// let root_text = vec![vec!["Yo", "pana", "bhikkhu"]];
/// let found = match_terms_to_root_text(&terms, &root_text).unwrap();
/// let spans: Vec<_> = found.iter().map(|m| m.as_tuple()).collect();
/// assert_eq!(spans, vec![(0, 0, 1), (0, 2, 2)]);
/// ```
pub fn match_terms_to_root_text<S, W>(
    terms: &[Vec<S>],
    root_text: &[Vec<W>],
) -> AlignResult<Vec<MatchLocation>>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    Aligner::builtin().align(terms, root_text)
}
