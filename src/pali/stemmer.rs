// WHY: Longest-match suffix stripping, the only morphology the matcher relies on
// Stems are compared by substring containment, so over-stripping is tolerated

use std::collections::HashSet;
use std::sync::OnceLock;

use super::alphabet::{normalize, sanitize};

/// Inflectional suffixes grouped by length, longest group first.
///
/// A group's entries are only ever compared against that many trailing
/// characters, so an entry of a different length can never match.
pub const SUFFIX_GROUPS: &[(usize, &[&str])] = &[
    (6, &["amhase", "esānaṁ"]),
    (
        5,
        &[
            "attha", "aṇīya", "anīya", "assaṁ", "issaṁ", "ittha", "ittho", "ismiṁ", "usmiṁ",
            "ānāti",
        ],
    ),
    (
        4,
        &[
            "antī", "asso", "amha", "anta", "onta", "unta", "enta", "assa", "assā", "issa", "ismā",
            "amhā", "amhi", "ānaṁ", "asmā", "asmiṁ", "āyaṁ", "āvin", "āsaṁ", "iṁsu", "imha",
            "imhā", "imhi", "iyaṁ", "isaṁ", "isuṁ", "īnaṁ", "umhā", "umhi", "uyaṁ", "usaṁ",
            "usmā", "ussa", "ūnaṁ", "ūbhi", "etha", "etho", "eraṁ", "esaṁ",
        ],
    ),
    (
        3,
        &[
            "ati", "āti", "ant", "usā", "esi", "āsi", "eti", "ānā", "āsā", "āsa", "aro", "āni",
            "ato", "ani", "anā", "ana", "esu", "ehi", "asā", "aso", "eso", "āna", "īni", "ūni",
            "āya", "āyo", "āsu", "āhi", "ito", "iyo", "ima", "īsu", "īhi", "unā", "uno", "uyā",
            "uyo", "ūhi", "ena", "ema", "emu",
        ],
    ),
    (2, &["aṁ", "uṁ", "iṁ", "in"]),
    (1, &["i", "ī", "a", "ā", "o", "u", "ū", "e"]),
];

/// Suffix group with its suffixes normalized and hashed for lookup
struct SuffixGroup {
    len: usize,
    suffixes: HashSet<String>,
}

/// Priority-ordered suffix stripper
pub struct SuffixStemmer {
    groups: Vec<SuffixGroup>,
}

impl SuffixStemmer {
    /// Build a stemmer from the built-in suffix groups
    pub fn new() -> Self {
        Self::with_groups(SUFFIX_GROUPS)
    }

    /// Build a stemmer from arbitrary `(length, suffixes)` groups, tried in the given order
    pub fn with_groups(groups: &[(usize, &[&str])]) -> Self {
        let groups = groups
            .iter()
            .map(|(len, suffixes)| SuffixGroup {
                len: *len,
                suffixes: suffixes.iter().map(|s| normalize(s)).collect(),
            })
            .collect();
        Self { groups }
    }

    /// Shared instance over the built-in groups, built on first use
    pub fn shared() -> &'static SuffixStemmer {
        static SHARED_STEMMER: OnceLock<SuffixStemmer> = OnceLock::new();
        SHARED_STEMMER.get_or_init(SuffixStemmer::new)
    }

    /// Strip the first (longest-group) suffix found at the end of `word`.
    ///
    /// The word is lowercased first. Words with no listed suffix come back
    /// unchanged; a word that is itself a suffix stems to the empty string.
    pub fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();
        let chars: Vec<char> = word.chars().collect();

        for group in &self.groups {
            if chars.len() < group.len {
                continue;
            }
            let split = chars.len() - group.len;
            let suffix: String = chars[split..].iter().collect();
            if group.suffixes.contains(&suffix) {
                return chars[..split].iter().collect();
            }
        }

        word
    }

    /// Number of suffix groups, in priority order
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Default for SuffixStemmer {
    fn default() -> Self {
        Self::new()
    }
}

/// Stem with the shared built-in stemmer
pub fn stem(word: &str) -> String {
    SuffixStemmer::shared().stem(word)
}

/// Sanitize to lowercase Pali letters, then stem
pub fn pali_stem(word: &str) -> String {
    stem(&sanitize(word, true))
}
