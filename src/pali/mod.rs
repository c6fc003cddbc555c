// WHY: Pali-specific text handling shared by term and root-text normalization
// Everything here is a pure function of its input plus read-only tables

pub mod alphabet;
pub mod overrides;
pub mod stemmer;
pub mod term;

pub use alphabet::{normalize, sanitize, PALI_ALPHABET};
pub use overrides::OverrideTables;
pub use stemmer::{pali_stem, stem, SuffixStemmer};
pub use term::{unquote, TermNormalizer};
