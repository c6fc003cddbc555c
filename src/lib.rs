pub mod alignment;
pub mod config;
pub mod error;
pub mod links;
pub mod pali;
pub mod segments;

// Re-export the alignment entry points
pub use alignment::{
    match_terms_to_root_text, validate_succession,
    AlignOptions, Aligner, CursorPolicy, MatchLocation
};

// Re-export error types
pub use error::{AlignError, AlignResult, ConfigError, SegmentStoreError};

// Re-export normalization helpers
pub use pali::{
    normalize, pali_stem, sanitize, stem, unquote,
    OverrideTables, SuffixStemmer, TermNormalizer
};

pub use config::AlignConfig;
pub use links::{rewrite_links_in_file, rewrite_links_in_folder, rewrite_suttacentral_links, LinkRewriter};
pub use segments::{SegmentId, SegmentPathStore};
