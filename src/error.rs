use thiserror::Error;

use crate::alignment::MatchLocation;

/// Why a term list could not be aligned with a root text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// A later term was found before, or overlapping backwards into, the previous one
    #[error("term {term_index} at {current} is out of order with the previous term at {previous}")]
    OrderingViolation {
        term_index: usize,
        previous: MatchLocation,
        current: MatchLocation,
    },

    /// Two consecutive terms of different lengths resolved to the same span
    #[error(
        "terms of different lengths ({previous_len} and {current_len}) found at the same spot {location}"
    )]
    LengthMismatchAtSameLocation {
        term_index: usize,
        location: MatchLocation,
        previous_len: usize,
        current_len: usize,
    },

    /// A term could not be located in the rest of the root text
    #[error(
        "could not find \"{}\" (term {term_index}) in root text; found {} of the terms so far",
        .term.join(" "),
        .matched.len()
    )]
    AlignmentNotFound {
        term_index: usize,
        /// Normalized form of the unmatched term, after any elision retry
        term: Vec<String>,
        /// Locations of every term matched before the failure
        matched: Vec<MatchLocation>,
        normalized_root_text: Vec<Vec<String>>,
    },
}

/// Result type alias for alignment operations
pub type AlignResult<T> = std::result::Result<T, AlignError>;

/// Rejected additions to, or malformed ids for, the segment path store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentStoreError {
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    #[error("App IDs must match: {lower} != {upper}")]
    AppIdMismatch { lower: String, upper: String },

    #[error("Lower segment must be <= upper segment: {lower} > {upper}")]
    InvertedRange { lower: String, upper: String },

    #[error("Range {lower}-{upper} overlaps with existing range {existing_lower}-{existing_upper}")]
    Overlap {
        lower: String,
        upper: String,
        existing_lower: String,
        existing_upper: String,
    },

    #[error("Path {path} is not under {base}")]
    PathOutsideBase { path: String, base: String },

    #[error("Malformed store JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SegmentStoreError {
    fn from(err: serde_json::Error) -> Self {
        SegmentStoreError::Json(err.to_string())
    }
}

/// Unreadable or invalid configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Manual override for {0:?} has an empty term")]
    EmptyOverrideTerm(Vec<String>),
}
