// WHY: Match triples plus the consistency rules between consecutive matches
// Kept apart from the scan so the rules can be checked on their own

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AlignError, AlignResult};

/// Where one term was found: 0-based line, first and last (inclusive) word index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize, usize)", into = "(usize, usize, usize)")]
pub struct MatchLocation {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl MatchLocation {
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    /// Location of a `len`-word span starting at `start`; `len` must be at least 1
    pub fn spanning(line: usize, start: usize, len: usize) -> Self {
        Self::new(line, start, start + len - 1)
    }

    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.line, self.start, self.end)
    }

    /// Number of words covered
    pub fn word_count(&self) -> usize {
        self.end - self.start + 1
    }
}

impl From<(usize, usize, usize)> for MatchLocation {
    fn from((line, start, end): (usize, usize, usize)) -> Self {
        Self::new(line, start, end)
    }
}

impl From<MatchLocation> for (usize, usize, usize) {
    fn from(location: MatchLocation) -> Self {
        location.as_tuple()
    }
}

impl PartialEq<(usize, usize, usize)> for MatchLocation {
    fn eq(&self, other: &(usize, usize, usize)) -> bool {
        self.as_tuple() == *other
    }
}

impl fmt::Display for MatchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.line, self.start, self.end)
    }
}

/// Check that `current` (term `term_index`) may follow `previous`.
///
/// - the same span is only allowed for terms of equal normalized length
/// - `current` must not start before `previous` does
/// - on the same line, `current` may start on `previous`'s last word but
///   not before it
pub fn validate_succession(
    term_index: usize,
    previous: MatchLocation,
    previous_len: usize,
    current: MatchLocation,
    current_len: usize,
) -> AlignResult<()> {
    if current == previous && current_len != previous_len {
        return Err(AlignError::LengthMismatchAtSameLocation {
            term_index,
            location: current,
            previous_len,
            current_len,
        });
    }

    let precedes = (current.line, current.start) < (previous.line, previous.start);
    let overlaps_backwards = current.line == previous.line && previous.end > current.start;

    if precedes || overlaps_backwards {
        return Err(AlignError::OrderingViolation {
            term_index,
            previous,
            current,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_tuple_conversions() {
        let location = MatchLocation::spanning(2, 3, 2);
        assert_eq!(location, (2, 3, 4));
        assert_eq!(location.word_count(), 2);
        assert_eq!(MatchLocation::from((0, 1, 1)).as_tuple(), (0, 1, 1));
        assert_eq!(location.to_string(), "(2, 3, 4)");
    }

    #[test]
    fn test_location_serializes_as_triple() {
        let json = serde_json::to_string(&MatchLocation::new(0, 2, 2)).unwrap();
        assert_eq!(json, "[0,2,2]");
        let back: MatchLocation = serde_json::from_str("[1,0,3]").unwrap();
        assert_eq!(back, (1, 0, 3));
    }

    #[test]
    fn test_same_location_requires_equal_lengths() {
        let spot = MatchLocation::new(0, 4, 4);
        assert!(validate_succession(1, spot, 1, spot, 1).is_ok());

        let err = validate_succession(1, spot, 1, spot, 2).unwrap_err();
        assert_eq!(
            err,
            AlignError::LengthMismatchAtSameLocation {
                term_index: 1,
                location: spot,
                previous_len: 1,
                current_len: 2,
            }
        );
    }

    #[test]
    fn test_backward_overlap_rejected() {
        let previous = MatchLocation::new(0, 2, 4);
        let current = MatchLocation::new(0, 3, 3);
        let err = validate_succession(5, previous, 3, current, 1).unwrap_err();
        assert!(matches!(err, AlignError::OrderingViolation { term_index: 5, .. }));
    }

    #[test]
    fn test_overlap_on_last_word_tolerated() {
        let previous = MatchLocation::new(0, 2, 4);
        let current = MatchLocation::new(0, 4, 5);
        assert!(validate_succession(1, previous, 3, current, 2).is_ok());
    }

    #[test]
    fn test_earlier_location_rejected() {
        let previous = MatchLocation::new(3, 0, 0);
        let current = MatchLocation::new(2, 5, 5);
        assert!(matches!(
            validate_succession(1, previous, 1, current, 1),
            Err(AlignError::OrderingViolation { .. })
        ));
    }

    #[test]
    fn test_later_lines_are_independent() {
        let previous = MatchLocation::new(0, 5, 9);
        let current = MatchLocation::new(1, 0, 0);
        assert!(validate_succession(1, previous, 5, current, 1).is_ok());
    }
}
