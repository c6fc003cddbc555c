// WHY: Resolves SuttaCentral ids, including ids inside a stored segment range, to files
// Ranges per app id are sorted by lower bound and never overlap

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::SegmentStoreError;

/// Dotted segment number such as `2.1.18`, compared as if zero padded (`1.0 == 1`)
#[derive(Debug, Clone)]
pub struct SegmentId(Vec<u64>);

impl SegmentId {
    pub fn parts(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for SegmentId {
    type Err = SegmentStoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(SegmentId)
            .map_err(|_| SegmentStoreError::InvalidId(s.to_string()))
    }
}

impl Ord for SegmentId {
    fn cmp(&self, other: &Self) -> Ordering {
        let width = self.0.len().max(other.0.len());
        let padded = |parts: &[u64], i: usize| parts.get(i).copied().unwrap_or(0);
        (0..width)
            .map(|i| padded(&self.0, i).cmp(&padded(&other.0, i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SegmentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SegmentId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for SegmentId {}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.0.iter().map(u64::to_string).collect();
        f.write_str(&text.join("."))
    }
}

/// Split `appid:segment` into its app id and parsed segment
pub fn parse_id(id: &str) -> Result<(&str, SegmentId), SegmentStoreError> {
    let (appid, segment) = id
        .split_once(':')
        .ok_or_else(|| SegmentStoreError::InvalidId(id.to_string()))?;
    let segment = segment
        .parse::<SegmentId>()
        .map_err(|_| SegmentStoreError::InvalidId(id.to_string()))?;
    Ok((appid, segment))
}

#[derive(Debug, Clone)]
struct SegmentRange {
    lower: SegmentId,
    upper: SegmentId,
    path: PathBuf,
}

impl SegmentRange {
    fn overlaps(&self, lower: &SegmentId, upper: &SegmentId) -> bool {
        self.lower <= *upper && *lower <= self.upper
    }

    fn contains(&self, segment: &SegmentId) -> bool {
        self.lower <= *segment && *segment <= self.upper
    }
}

/// On-disk form of the store, paths relative to a base folder
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    ranges: BTreeMap<String, Vec<(String, String, String)>>,
    plain: BTreeMap<String, String>,
}

/// Paths keyed by plain ids or by inclusive segment ranges
#[derive(Debug, Clone, Default)]
pub struct SegmentPathStore {
    ranges: HashMap<String, Vec<SegmentRange>>,
    plain: HashMap<String, PathBuf>,
}

impl SegmentPathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from JSON written by [`SegmentPathStore::to_json`]
    pub fn from_json(json: &str, base: &Path) -> Result<Self, SegmentStoreError> {
        let mut store = Self::new();
        store.load_json(json, base)?;
        Ok(store)
    }

    /// Associate `path` with the ids `lower_id..=upper_id`.
    ///
    /// A `lower_id` without an app id, an empty `upper_id`, or equal bounds
    /// store `lower_id` as an exact key.
    pub fn add(
        &mut self,
        lower_id: &str,
        upper_id: &str,
        path: impl Into<PathBuf>,
    ) -> Result<(), SegmentStoreError> {
        let path = path.into();
        if !lower_id.contains(':') || lower_id == upper_id || upper_id.is_empty() {
            self.plain.insert(lower_id.to_string(), path);
            return Ok(());
        }

        let (lower_app, lower) = parse_id(lower_id)?;
        let (upper_app, upper) = parse_id(upper_id)?;

        if lower_app != upper_app {
            return Err(SegmentStoreError::AppIdMismatch {
                lower: lower_app.to_string(),
                upper: upper_app.to_string(),
            });
        }
        if lower > upper {
            return Err(SegmentStoreError::InvertedRange {
                lower: lower_id.to_string(),
                upper: upper_id.to_string(),
            });
        }

        let ranges = self.ranges.entry(lower_app.to_string()).or_default();
        let insert_at = ranges.partition_point(|r| (&r.lower, &r.upper) < (&lower, &upper));

        let neighbours = insert_at.saturating_sub(1)..(insert_at + 1).min(ranges.len());
        if let Some(existing) = ranges[neighbours]
            .iter()
            .find(|r| r.overlaps(&lower, &upper))
        {
            return Err(SegmentStoreError::Overlap {
                lower: lower_id.to_string(),
                upper: upper_id.to_string(),
                existing_lower: format!("{}:{}", lower_app, existing.lower),
                existing_upper: format!("{}:{}", lower_app, existing.upper),
            });
        }

        ranges.insert(insert_at, SegmentRange { lower, upper, path });
        Ok(())
    }

    /// Path stored for `id`, either as an exact key or through a range containing it.
    /// Malformed ids resolve to nothing.
    pub fn get(&self, id: &str) -> Option<&Path> {
        if let Some(path) = self.plain.get(id) {
            return Some(path.as_path());
        }
        let (appid, segment) = parse_id(id).ok()?;
        let ranges = self.ranges.get(appid)?;

        let after = ranges.partition_point(|r| r.lower <= segment);
        ranges[after.saturating_sub(1)..(after + 1).min(ranges.len())]
            .iter()
            .find(|r| r.contains(&segment))
            .map(|r| r.path.as_path())
    }

    /// Number of stored exact keys and ranges
    pub fn len(&self) -> usize {
        self.plain.len() + self.ranges.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize with every path written relative to `base`
    pub fn to_json(&self, base: &Path) -> Result<String, SegmentStoreError> {
        let relative = |path: &Path| -> Result<String, SegmentStoreError> {
            path.strip_prefix(base)
                .map(|p| p.to_string_lossy().into_owned())
                .map_err(|_| SegmentStoreError::PathOutsideBase {
                    path: path.display().to_string(),
                    base: base.display().to_string(),
                })
        };

        let mut document = StoreDocument::default();
        for (appid, ranges) in &self.ranges {
            let entries = ranges
                .iter()
                .map(|r| Ok((r.lower.to_string(), r.upper.to_string(), relative(&r.path)?)))
                .collect::<Result<Vec<_>, SegmentStoreError>>()?;
            document.ranges.insert(appid.clone(), entries);
        }
        for (id, path) in &self.plain {
            document.plain.insert(id.clone(), relative(path)?);
        }

        Ok(serde_json::to_string(&document)?)
    }

    /// Replace the contents with JSON from [`SegmentPathStore::to_json`], resolving paths
    /// against `base`. Ranges are taken as written, without overlap checks.
    pub fn load_json(&mut self, json: &str, base: &Path) -> Result<(), SegmentStoreError> {
        let document: StoreDocument = serde_json::from_str(json)?;

        let mut ranges = HashMap::with_capacity(document.ranges.len());
        for (appid, entries) in document.ranges {
            let parsed = entries
                .into_iter()
                .map(|(lower, upper, path)| {
                    Ok(SegmentRange {
                        lower: lower.parse()?,
                        upper: upper.parse()?,
                        path: base.join(path),
                    })
                })
                .collect::<Result<Vec<_>, SegmentStoreError>>()?;
            ranges.insert(appid, parsed);
        }

        self.ranges = ranges;
        self.plain = document
            .plain
            .into_iter()
            .map(|(id, path)| (id, base.join(path)))
            .collect();
        Ok(())
    }
}
