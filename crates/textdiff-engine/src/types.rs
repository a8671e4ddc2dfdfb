//! Rendered diff records and their wire representation.
//!
//! The JSON shape matches what the desktop front end consumes:
//!
//! ```json
//! {
//!   "lines": [{"type": "delete", "content": "b", "oldLine": 2, "newLine": 0}],
//!   "stats": {"additions": 0, "deletions": 1, "changes": 1},
//!   "error": ""
//! }
//! ```
//!
//! An absent line number is written as `0`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Kind of a rendered diff record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Equal,
    Insert,
    Delete,
}

impl LineKind {
    /// The unified-diff marker for this kind.
    pub fn marker(self) -> char {
        match self {
            Self::Equal => ' ',
            Self::Insert => '+',
            Self::Delete => '-',
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "equal",
            Self::Insert => "insert",
            Self::Delete => "delete",
        })
    }
}

/// One line of diff output.
///
/// `Equal` records carry both line numbers, `Delete` only the old one and
/// `Insert` only the new one. Line numbers are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub content: String,
    #[serde(with = "line_number")]
    pub old_line: Option<usize>,
    #[serde(with = "line_number")]
    pub new_line: Option<usize>,
}

impl DiffLine {
    pub fn equal(content: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            kind: LineKind::Equal,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    pub fn delete(content: impl Into<String>, old_line: usize) -> Self {
        Self {
            kind: LineKind::Delete,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    pub fn insert(content: impl Into<String>, new_line: usize) -> Self {
        Self {
            kind: LineKind::Insert,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }
}

/// Aggregate counts for a diff. `changes` is always `additions + deletions`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatsRepr")]
pub struct DiffStats {
    additions: usize,
    deletions: usize,
    changes: usize,
}

impl DiffStats {
    pub fn from_counts(additions: usize, deletions: usize) -> Self {
        Self {
            additions,
            deletions,
            changes: additions + deletions,
        }
    }

    /// Number of inserted lines.
    pub fn additions(&self) -> usize {
        self.additions
    }

    /// Number of deleted lines.
    pub fn deletions(&self) -> usize {
        self.deletions
    }

    /// Inserted plus deleted lines.
    pub fn changes(&self) -> usize {
        self.changes
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{} additions, -{} deletions, {} changes total",
            self.additions, self.deletions, self.changes
        )
    }
}

// Incoming `changes` values are ignored and recomputed.
#[derive(Deserialize)]
struct StatsRepr {
    additions: usize,
    deletions: usize,
}

impl From<StatsRepr> for DiffStats {
    fn from(repr: StatsRepr) -> Self {
        Self::from_counts(repr.additions, repr.deletions)
    }
}

/// A successfully computed diff: the ordered records plus their counts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDiff {
    /// Records in emission order.
    pub lines: Vec<DiffLine>,
    /// Counts derived from `lines`.
    pub stats: DiffStats,
}

impl TextDiff {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there are no records at all.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns `true` if any line was inserted or deleted.
    pub fn has_changes(&self) -> bool {
        self.stats.changes() > 0
    }

    /// Human-readable summary, e.g. `+1 additions, -1 deletions, 2 changes total`.
    pub fn summary(&self) -> String {
        self.stats.to_string()
    }

    /// Lines of the old text, in order.
    pub fn old_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Insert)
            .map(|l| l.content.as_str())
    }

    /// Lines of the new text, in order.
    pub fn new_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Delete)
            .map(|l| l.content.as_str())
    }
}

/// Wire form of a diff: either a full result or an error with no data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
    /// Empty on success.
    #[serde(default)]
    pub error: String,
}

impl DiffReport {
    /// Build a report from an engine result. Errors never carry partial data.
    pub fn from_result(result: Result<TextDiff, DiffError>) -> Self {
        match result {
            Ok(diff) => Self {
                lines: diff.lines,
                stats: diff.stats,
                error: String::new(),
            },
            Err(err) => Self {
                lines: Vec::new(),
                stats: DiffStats::default(),
                error: err.to_string(),
            },
        }
    }

    /// Returns `true` if the report carries an error.
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

impl From<TextDiff> for DiffReport {
    fn from(diff: TextDiff) -> Self {
        Self::from_result(Ok(diff))
    }
}

/// `Option<usize>` line numbers serialized with `0` standing for `None`.
mod line_number {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.unwrap_or(0) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let n = usize::deserialize(deserializer)?;
        Ok((n != 0).then_some(n))
    }
}
