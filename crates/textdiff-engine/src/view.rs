//! Display projections of a [`TextDiff`].
//!
//! - [`unified_rows`]: one row per record, both gutters, `+`/`-`/` ` marker.
//! - [`split_rows`]: side-by-side rows where a deletion leaves a gap on the
//!   right and an insertion leaves a gap on the left.

use std::fmt;

use crate::types::{DiffLine, LineKind, TextDiff};

/// One row of a unified view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnifiedRow<'a> {
    pub kind: LineKind,
    pub old_line: Option<usize>,
    pub new_line: Option<usize>,
    pub content: &'a str,
}

impl fmt::Display for UnifiedRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} {:>5} {}{}",
            Gutter(self.old_line),
            Gutter(self.new_line),
            self.kind.marker(),
            self.content
        )
    }
}

/// One side of a split-view row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitCell<'a> {
    Line {
        number: usize,
        content: &'a str,
        kind: LineKind,
    },
    /// Filler opposite an insertion or deletion.
    Empty,
}

impl SplitCell<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One row of a side-by-side view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitRow<'a> {
    pub left: SplitCell<'a>,
    pub right: SplitCell<'a>,
}

/// Project `diff` into unified rows.
pub fn unified_rows(diff: &TextDiff) -> Vec<UnifiedRow<'_>> {
    diff.lines
        .iter()
        .map(|line| UnifiedRow {
            kind: line.kind,
            old_line: line.old_line,
            new_line: line.new_line,
            content: &line.content,
        })
        .collect()
}

/// Project `diff` into side-by-side rows, one row per record.
pub fn split_rows(diff: &TextDiff) -> Vec<SplitRow<'_>> {
    diff.lines.iter().map(split_row).collect()
}

fn split_row(line: &DiffLine) -> SplitRow<'_> {
    let cell = |number: Option<usize>| match number {
        Some(number) => SplitCell::Line {
            number,
            content: &line.content,
            kind: line.kind,
        },
        None => SplitCell::Empty,
    };
    SplitRow {
        left: cell(line.old_line),
        right: cell(line.new_line),
    }
}

struct Gutter(Option<usize>);

impl fmt::Display for Gutter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => fmt::Display::fmt(&n, f),
            None => fmt::Display::fmt("", f),
        }
    }
}
