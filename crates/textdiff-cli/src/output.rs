//! Terminal rendering of diffs.

use std::fmt::Write;

use colored::{ColoredString, Colorize};
use textdiff_engine::{split_rows, unified_rows, LineKind, SplitCell, TextDiff};

use crate::cli::ViewMode;

/// Render `diff` as text in the chosen view, followed by the summary line.
pub fn format_diff(diff: &TextDiff, view: ViewMode, color: bool) -> String {
    let mut out = String::new();
    match view {
        ViewMode::Unified => {
            for row in unified_rows(diff) {
                let _ = writeln!(out, "{}", paint(row.kind, &row.to_string(), color));
            }
        }
        ViewMode::Split => write_split(&mut out, diff, color),
    }
    if !diff.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", format_summary(diff, color));
    out
}

/// The one-line summary, e.g. `+1 additions, -1 deletions, 2 changes total`.
pub fn format_summary(diff: &TextDiff, color: bool) -> String {
    if !color {
        return diff.summary();
    }
    let stats = diff.stats;
    format!(
        "{}, {}, {} changes total",
        format!("+{} additions", stats.additions()).green(),
        format!("-{} deletions", stats.deletions()).red(),
        stats.changes().to_string().bold()
    )
}

fn write_split(out: &mut String, diff: &TextDiff, color: bool) {
    let rows = split_rows(diff);
    let width = rows
        .iter()
        .filter_map(|row| match row.left {
            SplitCell::Line { content, .. } => Some(content.chars().count()),
            SplitCell::Empty => None,
        })
        .max()
        .unwrap_or(0);

    for row in rows {
        let left = cell_text(&row.left, width);
        let right = cell_text(&row.right, 0);
        let line = format!(
            "{} │ {}",
            paint_cell(&row.left, &left, color),
            paint_cell(&row.right, &right, color)
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

fn cell_text(cell: &SplitCell<'_>, width: usize) -> String {
    match cell {
        SplitCell::Line { number, content, kind } => {
            format!("{number:>5} {}{content:<width$}", kind.marker())
        }
        SplitCell::Empty => format!("{:>5}  {:<width$}", "", ""),
    }
}

fn paint_cell(cell: &SplitCell<'_>, text: &str, color: bool) -> ColoredString {
    match cell {
        SplitCell::Line { kind, .. } => paint(*kind, text, color),
        SplitCell::Empty => text.normal(),
    }
}

fn paint(kind: LineKind, text: &str, color: bool) -> ColoredString {
    if !color {
        return text.normal();
    }
    match kind {
        LineKind::Insert => text.green(),
        LineKind::Delete => text.red(),
        LineKind::Equal => text.normal(),
    }
}
