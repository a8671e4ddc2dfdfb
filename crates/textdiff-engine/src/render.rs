//! Diff renderer: expands an edit script into numbered records.

use crate::edit_script::{EditOp, EditTag};
use crate::symbols::{Symbol, SymbolTable};
use crate::types::{DiffLine, DiffStats, TextDiff};

/// Walk `ops` in order and emit one [`DiffLine`] per symbol.
///
/// Old and new line counters both start at 1 and advance independently:
/// `Equal` advances both, `Delete` only the old side, `Insert` only the new.
pub fn render(
    ops: &[EditOp],
    old: &[Symbol],
    new: &[Symbol],
    table: &SymbolTable<'_>,
) -> TextDiff {
    let capacity = ops.iter().map(EditOp::len).sum();
    let mut lines = Vec::with_capacity(capacity);
    let mut old_line = 1;
    let mut new_line = 1;
    let mut additions = 0;
    let mut deletions = 0;

    for op in ops {
        match op.tag {
            EditTag::Equal => {
                for &symbol in &old[op.old_range()] {
                    lines.push(DiffLine::equal(table.line(symbol), old_line, new_line));
                    old_line += 1;
                    new_line += 1;
                }
            }
            EditTag::Delete => {
                for &symbol in &old[op.old_range()] {
                    lines.push(DiffLine::delete(table.line(symbol), old_line));
                    old_line += 1;
                    deletions += 1;
                }
            }
            EditTag::Insert => {
                for &symbol in &new[op.new_range()] {
                    lines.push(DiffLine::insert(table.line(symbol), new_line));
                    new_line += 1;
                    additions += 1;
                }
            }
        }
    }

    TextDiff {
        lines,
        stats: DiffStats::from_counts(additions, deletions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_script::edit_script;
    use crate::symbols::intern;

    fn render_lines(old: &[&str], new: &[&str]) -> TextDiff {
        let interned = intern(old, new).unwrap();
        let ops = edit_script(&interned.old, &interned.new, None).unwrap();
        render(&ops, &interned.old, &interned.new, &interned.table)
    }

    #[test]
    fn numbers_advance_per_side() {
        let diff = render_lines(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            diff.lines,
            vec![
                DiffLine::equal("a", 1, 1),
                DiffLine::delete("b", 2),
                DiffLine::insert("x", 2),
                DiffLine::equal("c", 3, 3),
            ]
        );
        assert_eq!(diff.stats, DiffStats::from_counts(1, 1));
    }

    #[test]
    fn uneven_change_shifts_numbering() {
        let diff = render_lines(&["a", "b", "c", "d"], &["a", "d", "e"]);
        assert_eq!(
            diff.lines,
            vec![
                DiffLine::equal("a", 1, 1),
                DiffLine::delete("b", 2),
                DiffLine::delete("c", 3),
                DiffLine::equal("d", 4, 2),
                DiffLine::insert("e", 3),
            ]
        );
        assert_eq!(diff.stats.additions(), 1);
        assert_eq!(diff.stats.deletions(), 2);
        assert_eq!(diff.stats.changes(), 3);
    }

    #[test]
    fn empty_script_renders_nothing() {
        let diff = render(&[], &[], &[], &SymbolTable::default());
        assert!(diff.is_empty());
        assert_eq!(diff.stats, DiffStats::default());
    }
}
