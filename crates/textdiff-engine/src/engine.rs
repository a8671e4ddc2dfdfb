//! Entry points: the tokenize → intern → edit script → render → normalize
//! pipeline.
//!
//! Everything here is a free function over borrowed input. Each call builds
//! its own symbol table and trace, so concurrent calls share nothing.

use tracing::{debug, warn};

use crate::config::DiffConfig;
use crate::edit_script::edit_script;
use crate::error::{DiffError, DiffResult, ResourceLimit};
use crate::normalize::normalize;
use crate::render::render;
use crate::symbols::intern;
use crate::tokenize::diff_lines;
use crate::types::{DiffReport, TextDiff};

/// Compute a line diff between two texts with no size limits.
pub fn compute_diff(old_text: &str, new_text: &str) -> DiffResult<TextDiff> {
    compute_diff_with(old_text, new_text, &DiffConfig::default())
}

/// Compute a line diff between two texts under `config`'s limits.
///
/// Either returns a complete diff or a [`DiffError::ResourceExhausted`];
/// partial results are never produced.
pub fn compute_diff_with(
    old_text: &str,
    new_text: &str,
    config: &DiffConfig,
) -> DiffResult<TextDiff> {
    let old_lines = diff_lines(old_text);
    let new_lines = diff_lines(new_text);

    let total = old_lines.len() + new_lines.len();
    if let Some(limit) = config.max_lines.filter(|&limit| total > limit) {
        warn!(lines = total, limit, "diff input exceeds line limit");
        return Err(DiffError::exhausted(ResourceLimit::LineLimit {
            lines: total,
            limit,
        }));
    }

    let interned = intern(&old_lines, &new_lines)?;
    debug!(
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        symbols = interned.table.len(),
        "interned lines"
    );

    let ops = edit_script(&interned.old, &interned.new, config.max_edit_distance)
        .inspect_err(|e| warn!(error = %e, "edit script computation failed"))?;
    let diff = render(&ops, &interned.old, &interned.new, &interned.table);

    debug!(
        records = diff.len(),
        additions = diff.stats.additions(),
        deletions = diff.stats.deletions(),
        "diff rendered"
    );
    Ok(normalize(old_text, new_text, diff))
}

/// Diff two texts into the wire form consumed by service layers.
///
/// Never fails: a resource error is reported in [`DiffReport::error`] with
/// empty lines and zero stats.
pub fn text_diff(old_text: &str, new_text: &str, config: &DiffConfig) -> DiffReport {
    DiffReport::from_result(compute_diff_with(old_text, new_text, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiffLine, DiffStats, LineKind};

    #[test]
    fn identity_is_all_equal() {
        let text = "alpha\nbeta\n\ngamma";
        let diff = compute_diff(text, text).unwrap();
        assert_eq!(diff.len(), 4);
        assert!(diff.lines.iter().all(|l| l.kind == LineKind::Equal));
        assert_eq!(diff.stats, DiffStats::default());
    }

    #[test]
    fn empty_vs_empty() {
        let diff = compute_diff("", "").unwrap();
        assert!(diff.is_empty());
        assert_eq!(diff.stats, DiffStats::from_counts(0, 0));
    }

    #[test]
    fn pure_insertion() {
        let diff = compute_diff("", "a\nb").unwrap();
        assert_eq!(diff.lines, vec![DiffLine::insert("a", 1), DiffLine::insert("b", 2)]);
        assert_eq!(diff.stats, DiffStats::from_counts(2, 0));
        assert_eq!(diff.stats.changes(), 2);
    }

    #[test]
    fn pure_deletion() {
        let diff = compute_diff("a\nb", "").unwrap();
        assert_eq!(diff.lines, vec![DiffLine::delete("a", 1), DiffLine::delete("b", 2)]);
        assert_eq!(diff.stats, DiffStats::from_counts(0, 2));
    }

    #[test]
    fn single_line_change() {
        let diff = compute_diff("a\nb\nc", "a\nx\nc").unwrap();
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
    fn trailing_newline_adds_no_line() {
        let diff = compute_diff("a\nb\n", "a\nb").unwrap();
        assert_eq!(diff.len(), 2);
        assert!(!diff.has_changes());
    }

    #[test]
    fn blank_line_is_a_real_line() {
        let diff = compute_diff("a\n\nb", "a\nb").unwrap();
        assert_eq!(
            diff.lines,
            vec![
                DiffLine::equal("a", 1, 1),
                DiffLine::delete("", 2),
                DiffLine::equal("b", 3, 2),
            ]
        );
    }

    #[test]
    fn whitespace_is_significant() {
        let diff = compute_diff("a \nb", "a\nb").unwrap();
        assert_eq!(diff.stats, DiffStats::from_counts(1, 1));
    }

    #[test]
    fn line_limit_rejects_large_input() {
        let config = DiffConfig {
            max_lines: Some(3),
            ..Default::default()
        };
        let err = compute_diff_with("a\nb", "c\nd", &config).unwrap_err();
        assert_eq!(
            err,
            DiffError::ResourceExhausted {
                reason: ResourceLimit::LineLimit { lines: 4, limit: 3 }
            }
        );
    }

    #[test]
    fn report_on_error_is_empty() {
        let config = DiffConfig {
            max_edit_distance: Some(1),
            ..Default::default()
        };
        let report = text_diff("a\nb", "c\nd", &config);
        assert!(report.is_error());
        assert!(report.lines.is_empty());
        assert_eq!(report.stats, DiffStats::default());
    }

    #[test]
    fn report_on_success_has_no_error() {
        let report = text_diff("a", "b", &DiffConfig::bounded());
        assert!(!report.is_error());
        assert_eq!(report.lines.len(), 2);
        assert_eq!(report.stats.changes(), 2);
    }

    #[test]
    fn callable_from_many_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let old = format!("a\nb{i}\nc");
                    compute_diff(&old, "a\nb\nc").unwrap().stats
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), DiffStats::from_counts(1, 1));
        }
    }
}
