//! Line-level text diff engine.
//!
//! Compares two texts line by line and produces a flat, numbered sequence of
//! diff records with aggregate statistics. The pipeline has five stages,
//! each a pure function:
//!
//! 1. [`tokenize`] splits text into lines.
//! 2. [`symbols`] interns each distinct line as a small integer.
//! 3. [`edit_script`](mod@edit_script) computes a minimal edit script (Myers) over the symbols.
//! 4. [`render`] expands the script into numbered [`DiffLine`] records.
//! 5. [`normalize`] maps empty-versus-empty input to an empty result.
//!
//! # Key Types
//!
//! - [`TextDiff`] / [`DiffLine`] / [`DiffStats`] -- Result of [`compute_diff`]
//! - [`DiffReport`] -- JSON wire form with an inline error string
//! - [`DiffConfig`] -- Size limits for untrusted input
//! - [`UnifiedRow`] / [`SplitRow`] -- Display projections
//!
//! ```
//! use textdiff_engine::{compute_diff, DiffLine};
//!
//! let diff = compute_diff("a\nb\nc", "a\nx\nc").unwrap();
//! assert_eq!(diff.lines[1], DiffLine::delete("b", 2));
//! assert_eq!(diff.lines[2], DiffLine::insert("x", 2));
//! assert_eq!(diff.stats.changes(), 2);
//! ```

pub mod config;
pub mod edit_script;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod render;
pub mod symbols;
pub mod tokenize;
pub mod types;
pub mod view;

pub use config::DiffConfig;
pub use edit_script::{edit_script, EditOp, EditTag};
pub use engine::{compute_diff, compute_diff_with, text_diff};
pub use error::{DiffError, DiffResult, ResourceLimit};
pub use symbols::{intern, Interned, Symbol, SymbolTable};
pub use tokenize::{diff_lines, split_lines};
pub use types::{DiffLine, DiffReport, DiffStats, LineKind, TextDiff};
pub use view::{split_rows, unified_rows, SplitCell, SplitRow, UnifiedRow};
