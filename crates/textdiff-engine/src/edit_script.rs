//! Edit script engine.
//!
//! Computes a minimal edit script between two symbol sequences using Myers'
//! O((N+M)·D) greedy algorithm ("An O(ND) Difference Algorithm and Its
//! Variations", 1986):
//!
//! 1. Strip the common prefix and suffix.
//! 2. Run the forward search, keeping a snapshot of the active diagonals
//!    for every edit distance `d`.
//! 3. Walk the snapshots backwards to recover the path. The backtrack is a
//!    loop, so stack depth does not grow with the input.
//! 4. Coalesce the path into runs. Every change region between two `Equal`
//!    runs becomes one `Delete` run followed by one `Insert` run.
//!
//! Only single-element deletes, inserts and retentions exist; there are no
//! substitutions or moves.

use std::collections::HashSet;
use std::ops::Range;

use tracing::debug;

use crate::error::{DiffError, DiffResult, ResourceLimit};
use crate::symbols::Symbol;

/// What an [`EditOp`] does with its run of symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditTag {
    /// The run is present on both sides.
    Equal,
    /// The run exists only in the old sequence.
    Delete,
    /// The run exists only in the new sequence.
    Insert,
}

/// One contiguous run of an edit script.
///
/// Offsets index into the original (untrimmed) symbol sequences. `Delete`
/// ops have `new_len == 0` and `Insert` ops have `old_len == 0`; their start
/// on the untouched side marks where the run sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditOp {
    pub tag: EditTag,
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

impl EditOp {
    /// Range consumed from the old sequence.
    pub fn old_range(&self) -> Range<usize> {
        self.old_start..self.old_start + self.old_len
    }

    /// Range consumed from the new sequence.
    pub fn new_range(&self) -> Range<usize> {
        self.new_start..self.new_start + self.new_len
    }

    /// Number of symbols the run covers.
    pub fn len(&self) -> usize {
        match self.tag {
            EditTag::Equal | EditTag::Delete => self.old_len,
            EditTag::Insert => self.new_len,
        }
    }

    /// Returns `true` for a zero-length run. Scripts never contain one.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Compute a minimal edit script transforming `old` into `new`.
///
/// The number of deleted plus inserted symbols equals
/// `(old.len() - L) + (new.len() - L)` where `L` is the length of a longest
/// common subsequence. `max_distance` bounds that number; exceeding it, or
/// failing to allocate the search trace, yields
/// [`DiffError::ResourceExhausted`].
pub fn edit_script(
    old: &[Symbol],
    new: &[Symbol],
    max_distance: Option<usize>,
) -> DiffResult<Vec<EditOp>> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];
    debug!(
        old = old.len(),
        new = new.len(),
        prefix,
        suffix,
        "trimmed common affixes"
    );

    let path = shortest_path(old_mid, new_mid, max_distance)?;

    let mut script = ScriptBuilder::default();
    for i in 0..prefix {
        script.equal(i, i);
    }
    let (mut x, mut y) = (prefix, prefix);
    for step in path {
        match step {
            EditTag::Equal => {
                script.equal(x, y);
                x += 1;
                y += 1;
            }
            EditTag::Delete => {
                script.delete(x, y);
                x += 1;
            }
            EditTag::Insert => {
                script.insert(x, y);
                y += 1;
            }
        }
    }
    for i in 0..suffix {
        script.equal(x + i, y + i);
    }

    Ok(script.finish())
}

/// Single-symbol steps from `(0, 0)` to `(a.len(), b.len())`.
fn shortest_path(
    a: &[Symbol],
    b: &[Symbol],
    max_distance: Option<usize>,
) -> DiffResult<Vec<EditTag>> {
    let (n, m) = (a.len(), b.len());

    if n == 0 || m == 0 || disjoint(a, b) {
        let distance = n + m;
        if let Some(limit) = max_distance.filter(|&limit| distance > limit) {
            return Err(DiffError::exhausted(ResourceLimit::EditLimit { limit }));
        }
        let mut path = try_vec(distance)?;
        path.extend(std::iter::repeat(EditTag::Delete).take(n));
        path.extend(std::iter::repeat(EditTag::Insert).take(m));
        return Ok(path);
    }

    let max = n + m;
    let limit = max_distance.map_or(max, |limit| limit.min(max));
    let offset = max as isize;
    let width = max
        .checked_mul(2)
        .and_then(|w| w.checked_add(2))
        .ok_or(DiffError::exhausted(ResourceLimit::Allocation))?;

    // v[k + offset] holds the furthest x reached on diagonal k = x - y.
    let mut v: Vec<usize> = try_vec(width)?;
    v.resize(width, 0);
    let mut trace: Vec<Vec<usize>> = Vec::new();

    for d in 0..=limit {
        let d_i = d as isize;
        let mut k = -d_i;
        while k <= d_i {
            let idx = (k + offset) as usize;
            let mut x = if k == -d_i || (k != d_i && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && a[x] == b[y] {
                x += 1;
                y += 1;
            }
            v[idx] = x;

            if x >= n && y >= m {
                push_snapshot(&mut trace, &v, offset, d)?;
                debug!(distance = d, "edit script search complete");
                return backtrack(&trace, n, m);
            }
            k += 2;
        }
        push_snapshot(&mut trace, &v, offset, d)?;
    }

    Err(DiffError::exhausted(ResourceLimit::EditLimit { limit }))
}

/// Record diagonals `-d..=d` of `v`, so `trace[d][k + d]` is the furthest x on `k`.
fn push_snapshot(
    trace: &mut Vec<Vec<usize>>,
    v: &[usize],
    offset: isize,
    d: usize,
) -> DiffResult<()> {
    let lo = (offset - d as isize) as usize;
    let hi = (offset + d as isize) as usize;
    let mut snapshot = try_vec(hi - lo + 1)?;
    snapshot.extend_from_slice(&v[lo..=hi]);
    trace
        .try_reserve(1)
        .map_err(|_| DiffError::exhausted(ResourceLimit::Allocation))?;
    trace.push(snapshot);
    Ok(())
}

fn backtrack(trace: &[Vec<usize>], n: usize, m: usize) -> DiffResult<Vec<EditTag>> {
    let mut path = try_vec(n + m)?;
    let (mut x, mut y) = (n as isize, m as isize);

    for d in (1..trace.len()).rev() {
        let d_i = d as isize;
        let prev = &trace[d - 1];
        let at = |k: isize| prev[(k + d_i - 1) as usize] as isize;

        let k = x - y;
        let prev_k = if k == -d_i || (k != d_i && at(k - 1) < at(k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = at(prev_k);
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            path.push(EditTag::Equal);
            x -= 1;
            y -= 1;
        }
        if prev_k == k + 1 {
            path.push(EditTag::Insert);
        } else {
            path.push(EditTag::Delete);
        }
        x = prev_x;
        y = prev_y;
    }
    while x > 0 && y > 0 {
        path.push(EditTag::Equal);
        x -= 1;
        y -= 1;
    }

    path.reverse();
    Ok(path)
}

fn disjoint(a: &[Symbol], b: &[Symbol]) -> bool {
    let seen: HashSet<Symbol> = a.iter().copied().collect();
    !b.iter().any(|s| seen.contains(s))
}

fn try_vec<T>(capacity: usize) -> DiffResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(capacity)
        .map_err(|_| DiffError::exhausted(ResourceLimit::Allocation))?;
    Ok(v)
}

/// Accumulates single-symbol steps into runs.
#[derive(Default)]
struct ScriptBuilder {
    ops: Vec<EditOp>,
    pending: Option<Change>,
}

/// A change region between two `Equal` runs.
#[derive(Clone, Copy)]
struct Change {
    old_start: usize,
    new_start: usize,
    deleted: usize,
    inserted: usize,
}

impl ScriptBuilder {
    fn equal(&mut self, x: usize, y: usize) {
        self.flush();
        if let Some(last) = self.ops.last_mut() {
            if last.tag == EditTag::Equal
                && last.old_range().end == x
                && last.new_range().end == y
            {
                last.old_len += 1;
                last.new_len += 1;
                return;
            }
        }
        self.ops.push(EditOp {
            tag: EditTag::Equal,
            old_start: x,
            old_len: 1,
            new_start: y,
            new_len: 1,
        });
    }

    fn delete(&mut self, x: usize, y: usize) {
        self.change_at(x, y).deleted += 1;
    }

    fn insert(&mut self, x: usize, y: usize) {
        self.change_at(x, y).inserted += 1;
    }

    fn change_at(&mut self, x: usize, y: usize) -> &mut Change {
        self.pending.get_or_insert(Change {
            old_start: x,
            new_start: y,
            deleted: 0,
            inserted: 0,
        })
    }

    fn flush(&mut self) {
        let Some(change) = self.pending.take() else {
            return;
        };
        if change.deleted > 0 {
            self.ops.push(EditOp {
                tag: EditTag::Delete,
                old_start: change.old_start,
                old_len: change.deleted,
                new_start: change.new_start,
                new_len: 0,
            });
        }
        if change.inserted > 0 {
            self.ops.push(EditOp {
                tag: EditTag::Insert,
                old_start: change.old_start + change.deleted,
                old_len: 0,
                new_start: change.new_start,
                new_len: change.inserted,
            });
        }
    }

    fn finish(mut self) -> Vec<EditOp> {
        self.flush();
        self.ops
    }
}
