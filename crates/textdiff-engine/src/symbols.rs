//! Sequence compressor: interns distinct lines as small integer symbols.
//!
//! The edit script engine compares symbols instead of strings. Symbols are
//! handed out in first-seen order while scanning the old lines and then the
//! new lines, and the table is local to one comparison.

use std::collections::HashMap;

use crate::error::{DiffError, DiffResult, ResourceLimit};

/// Integer alias for one distinct line within a single comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    /// The symbol's position in the table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reverse lookup from [`Symbol`] to line text.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SymbolTable<'a> {
    /// The line text a symbol stands for.
    ///
    /// # Panics
    ///
    /// Panics if `symbol` was not produced by this table.
    pub fn line(&self, symbol: Symbol) -> &'a str {
        self.lines[symbol.index()]
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no lines were interned.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Output of [`intern`]: the shared table and both symbol sequences.
#[derive(Clone, Debug)]
pub struct Interned<'a> {
    pub table: SymbolTable<'a>,
    pub old: Vec<Symbol>,
    pub new: Vec<Symbol>,
}

/// Map both line sequences onto one shared symbol table.
///
/// The returned sequences have the same lengths as the inputs.
pub fn intern<'a>(old_lines: &[&'a str], new_lines: &[&'a str]) -> DiffResult<Interned<'a>> {
    let mut interner = Interner::default();
    let old = interner.map(old_lines)?;
    let new = interner.map(new_lines)?;

    Ok(Interned {
        table: interner.table,
        old,
        new,
    })
}

#[derive(Default)]
struct Interner<'a> {
    ids: HashMap<&'a str, Symbol>,
    table: SymbolTable<'a>,
}

impl<'a> Interner<'a> {
    fn map(&mut self, lines: &[&'a str]) -> DiffResult<Vec<Symbol>> {
        let mut out = Vec::with_capacity(lines.len());
        for &line in lines {
            out.push(self.symbol_for(line)?);
        }
        Ok(out)
    }

    fn symbol_for(&mut self, line: &'a str) -> DiffResult<Symbol> {
        if let Some(&symbol) = self.ids.get(line) {
            return Ok(symbol);
        }
        let distinct = self.table.lines.len();
        let next = u32::try_from(distinct)
            .map_err(|_| DiffError::exhausted(ResourceLimit::SymbolSpace { distinct }))?;
        let symbol = Symbol(next);
        self.ids.insert(line, symbol);
        self.table.lines.push(line);
        Ok(symbol)
    }
}
