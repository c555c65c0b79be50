//! SLR(1) reduce table and conflict detection.
//!
//! A reduce-ready item `L -> w .` in state `s` is placed at every column
//! `t` in FOLLOW(L). Two different productions claiming the same cell, or a
//! reduce on a terminal the state can also shift, is a fatal [`Conflict`].
//! There is no precedence or associativity to fall back on.

use crate::analysis::{GrammarInformation, Lookahead};
use crate::automaton::State;
use crate::error::Conflict;
use crate::grammar::Grammar;
use crate::item::Item;

/// Per state, a row of `symbols_count + 1` cells; the last one is EOF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReduceTable {
    symbols_count: usize,
    rows: Vec<Vec<Option<Item>>>,
}

impl ReduceTable {
    /// The item to reduce by in `state` on `lookahead`, if any.
    pub fn get(&self, state: usize, lookahead: Lookahead) -> Option<&Item> {
        self.rows
            .get(state)?
            .get(lookahead.slot(self.symbols_count))?
            .as_ref()
    }

    /// The full row of `state`. Panics if `state` is out of range.
    pub fn row(&self, state: usize) -> &[Option<Item>] {
        &self.rows[state]
    }

    pub fn rows(&self) -> &[Vec<Option<Item>>] {
        &self.rows
    }

    /// Width of a row without the EOF column.
    pub fn symbols_count(&self) -> usize {
        self.symbols_count
    }
}

/// Fills the reduce table for `states`, or reports the first conflict.
///
/// States are scanned in order, items in canonical order and lookaheads in
/// ascending order, so the reported conflict is deterministic.
pub fn build_reduce_table(
    states: &[State],
    grammar: &Grammar,
    info: &GrammarInformation,
) -> Result<ReduceTable, Conflict> {
    let n_sym = grammar.symbols_count();
    let mut rows = Vec::with_capacity(states.len());

    for (s, state) in states.iter().enumerate() {
        let mut row: Vec<Option<Item>> = vec![None; n_sym + 1];
        for item in state.items().iter().filter(|i| i.is_complete(grammar)) {
            for &la in info.follow(item.lhs) {
                let slot = la.slot(n_sym);
                if let Some(existing) = row[slot]
                    && existing.prod != item.prod
                {
                    let conflict = Conflict::ReduceReduce {
                        state: s,
                        existing: existing.prod,
                        incoming: item.prod,
                        lookahead: la,
                    };
                    log::warn!(
                        "{}: [{}] vs. [{}]",
                        conflict,
                        existing.display(grammar),
                        item.display(grammar)
                    );
                    return Err(conflict);
                }
                if let Lookahead::Terminal(t) = la
                    && let Some(target) = state.transition(t)
                {
                    let conflict = Conflict::ShiftReduce {
                        state: s,
                        production: item.prod,
                        symbol: t,
                        target,
                    };
                    log::warn!(
                        "{}: [{}] on {}",
                        conflict,
                        item.display(grammar),
                        grammar.symbol_name(t)
                    );
                    return Err(conflict);
                }
                row[slot] = Some(*item);
            }
        }
        rows.push(row);
    }

    log::debug!("reduce table built for {} states", rows.len());
    Ok(ReduceTable {
        symbols_count: n_sym,
        rows,
    })
}
