//! Canonical collection of LR(0) item sets and the SLR(1) automaton.
//!
//! States are discovered by subset construction from the closure of the
//! augmented start item. For each state, symbols are explored in increasing
//! code order and new states are appended in discovery order, so state
//! numbers depend only on the grammar and its production ids.

use crate::analysis::GrammarInformation;
use crate::error::Conflict;
use crate::grammar::{Grammar, ProdId, SymbolId};
use crate::item::{Item, ItemSet, closure, goto};
use crate::table::{ReduceTable, build_reduce_table};
use std::collections::BTreeMap;

/// An automaton state: its canonical item set and outgoing transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    items: ItemSet,
    /// Indexed by symbol code.
    step: Vec<Option<usize>>,
}

impl State {
    fn new(items: ItemSet, symbols_count: usize) -> Self {
        Self {
            items,
            step: vec![None; symbols_count],
        }
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn step(&self) -> &[Option<usize>] {
        &self.step
    }

    /// Target state on `sym`, if there is a transition.
    #[inline]
    pub fn transition(&self, sym: SymbolId) -> Option<usize> {
        self.step.get(sym).copied().flatten()
    }
}

/// Builds the canonical collection of LR(0) item sets.
///
/// State 0 is the closure of `!start -> . S`. Every state's `step` row is
/// fully populated; a `None` entry means "no transition".
pub fn canonical_collection(grammar: &Grammar) -> Vec<State> {
    let n_sym = grammar.symbols_count();
    let initial = closure([Item::initial(grammar, ProdId::START)], grammar);

    let mut numbering: BTreeMap<ItemSet, usize> = BTreeMap::new();
    numbering.insert(initial.clone(), 0);
    let mut states = vec![State::new(initial, n_sym)];

    // The state list doubles as the worklist.
    let mut i = 0;
    while i < states.len() {
        for sym in 0..n_sym {
            let next = goto(&states[i].items, sym, grammar);
            if next.is_empty() {
                continue;
            }
            let target = match numbering.get(&next) {
                Some(&target) => target,
                None => {
                    let target = states.len();
                    log::trace!(
                        "state {} on {} -> new state {} ({} items)",
                        i,
                        grammar.symbol_name(sym),
                        target,
                        next.len()
                    );
                    numbering.insert(next.clone(), target);
                    states.push(State::new(next, n_sym));
                    target
                }
            };
            states[i].step[sym] = Some(target);
        }
        i += 1;
    }
    log::debug!("{} LR(0) states for {:?}", states.len(), grammar.name());
    states
}

/// The SLR(1) automaton: states with transitions plus the reduce table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    reduces: ReduceTable,
    accepting: Option<usize>,
}

impl Automaton {
    /// Builds states and the reduce table; fails on the first conflict.
    pub fn build(grammar: &Grammar, info: &GrammarInformation) -> Result<Self, Conflict> {
        let states = canonical_collection(grammar);
        let reduces = build_reduce_table(&states, grammar, info)?;
        let accept_item = Item::initial(grammar, ProdId::START).advance();
        let accepting = states.iter().position(|s| s.items.contains(&accept_item));
        Ok(Self {
            states,
            reduces,
            accepting,
        })
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Panics if `idx` is not a state number.
    pub fn state(&self, idx: usize) -> &State {
        &self.states[idx]
    }

    pub fn reduces(&self) -> &ReduceTable {
        &self.reduces
    }

    /// The state holding `!start -> S .`, in which an exhausted input is
    /// accepted.
    pub fn accepting_state(&self) -> Option<usize> {
        self.accepting
    }
}
