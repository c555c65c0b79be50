//! Error types produced while building a grammar and its SLR(1) tables.
//!
//! [`GrammarError`] covers structural problems detected by the
//! [`GrammarBuilder`](crate::GrammarBuilder). [`Conflict`] is the fatal
//! outcome of table construction for a grammar that is not SLR(1); no
//! partial table is ever returned alongside it. [`BuildError`] wraps both
//! for callers that go from builder to tables in one step.

use crate::analysis::Lookahead;
use crate::grammar::ProdId;
use smartstring::alias::String;
use thiserror::Error;

/// Which of the builder's symbol tables a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymKind {
    NonTerm,
    Term,
}

impl std::fmt::Display for SymKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymKind::NonTerm => write!(f, "nonterminal"),
            SymKind::Term => write!(f, "terminal"),
        }
    }
}

/// Structural errors raised while assembling a [`Grammar`](crate::Grammar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// The same name was declared twice (across terminals and nonterminals).
    #[error("symbol {name:?} is declared more than once")]
    DuplicateSymbol { name: String },

    /// A name lookup did not match any declared symbol.
    #[error("unknown symbol {name:?}")]
    UnknownSymbol { name: String },

    /// A handle that was not issued by this builder.
    #[error("invalid {kind} handle {index} (only {len} declared)")]
    InvalidSymbol {
        kind: SymKind,
        index: usize,
        len: usize,
    },

    /// A production was given a terminal as its left-hand side.
    #[error("left-hand side {name:?} is not a nonterminal")]
    LeftSideNotNonterminal { name: String },

    /// `build` was called before a start symbol was chosen.
    #[error("no start symbol declared")]
    MissingStart,

    /// The name is reserved for the augmented start symbol.
    #[error("symbol name {name:?} is reserved")]
    ReservedName { name: String },
}

/// A fatal SLR(1) table conflict.
///
/// Symbol codes are grammar codes; `lookahead` distinguishes EOF from real
/// terminals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    /// A reduce-ready item competes with a transition on the same terminal.
    #[error(
        "shift/reduce conflict in state {state}: reduce by production {production} \
         vs. shift on symbol {symbol} to state {target}"
    )]
    ShiftReduce {
        state: usize,
        production: ProdId,
        symbol: usize,
        target: usize,
    },

    /// Two different productions are reduce-ready on the same lookahead.
    #[error(
        "reduce/reduce conflict in state {state}: productions {existing} and {incoming} \
         on {lookahead}"
    )]
    ReduceReduce {
        state: usize,
        existing: ProdId,
        incoming: ProdId,
        lookahead: Lookahead,
    },
}

impl Conflict {
    /// The state in which the conflict was found.
    pub fn state(&self) -> usize {
        match self {
            Conflict::ShiftReduce { state, .. } | Conflict::ReduceReduce { state, .. } => *state,
        }
    }
}

/// Any failure on the way from a [`GrammarBuilder`](crate::GrammarBuilder)
/// to a finished [`Slr`](crate::Slr).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("{0}")]
    Conflict(#[from] Conflict),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<GrammarError>();
        _assert_send_sync_static::<Conflict>();
        _assert_send_sync_static::<BuildError>();
    }

    #[test]
    fn conflict_messages_carry_context() {
        let sr = Conflict::ShiftReduce {
            state: 7,
            production: ProdId(3),
            symbol: 5,
            target: 9,
        };
        let msg = sr.to_string();
        assert!(msg.contains("shift/reduce"));
        assert!(msg.contains("state 7"));
        assert!(msg.contains("production 3"));
        assert!(msg.contains("symbol 5"));

        let rr = Conflict::ReduceReduce {
            state: 2,
            existing: ProdId(1),
            incoming: ProdId(4),
            lookahead: Lookahead::Eof,
        };
        let msg = rr.to_string();
        assert!(msg.contains("reduce/reduce"));
        assert!(msg.contains("productions 1 and 4"));
        assert!(msg.contains("$"));
        assert_eq!(rr.state(), 2);
    }

    #[test]
    fn build_error_wraps_both_layers() {
        let err: BuildError = GrammarError::MissingStart.into();
        assert!(matches!(err, BuildError::Grammar(GrammarError::MissingStart)));
        assert!(err.to_string().contains("no start symbol"));

        let conflict = Conflict::ShiftReduce {
            state: 0,
            production: ProdId(1),
            symbol: 2,
            target: 3,
        };
        let err: BuildError = conflict.clone().into();
        assert_eq!(err, BuildError::Conflict(conflict));
    }
}
