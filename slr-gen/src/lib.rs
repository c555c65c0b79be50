//! SLR(1) parser-generator core.
//!
//! Given a context-free grammar, `slr-gen` computes nullable, FIRST and
//! FOLLOW sets, builds the canonical collection of LR(0) item sets, and
//! derives the SLR(1) reduce table. Any shift/reduce or reduce/reduce
//! conflict is a hard error: there is no precedence or associativity, so
//! an ambiguous grammar is never admitted silently.
//!
//! The pipeline is linear and computed once:
//!
//! ```text
//! GrammarBuilder -> Grammar -> GrammarInformation -> Automaton
//! ```
//!
//! # Example
//!
//! ```rust
//! use slr_gen::{GrammarBuilder, Slr};
//!
//! let mut b = GrammarBuilder::new("Balanced", "demo");
//! let s = b.nonterminal("S", []).unwrap();
//! let a = b.terminal("a", []).unwrap();
//! let z = b.terminal("b", []).unwrap();
//! b.production(s, [a, s, z]).unwrap();
//! b.production(s, []).unwrap();
//! b.start(s).unwrap();
//!
//! let slr = Slr::from_builder(b).unwrap();
//! let s = slr.grammar().symbol_code("S").unwrap();
//! assert!(slr.info().nullable(s));
//! assert!(slr.recognizer().recognize_names(&["a", "a", "b", "b"]).is_ok());
//! ```

pub mod analysis;
pub mod automaton;
pub mod driver;
pub mod dump;
pub mod error;
pub mod grammar;
pub mod item;
pub mod slr;
mod symtab;
pub mod table;

#[cfg(test)]
mod test_grammars;

pub use analysis::{GrammarInformation, Lookahead, analyze_in_order};
pub use automaton::{Automaton, State, canonical_collection};
pub use driver::{Recognizer, RecognizerStats};
pub use error::{BuildError, Conflict, GrammarError, SymKind};
pub use grammar::{
    AUGMENTED_START, Attribute, Grammar, GrammarBuilder, ProdId, Production, Sym, Symbol, SymbolId,
};
pub use item::{Item, ItemSet, closure, goto};
pub use slr::Slr;
pub use table::{ReduceTable, build_reduce_table};
