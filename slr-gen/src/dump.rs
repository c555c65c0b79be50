//! Human-readable dumps of a grammar's productions, item sets, FIRST/FOLLOW
//! sets and action table, for debugging and grammar inspection.
//!
//! Every line is a comma-separated record tagged by its first field:
//!
//! ```text
//! PS,<number of productions>
//! P,<id>,<LHS> -> <RHS symbols>
//! CS,<number of states>
//! C,<state>,<item>
//! FIRST,<nonterminal>,{<terminals>, }
//! FOLLOW,<nonterminal>,{<terminals or $>, }
//! TS,<number of states>
//! A,<state>,<symbol or $>,<action>
//! ```

use crate::analysis::{GrammarInformation, Lookahead};
use crate::automaton::{Automaton, State};
use crate::grammar::{Grammar, ProdId};
use std::io::{self, Write};

fn lookahead_name<'a>(grammar: &'a Grammar, la: Lookahead) -> &'a str {
    match la {
        Lookahead::Terminal(t) => grammar.symbol_name(t),
        Lookahead::Eof => "$",
    }
}

/// Writes all productions, one per line.
pub fn write_prods<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "PS,{}\n", grammar.productions().len())?;
    for prod in grammar.productions() {
        write!(
            out,
            "P,{},{} -> ",
            prod.id(),
            grammar.symbol_name(prod.lhs())
        )?;
        for &sym in prod.rhs() {
            write!(out, "{} ", grammar.symbol_name(sym))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the item set of every state, followed by a blank line.
pub fn write_states<W: Write>(out: &mut W, grammar: &Grammar, states: &[State]) -> io::Result<()> {
    writeln!(out, "CS,{}\n", states.len())?;
    for (i, state) in states.iter().enumerate() {
        for item in state.items() {
            writeln!(out, "C,{},{}", i, item.display(grammar))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes FIRST sets (with `` `empty' `` for nullable nonterminals), then
/// FOLLOW sets.
pub fn write_sets<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    info: &GrammarInformation,
) -> io::Result<()> {
    for nt in grammar.nonterminals() {
        write!(out, "FIRST,{},{{", grammar.symbol_name(nt))?;
        if info.nullable(nt) {
            write!(out, "`empty', ")?;
        }
        for &t in info.first(nt) {
            write!(out, "{}, ", grammar.symbol_name(t))?;
        }
        writeln!(out, "}}")?;
    }
    writeln!(out)?;
    for nt in grammar.nonterminals() {
        write!(out, "FOLLOW,{},{{", grammar.symbol_name(nt))?;
        for &la in info.follow(nt) {
            write!(out, "{}, ", lookahead_name(grammar, la))?;
        }
        writeln!(out, "}}")?;
    }
    Ok(())
}

/// Writes the non-error actions of every state.
///
/// Terminals get `Shift(state)`, nonterminals `Goto(state)`, reduce cells
/// `Reduce(production)`; the accepting state reports `Accept` on `$`.
pub fn write_table<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    automaton: &Automaton,
) -> io::Result<()> {
    let n_sym = grammar.symbols_count();
    writeln!(out, "TS,{}\n", automaton.states().len())?;
    for (s, state) in automaton.states().iter().enumerate() {
        for sym in 0..n_sym {
            if let Some(t) = state.transition(sym) {
                let kind = if grammar.is_terminal(sym) {
                    "Shift"
                } else {
                    "Goto"
                };
                writeln!(out, "A,{},{},{}({})", s, grammar.symbol_name(sym), kind, t)?;
            } else if let Some(item) = automaton.reduces().get(s, Lookahead::Terminal(sym)) {
                writeln!(
                    out,
                    "A,{},{},Reduce({})",
                    s,
                    grammar.symbol_name(sym),
                    item.prod
                )?;
            }
        }
        match automaton.reduces().get(s, Lookahead::Eof) {
            Some(item) if item.prod == ProdId::START => writeln!(out, "A,{},$,Accept", s)?,
            Some(item) => writeln!(out, "A,{},$,Reduce({})", s, item.prod)?,
            None => {}
        }
        writeln!(out)?;
    }
    Ok(())
}
