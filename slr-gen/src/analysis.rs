//! Nullable, FIRST and FOLLOW sets.
//!
//! Three chained fixed-point passes over the productions of a [`Grammar`].
//! Each pass only depends on the results of the passes before it, and each
//! can only add elements, so all three terminate for any finite grammar.
//! Unproductive nonterminals keep empty FIRST sets and unreachable ones keep
//! empty FOLLOW sets.

use crate::grammar::{Grammar, ProdId, SymbolId};
use std::collections::BTreeSet;
use std::fmt;

/// A FOLLOW-set element: a real terminal code or the end-of-input marker.
///
/// `Eof` orders after every terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lookahead {
    Terminal(SymbolId),
    Eof,
}

impl Lookahead {
    /// Column in a reduce row of width `symbols_count + 1`; EOF is the last.
    #[inline]
    pub fn slot(self, symbols_count: usize) -> usize {
        match self {
            Lookahead::Terminal(t) => t,
            Lookahead::Eof => symbols_count,
        }
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookahead::Terminal(t) => write!(f, "symbol {}", t),
            Lookahead::Eof => write!(f, "$"),
        }
    }
}

/// Derived per-nonterminal facts about a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarInformation {
    nullable: Vec<bool>,
    firsts: Vec<BTreeSet<SymbolId>>,
    follows: Vec<BTreeSet<Lookahead>>,
}

impl GrammarInformation {
    /// Runs the analysis with productions visited in id order.
    pub fn analyze(grammar: &Grammar) -> Self {
        let order: Vec<ProdId> = grammar.productions().iter().map(|p| p.id()).collect();
        analyze_in_order(grammar, &order)
    }

    /// Whether nonterminal `nt` derives the empty string.
    ///
    /// # Panics
    ///
    /// Panics if `nt` is not a nonterminal code of the analyzed grammar.
    pub fn nullable(&self, nt: SymbolId) -> bool {
        self.nullable[nt]
    }

    /// FIRST(`nt`). Panics if `nt` is not a nonterminal code.
    pub fn first(&self, nt: SymbolId) -> &BTreeSet<SymbolId> {
        &self.firsts[nt]
    }

    /// FOLLOW(`nt`). Panics if `nt` is not a nonterminal code.
    pub fn follow(&self, nt: SymbolId) -> &BTreeSet<Lookahead> {
        &self.follows[nt]
    }

    pub fn nullables(&self) -> &[bool] {
        &self.nullable
    }

    pub fn firsts(&self) -> &[BTreeSet<SymbolId>] {
        &self.firsts
    }

    pub fn follows(&self) -> &[BTreeSet<Lookahead>] {
        &self.follows
    }
}

/// Runs the analysis visiting productions in the given order.
///
/// The result does not depend on `order`; it only has to list every
/// production of the grammar.
pub fn analyze_in_order(grammar: &Grammar, order: &[ProdId]) -> GrammarInformation {
    let nullable = nullable_set(grammar, order);
    let firsts = first_sets(grammar, order, &nullable);
    let follows = follow_sets(grammar, order, &nullable, &firsts);
    log::debug!(
        "analysis of {:?}: {} nullable nonterminals",
        grammar.name(),
        nullable.iter().filter(|&&n| n).count()
    );
    GrammarInformation {
        nullable,
        firsts,
        follows,
    }
}

fn nullable_set(grammar: &Grammar, order: &[ProdId]) -> Vec<bool> {
    let mut nullable = vec![false; grammar.nonterminals_count()];
    let mut changed = true;
    while changed {
        changed = false;
        for &id in order {
            let prod = grammar.production(id);
            if nullable[prod.lhs()] {
                continue;
            }
            let all_nullable = prod
                .rhs()
                .iter()
                .all(|&sym| grammar.is_nonterminal(sym) && nullable[sym]);
            if all_nullable {
                nullable[prod.lhs()] = true;
                changed = true;
            }
        }
    }
    nullable
}

fn first_sets(grammar: &Grammar, order: &[ProdId], nullable: &[bool]) -> Vec<BTreeSet<SymbolId>> {
    let mut first: Vec<BTreeSet<SymbolId>> = vec![BTreeSet::new(); grammar.nonterminals_count()];
    let mut changed = true;
    while changed {
        changed = false;
        for &id in order {
            let prod = grammar.production(id);
            let lhs = prod.lhs();
            for &sym in prod.rhs() {
                if grammar.is_terminal(sym) {
                    changed |= first[lhs].insert(sym);
                    break;
                }
                if sym != lhs {
                    // Clone FIRST(sym) to avoid simultaneous borrow
                    let first_sym = first[sym].clone();
                    for f in first_sym {
                        changed |= first[lhs].insert(f);
                    }
                }
                if !nullable[sym] {
                    break;
                }
            }
        }
    }
    first
}

fn follow_sets(
    grammar: &Grammar,
    order: &[ProdId],
    nullable: &[bool],
    first: &[BTreeSet<SymbolId>],
) -> Vec<BTreeSet<Lookahead>> {
    let mut follow: Vec<BTreeSet<Lookahead>> =
        vec![BTreeSet::new(); grammar.nonterminals_count()];
    follow[grammar.augmented_start()].insert(Lookahead::Eof);
    let mut changed = true;
    while changed {
        changed = false;
        for &id in order {
            let prod = grammar.production(id);
            let lhs = prod.lhs();
            let rhs = prod.rhs();
            for (i, &b) in rhs.iter().enumerate() {
                if grammar.is_terminal(b) {
                    continue;
                }
                let mut suffix_nullable = true;
                for &sym in &rhs[i + 1..] {
                    if grammar.is_terminal(sym) {
                        changed |= follow[b].insert(Lookahead::Terminal(sym));
                        suffix_nullable = false;
                        break;
                    }
                    for &f in &first[sym] {
                        changed |= follow[b].insert(Lookahead::Terminal(f));
                    }
                    if !nullable[sym] {
                        suffix_nullable = false;
                        break;
                    }
                }
                if suffix_nullable && b != lhs {
                    let follow_lhs = follow[lhs].clone();
                    for f in follow_lhs {
                        changed |= follow[b].insert(f);
                    }
                }
            }
        }
    }
    follow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_grammars;

    fn names<'a>(g: &'a Grammar, set: &BTreeSet<SymbolId>) -> Vec<&'a str> {
        set.iter().map(|&s| g.symbol_name(s)).collect()
    }

    fn follow_names(g: &Grammar, set: &BTreeSet<Lookahead>) -> Vec<String> {
        set.iter()
            .map(|la| match la {
                Lookahead::Terminal(t) => g.symbol_name(*t).to_string(),
                Lookahead::Eof => "$".to_string(),
            })
            .collect()
    }

    #[test]
    fn epsilon_grammar_sets() {
        let g = test_grammars::epsilon();
        let info = GrammarInformation::analyze(&g);
        let s = g.symbol_code("S").unwrap();
        assert!(info.nullable(s));
        assert_eq!(names(&g, info.first(s)), ["a"]);
        assert_eq!(follow_names(&g, info.follow(s)), ["b", "$"]);
    }

    #[test]
    fn expression_grammar_sets() {
        let g = test_grammars::expr();
        let info = GrammarInformation::analyze(&g);
        for nt in ["E", "T", "F"] {
            let code = g.symbol_code(nt).unwrap();
            assert!(!info.nullable(code));
            assert_eq!(names(&g, info.first(code)), ["(", "id"]);
        }
        let e = g.symbol_code("E").unwrap();
        let t = g.symbol_code("T").unwrap();
        let f = g.symbol_code("F").unwrap();
        assert_eq!(follow_names(&g, info.follow(e)), ["+", ")", "$"]);
        assert_eq!(follow_names(&g, info.follow(t)), ["+", "*", ")", "$"]);
        assert_eq!(info.follow(t), info.follow(f));
    }

    #[test]
    fn no_epsilon_productions_means_nothing_nullable() {
        let g = test_grammars::expr();
        assert!(g.productions().iter().all(|p| !p.is_epsilon()));
        let info = GrammarInformation::analyze(&g);
        assert!(info.nullables().iter().all(|&n| !n));
    }

    #[test]
    fn nullability_propagates_through_chains() {
        let g = test_grammars::nullable_chain();
        let info = GrammarInformation::analyze(&g);
        for nt in ["A", "B", "C"] {
            assert!(info.nullable(g.symbol_code(nt).unwrap()), "{nt}");
        }
        let s = g.symbol_code("S").unwrap();
        assert!(!info.nullable(s));
        // S -> A x, A -> B C, B -> b | ε, C -> c | ε
        assert_eq!(names(&g, info.first(s)), ["x", "b", "c"]);
        let b = g.symbol_code("B").unwrap();
        assert_eq!(follow_names(&g, info.follow(b)), ["x", "c"]);
    }

    #[test]
    fn augmented_start_follows_contain_eof() {
        for g in [
            test_grammars::epsilon(),
            test_grammars::expr(),
            test_grammars::ambiguous_expr(),
            test_grammars::unproductive(),
        ] {
            let info = GrammarInformation::analyze(&g);
            assert!(info.follow(g.augmented_start()).contains(&Lookahead::Eof));
            assert!(info.follow(g.start()).contains(&Lookahead::Eof));
        }
    }

    #[test]
    fn unproductive_and_unreachable_nonterminals() {
        let g = test_grammars::unproductive();
        let info = GrammarInformation::analyze(&g);
        let loop_ = g.symbol_code("L").unwrap();
        let orphan = g.symbol_code("U").unwrap();
        assert!(!info.nullable(loop_));
        assert!(info.first(loop_).is_empty());
        assert!(info.follow(loop_).contains(&Lookahead::Terminal(g.symbol_code("a").unwrap())));
        // unreachable but productive
        assert_eq!(names(&g, info.first(orphan)), ["b"]);
        assert!(info.follow(orphan).is_empty());
    }

    #[test]
    #[should_panic]
    fn terminal_codes_have_no_nullable_flag() {
        let g = test_grammars::epsilon();
        let info = GrammarInformation::analyze(&g);
        let a = g.symbol_code("a").unwrap();
        info.nullable(a);
    }

    #[test]
    fn processing_order_does_not_change_results() {
        for g in [
            test_grammars::epsilon(),
            test_grammars::expr(),
            test_grammars::nullable_chain(),
            test_grammars::unproductive(),
        ] {
            let reference = GrammarInformation::analyze(&g);
            let ids: Vec<ProdId> = g.productions().iter().map(|p| p.id()).collect();

            let mut reversed = ids.clone();
            reversed.reverse();
            assert_eq!(analyze_in_order(&g, &reversed), reference);

            for k in 1..ids.len() {
                let mut rotated = ids.clone();
                rotated.rotate_left(k);
                assert_eq!(analyze_in_order(&g, &rotated), reference);
            }

            // interleave odd and even ids
            let shuffled: Vec<ProdId> = ids
                .iter()
                .copied()
                .filter(|id| id.0 % 2 == 1)
                .chain(ids.iter().copied().filter(|id| id.0 % 2 == 0))
                .collect();
            assert_eq!(analyze_in_order(&g, &shuffled), reference);
        }
    }

    #[test]
    fn lookahead_slots() {
        assert_eq!(Lookahead::Terminal(3).slot(9), 3);
        assert_eq!(Lookahead::Eof.slot(9), 9);
        assert!(Lookahead::Terminal(100) < Lookahead::Eof);
    }
}
