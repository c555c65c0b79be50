//! Grammar model and its builder.
//!
//! A [`Grammar`] is an immutable, integer-coded context-free grammar. Codes
//! `[0, nonterminals_count)` are nonterminals and
//! `[nonterminals_count, symbols_count)` are terminals. Every grammar carries
//! a synthesized augmented start symbol `!start` and the production
//! `!start -> S` with id 0, which yields the unique accepting item.
//!
//! Grammars are assembled through [`GrammarBuilder`], which owns the
//! production id counter and the symbol tables, and fixes the final symbol
//! codes only when [`GrammarBuilder::build`] is called.

use crate::error::{GrammarError, SymKind};
use crate::symtab::Symtab;
use smartstring::alias::String;
use std::fmt;
use std::ops::Range;

/// Name of the synthesized augmented start symbol.
pub const AUGMENTED_START: &str = "!start";

/// An integer symbol code.
pub type SymbolId = usize;

/// A typed synthesized-value slot carried by a symbol.
///
/// Opaque to the analysis; only passed through to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: String,
    pub name: String,
}

impl Attribute {
    pub fn new(ty: &str, name: &str) -> Self {
        Self {
            ty: String::from(ty),
            name: String::from(name),
        }
    }
}

/// A grammar symbol: its name and attribute slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// Production identifier; also the primary key of the item order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProdId(pub usize);

impl ProdId {
    /// The augmented start production `!start -> S`.
    pub const START: ProdId = ProdId(0);
}

impl From<ProdId> for usize {
    fn from(prod_id: ProdId) -> Self {
        prod_id.0
    }
}

impl fmt::Display for ProdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single production `lhs -> rhs`, with pass-through semantic actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    id: ProdId,
    lhs: SymbolId,
    rhs: Vec<SymbolId>,
    actions: Vec<String>,
}

impl Production {
    pub fn id(&self) -> ProdId {
        self.id
    }

    pub fn lhs(&self) -> SymbolId {
        self.lhs
    }

    pub fn rhs(&self) -> &[SymbolId] {
        &self.rhs
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// An immutable, integer-coded context-free grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    package: String,
    symbols: Vec<Symbol>,
    n_nonterm: usize,
    start: SymbolId,
    augmented_start: SymbolId,
    /// Indexed by production id.
    prods: Vec<Production>,
    /// Indexed by nonterminal code.
    by_lhs: Vec<Vec<ProdId>>,
}

impl Grammar {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn symbols_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn nonterminals_count(&self) -> usize {
        self.n_nonterm
    }

    pub fn terminals_count(&self) -> usize {
        self.symbols.len() - self.n_nonterm
    }

    pub fn nonterminals(&self) -> Range<SymbolId> {
        0..self.n_nonterm
    }

    pub fn terminals(&self) -> Range<SymbolId> {
        self.n_nonterm..self.symbols.len()
    }

    #[inline]
    pub fn is_terminal(&self, sym: SymbolId) -> bool {
        sym >= self.n_nonterm
    }

    #[inline]
    pub fn is_nonterminal(&self, sym: SymbolId) -> bool {
        sym < self.n_nonterm
    }

    /// # Panics
    ///
    /// Panics if `sym >= symbols_count()`; the same holds for
    /// [`Grammar::symbol_name`].
    pub fn symbol(&self, sym: SymbolId) -> &Symbol {
        &self.symbols[sym]
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol_name(&self, sym: SymbolId) -> &str {
        &self.symbols[sym].name
    }

    /// Looks a symbol code up by name.
    pub fn symbol_code(&self, name: &str) -> Option<SymbolId> {
        self.symbols.iter().position(|s| s.name.as_str() == name)
    }

    /// The declared start symbol.
    pub fn start(&self) -> SymbolId {
        self.start
    }

    /// The synthesized `!start` nonterminal.
    pub fn augmented_start(&self) -> SymbolId {
        self.augmented_start
    }

    /// All productions, indexed by [`ProdId`].
    pub fn productions(&self) -> &[Production] {
        &self.prods
    }

    /// Panics if `id` was not issued for this grammar.
    pub fn production(&self, id: ProdId) -> &Production {
        &self.prods[id.0]
    }

    /// The augmented start production `!start -> S`.
    pub fn start_production(&self) -> &Production {
        &self.prods[ProdId::START.0]
    }

    /// Productions of nonterminal `nt` in declaration order.
    ///
    /// Panics if `nt` is not a nonterminal code.
    pub fn productions_of(&self, nt: SymbolId) -> impl Iterator<Item = &Production> + '_ {
        self.by_lhs[nt].iter().map(move |id| &self.prods[id.0])
    }

    fn fmt_symbol_block(&self, f: &mut fmt::Formatter<'_>, sym: SymbolId) -> fmt::Result {
        let symbol = &self.symbols[sym];
        writeln!(f, "{}{{", symbol.name)?;
        for attr in &symbol.attributes {
            writeln!(f, "\t{} {}", attr.ty, attr.name)?;
        }
        writeln!(f, "}}")
    }
}

/// Debug dump: symbol blocks, production blocks and the start symbol.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "grammar name: {}", self.name)?;
        writeln!(f, "grammar package: {}", self.package)?;

        writeln!(f)?;
        writeln!(f, "non-terminals:")?;
        for sym in self.nonterminals() {
            self.fmt_symbol_block(f, sym)?;
        }

        writeln!(f)?;
        writeln!(f, "terminals:")?;
        for sym in self.terminals() {
            self.fmt_symbol_block(f, sym)?;
        }

        writeln!(f)?;
        writeln!(f, "productions:")?;
        for nt in self.nonterminals() {
            for prod in self.productions_of(nt) {
                write!(f, "{} -> ", self.symbol_name(nt))?;
                for &sym in prod.rhs() {
                    write!(f, "{} ", self.symbol_name(sym))?;
                }
                writeln!(f, "{{")?;
                for action in prod.actions() {
                    writeln!(f, "\t{}", action)?;
                }
                writeln!(f, "}}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "start: {}", self.symbol_name(self.start))
    }
}

/// A symbol handle issued by a [`GrammarBuilder`].
///
/// Indices are local to the builder's nonterminal or terminal table; they
/// are remapped to grammar codes by [`GrammarBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sym {
    NonTerm(usize),
    Term(usize),
}

#[derive(Debug, Clone)]
struct PendingProd {
    lhs: usize,
    rhs: Vec<Sym>,
    actions: Vec<String>,
}

/// Assembles a [`Grammar`].
///
/// # Example
/// ```rust
/// # use slr_gen::GrammarBuilder;
/// let mut b = GrammarBuilder::new("Parens", "demo");
/// let s = b.nonterminal("S", []).unwrap();
/// let a = b.terminal("a", []).unwrap();
/// let z = b.terminal("b", []).unwrap();
/// b.production(s, [a, s, z]).unwrap();
/// b.production(s, []).unwrap();
/// b.start(s).unwrap();
/// let g = b.build().unwrap();
/// assert_eq!(g.nonterminals_count(), 2); // S and !start
/// assert_eq!(g.symbols_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    name: String,
    package: String,
    nonterms: Symtab<Vec<Attribute>>,
    terms: Symtab<Vec<Attribute>>,
    prods: Vec<PendingProd>,
    start: Option<usize>,
}

impl GrammarBuilder {
    pub fn new(name: &str, package: &str) -> Self {
        Self {
            name: String::from(name),
            package: String::from(package),
            nonterms: Symtab::new(),
            terms: Symtab::new(),
            prods: Vec::new(),
            start: None,
        }
    }

    fn check_name(&self, name: &str) -> Result<(), GrammarError> {
        if name == AUGMENTED_START {
            return Err(GrammarError::ReservedName {
                name: String::from(name),
            });
        }
        if self.nonterms.idx(name).is_some() || self.terms.idx(name).is_some() {
            return Err(GrammarError::DuplicateSymbol {
                name: String::from(name),
            });
        }
        Ok(())
    }

    fn check_sym(&self, sym: Sym) -> Result<(), GrammarError> {
        let (kind, index, len) = match sym {
            Sym::NonTerm(i) => (SymKind::NonTerm, i, self.nonterms.len()),
            Sym::Term(i) => (SymKind::Term, i, self.terms.len()),
        };
        if index >= len {
            return Err(GrammarError::InvalidSymbol { kind, index, len });
        }
        Ok(())
    }

    fn sym_name(&self, sym: Sym) -> &str {
        let name = match sym {
            Sym::NonTerm(i) => self.nonterms.sym(i),
            Sym::Term(i) => self.terms.sym(i),
        };
        name.unwrap_or_default()
    }

    /// Declares a nonterminal.
    pub fn nonterminal(
        &mut self,
        name: &str,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Result<Sym, GrammarError> {
        self.check_name(name)?;
        let attrs = attributes.into_iter().collect();
        let idx = self
            .nonterms
            .insert_new(name, attrs)
            .ok_or_else(|| GrammarError::DuplicateSymbol {
                name: String::from(name),
            })?;
        Ok(Sym::NonTerm(idx))
    }

    /// Declares a terminal.
    pub fn terminal(
        &mut self,
        name: &str,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Result<Sym, GrammarError> {
        self.check_name(name)?;
        let attrs = attributes.into_iter().collect();
        let idx = self
            .terms
            .insert_new(name, attrs)
            .ok_or_else(|| GrammarError::DuplicateSymbol {
                name: String::from(name),
            })?;
        Ok(Sym::Term(idx))
    }

    /// Resolves a previously declared name to its handle.
    pub fn symbol(&self, name: &str) -> Result<Sym, GrammarError> {
        if let Some(i) = self.nonterms.idx(name) {
            return Ok(Sym::NonTerm(i));
        }
        if let Some(i) = self.terms.idx(name) {
            return Ok(Sym::Term(i));
        }
        Err(GrammarError::UnknownSymbol {
            name: String::from(name),
        })
    }

    /// Adds `lhs -> rhs` without semantic actions.
    pub fn production(
        &mut self,
        lhs: Sym,
        rhs: impl IntoIterator<Item = Sym>,
    ) -> Result<ProdId, GrammarError> {
        self.production_with_actions(lhs, rhs, std::iter::empty::<&str>())
    }

    /// Adds `lhs -> rhs` carrying positional action text fragments.
    ///
    /// Ids are handed out sequentially from 1; id 0 belongs to the
    /// augmented start production.
    pub fn production_with_actions<A: AsRef<str>>(
        &mut self,
        lhs: Sym,
        rhs: impl IntoIterator<Item = Sym>,
        actions: impl IntoIterator<Item = A>,
    ) -> Result<ProdId, GrammarError> {
        self.check_sym(lhs)?;
        let Sym::NonTerm(lhs) = lhs else {
            return Err(GrammarError::LeftSideNotNonterminal {
                name: String::from(self.sym_name(lhs)),
            });
        };
        let rhs: Vec<Sym> = rhs.into_iter().collect();
        for &sym in &rhs {
            self.check_sym(sym)?;
        }
        let actions = actions
            .into_iter()
            .map(|a| String::from(a.as_ref()))
            .collect();
        self.prods.push(PendingProd { lhs, rhs, actions });
        Ok(ProdId(self.prods.len()))
    }

    /// Adds a production by symbol names.
    pub fn rule(&mut self, lhs: &str, rhs: &[&str]) -> Result<ProdId, GrammarError> {
        let lhs = self.symbol(lhs)?;
        let rhs = rhs
            .iter()
            .map(|name| self.symbol(name))
            .collect::<Result<Vec<_>, _>>()?;
        self.production(lhs, rhs)
    }

    /// Chooses the start symbol; it must be a nonterminal.
    pub fn start(&mut self, sym: Sym) -> Result<(), GrammarError> {
        self.check_sym(sym)?;
        match sym {
            Sym::NonTerm(i) => {
                self.start = Some(i);
                Ok(())
            }
            Sym::Term(_) => Err(GrammarError::LeftSideNotNonterminal {
                name: String::from(self.sym_name(sym)),
            }),
        }
    }

    /// Fixes symbol codes, synthesizes `!start -> S` and returns the grammar.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let start = self.start.ok_or(GrammarError::MissingStart)?;
        let augmented_start = self.nonterms.len();
        let n_nonterm = augmented_start + 1;

        let mut symbols = Vec::with_capacity(n_nonterm + self.terms.len());
        symbols.extend(self.nonterms.iter().map(|(name, attrs)| Symbol {
            name: String::from(name),
            attributes: attrs.clone(),
        }));
        symbols.push(Symbol {
            name: String::from(AUGMENTED_START),
            attributes: Vec::new(),
        });
        symbols.extend(self.terms.iter().map(|(name, attrs)| Symbol {
            name: String::from(name),
            attributes: attrs.clone(),
        }));

        let code = |sym: Sym| match sym {
            Sym::NonTerm(i) => i,
            Sym::Term(i) => n_nonterm + i,
        };

        let mut prods = Vec::with_capacity(self.prods.len() + 1);
        let mut by_lhs = vec![Vec::new(); n_nonterm];
        prods.push(Production {
            id: ProdId::START,
            lhs: augmented_start,
            rhs: vec![start],
            actions: Vec::new(),
        });
        by_lhs[augmented_start].push(ProdId::START);
        for (i, p) in self.prods.into_iter().enumerate() {
            let id = ProdId(i + 1);
            by_lhs[p.lhs].push(id);
            prods.push(Production {
                id,
                lhs: p.lhs,
                rhs: p.rhs.into_iter().map(code).collect(),
                actions: p.actions,
            });
        }

        log::debug!(
            "grammar {:?}: {} nonterminals, {} terminals, {} productions",
            self.name,
            n_nonterm,
            symbols.len() - n_nonterm,
            prods.len()
        );

        Ok(Grammar {
            name: self.name,
            package: self.package,
            symbols,
            n_nonterm,
            start,
            augmented_start,
            prods,
            by_lhs,
        })
    }
}
