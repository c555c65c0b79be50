//! LR(0) items, canonical item sets, closure and goto.

use crate::grammar::{Grammar, ProdId, SymbolId};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

/// An LR(0) item: a production with a dot marking how much of its
/// right-hand side has been recognized.
///
/// Items order by production id, then dot position. The left-hand side is
/// determined by the production and never breaks a tie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub prod: ProdId,
    pub dot: usize,
    pub lhs: SymbolId,
}

impl Item {
    /// The item with the dot before the first right-hand symbol.
    pub fn initial(grammar: &Grammar, prod: ProdId) -> Self {
        Item {
            prod,
            dot: 0,
            lhs: grammar.production(prod).lhs(),
        }
    }

    /// The item with the dot moved one symbol to the right.
    pub fn advance(self) -> Self {
        Item {
            dot: self.dot + 1,
            ..self
        }
    }

    /// The symbol right after the dot, if any.
    pub fn next_symbol(&self, grammar: &Grammar) -> Option<SymbolId> {
        grammar.production(self.prod).rhs().get(self.dot).copied()
    }

    /// `true` when the dot is at the end of the right-hand side.
    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot == grammar.production(self.prod).rhs().len()
    }

    /// Renders the item as `E -> E . + T`.
    pub fn display<'a>(&self, grammar: &'a Grammar) -> ItemDisplay<'a> {
        ItemDisplay {
            item: *self,
            grammar,
        }
    }
}

pub struct ItemDisplay<'a> {
    item: Item,
    grammar: &'a Grammar,
}

impl fmt::Display for ItemDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.grammar;
        let rhs = g.production(self.item.prod).rhs();
        write!(f, "{} ->", g.symbol_name(self.item.lhs))?;
        for (i, &sym) in rhs.iter().enumerate() {
            if i == self.item.dot {
                write!(f, " .")?;
            }
            write!(f, " {}", g.symbol_name(sym))?;
        }
        if self.item.dot == rhs.len() {
            write!(f, " .")?;
        }
        Ok(())
    }
}

/// A canonical set of items: sorted and free of duplicates.
///
/// Equality is structural. Sets order by size first, then element-wise,
/// which is the key order of the state numbering table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemSet(Vec<Item>);

impl ItemSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.0.binary_search(item).is_ok()
    }
}

impl From<BTreeSet<Item>> for ItemSet {
    fn from(set: BTreeSet<Item>) -> Self {
        Self(set.into_iter().collect())
    }
}

impl FromIterator<Item> for ItemSet {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        iter.into_iter().collect::<BTreeSet<_>>().into()
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Ord for ItemSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ItemSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes the LR(0) closure of `items`.
///
/// For every item whose next symbol is a nonterminal `N`, adds `N -> . w`
/// for each production of `N`, until nothing new is added.
pub fn closure(items: impl IntoIterator<Item = Item>, grammar: &Grammar) -> ItemSet {
    let mut c: BTreeSet<Item> = items.into_iter().collect();
    let mut queue: Vec<Item> = c.iter().copied().collect();
    while let Some(item) = queue.pop() {
        let Some(sym) = item.next_symbol(grammar) else {
            continue;
        };
        if grammar.is_terminal(sym) {
            continue;
        }
        for prod in grammar.productions_of(sym) {
            let new_item = Item::initial(grammar, prod.id());
            if c.insert(new_item) {
                queue.push(new_item);
            }
        }
    }
    c.into()
}

/// Computes the LR(0) goto of `items` on `sym`.
///
/// An empty result means there is no transition on `sym`.
pub fn goto(items: &ItemSet, sym: SymbolId, grammar: &Grammar) -> ItemSet {
    let moved = items
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(sym))
        .map(|item| item.advance());
    closure(moved, grammar)
}
