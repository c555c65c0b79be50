//! Insertion-ordered symbol table used while a grammar is being assembled.
//!
//! Each unique name receives a stable index equal to its insertion position,
//! so indices double as local symbol codes for nonterminals and terminals.

use indexmap::{IndexMap, map::Entry};
use smartstring::alias::String;

#[derive(Debug, Clone)]
pub struct Symtab<V> {
    tab: IndexMap<String, V>,
}

impl<V> Default for Symtab<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Symtab<V> {
    pub fn new() -> Self {
        Self {
            tab: IndexMap::new(),
        }
    }

    /// Inserts `name` with `value` and returns its index, or `None` if the
    /// name is already present (the stored value is left untouched).
    pub fn insert_new(&mut self, name: &str, value: V) -> Option<usize> {
        match self.tab.entry(String::from(name)) {
            Entry::Occupied(_) => None,
            Entry::Vacant(v) => {
                let o = v.insert_entry(value);
                Some(o.index())
            }
        }
    }

    pub fn idx(&self, name: &str) -> Option<usize> {
        self.tab.get_index_of(name)
    }

    pub fn sym(&self, idx: usize) -> Option<&str> {
        self.tab.get_index(idx).map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.tab.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.tab.iter().map(|(k, v)| (k.as_str(), v))
    }
}
