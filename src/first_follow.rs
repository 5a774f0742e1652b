//! The FIRST/FOLLOW store: a mapping from a sequence of grammar symbols to a
//! set of grammar symbols, with a single `dirty` flag for fixed-point
//! iteration.
//!
//! Grounded directly in the source's `FirstFollowSet`: `add_empty`, `add`,
//! `remove`, and `get`, plus the same key/value normalization rules —
//! promoting a bare `Symbol` to a length-one sequence, accepting any ordered
//! collection of symbols, and accepting a single symbol or a collection as a
//! value. Unlike the source, which raises at runtime for an "unknown type",
//! this store is generic only over `Into<SymbolSequence>` / `IntoSymbolSet`,
//! so there is no shape it can be handed that it doesn't already know how to
//! normalize (see the Programming error entry in `DESIGN.md`).

use crate::grammar::Alternate;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};

/// A finite ordered sequence of symbols, used as the store's key type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolSequence(Vec<Symbol>);

impl SymbolSequence {
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The first symbol of the sequence, if any.
    pub fn head(&self) -> Option<&Symbol> {
        self.0.first()
    }

    /// All but the first symbol, as a fresh sequence.
    pub fn tail(&self) -> SymbolSequence {
        SymbolSequence(self.0.iter().skip(1).cloned().collect())
    }
}

impl From<Symbol> for SymbolSequence {
    fn from(symbol: Symbol) -> Self {
        SymbolSequence(vec![symbol])
    }
}

impl From<&Symbol> for SymbolSequence {
    fn from(symbol: &Symbol) -> Self {
        SymbolSequence(vec![symbol.clone()])
    }
}

impl From<Vec<Symbol>> for SymbolSequence {
    fn from(symbols: Vec<Symbol>) -> Self {
        SymbolSequence(symbols)
    }
}

impl From<&[Symbol]> for SymbolSequence {
    fn from(symbols: &[Symbol]) -> Self {
        SymbolSequence(symbols.to_vec())
    }
}

impl From<&Alternate> for SymbolSequence {
    fn from(alt: &Alternate) -> Self {
        SymbolSequence(alt.symbols().to_vec())
    }
}

/// A set of symbols, used as the store's value type.
pub type SymbolSet = HashSet<Symbol>;

/// Normalizes the store's accepted value shapes (a single symbol, a
/// collection of symbols, or an existing set) into a [`SymbolSet`]. A local
/// trait rather than a blanket `Into<SymbolSet>` impl, since `SymbolSet` is a
/// foreign type (`HashSet`) this crate cannot add foreign conversions to.
pub trait IntoSymbolSet {
    fn into_symbol_set(self) -> SymbolSet;
}

impl IntoSymbolSet for Symbol {
    fn into_symbol_set(self) -> SymbolSet {
        HashSet::from([self])
    }
}

impl IntoSymbolSet for SymbolSet {
    fn into_symbol_set(self) -> SymbolSet {
        self
    }
}

impl IntoSymbolSet for &SymbolSet {
    fn into_symbol_set(self) -> SymbolSet {
        self.clone()
    }
}

impl IntoSymbolSet for Vec<Symbol> {
    fn into_symbol_set(self) -> SymbolSet {
        self.into_iter().collect()
    }
}

impl IntoSymbolSet for &[Symbol] {
    fn into_symbol_set(self) -> SymbolSet {
        self.iter().cloned().collect()
    }
}

/// Maps a [`SymbolSequence`] to a [`SymbolSet`], tracking whether any call has
/// widened or created a bucket since the flag was last cleared.
#[derive(Debug, Clone, Default)]
pub struct FirstFollowSet {
    data: HashMap<SymbolSequence, SymbolSet>,
    dirty: bool,
}

impl FirstFollowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a bucket exists for `key`; empty if absent. Sets `dirty` only
    /// if the bucket did not already exist.
    pub fn add_empty(&mut self, key: impl Into<SymbolSequence>) {
        let key = key.into();
        if !self.data.contains_key(&key) {
            self.data.insert(key, SymbolSet::new());
            self.dirty = true;
        }
    }

    /// Unions `values` into the bucket for `key`, creating it if absent. Sets
    /// `dirty` iff the bucket's contents actually changed.
    pub fn add(&mut self, key: impl Into<SymbolSequence>, values: impl IntoSymbolSet) {
        let key = key.into();
        let values = values.into_symbol_set();
        let entry = self.data.entry(key).or_default();
        let before = entry.len();
        entry.extend(values);
        if entry.len() != before {
            self.dirty = true;
        }
    }

    /// Removes `values` from the bucket for `key`. Sets `dirty` iff the
    /// bucket's contents actually changed.
    pub fn remove(&mut self, key: impl Into<SymbolSequence>, values: impl IntoSymbolSet) {
        let key = key.into();
        let values = values.into_symbol_set();
        if let Some(entry) = self.data.get_mut(&key) {
            let before = entry.len();
            entry.retain(|s| !values.contains(s));
            if entry.len() != before {
                self.dirty = true;
            }
        }
    }

    /// Returns a read-only view of the bucket for `key`; an empty set if
    /// absent.
    pub fn get(&self, key: impl Into<SymbolSequence>) -> SymbolSet {
        self.data.get(&key.into()).cloned().unwrap_or_default()
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Iterates every key currently in the store — used by the solver to walk
    /// FIRST of every right-hand-side suffix seen so far.
    pub fn keys(&self) -> impl Iterator<Item = &SymbolSequence> {
        self.data.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clean_and_empty() {
        let store = FirstFollowSet::new();
        assert!(!store.dirty());
        assert_eq!(store.keys().count(), 0);
    }

    #[test]
    fn add_empty_sets_dirty_once() {
        let mut store = FirstFollowSet::new();
        let t = Symbol::terminal("a");
        store.add_empty(t.clone());
        assert!(store.dirty());
        assert_eq!(store.get(t.clone()), SymbolSet::new());

        store.clear_dirty();
        store.add_empty(t);
        assert!(!store.dirty());
    }

    #[test]
    fn add_unions_and_tracks_dirty() {
        let mut store = FirstFollowSet::new();
        let t = Symbol::terminal("a");
        let v = vec![Symbol::terminal("x"), Symbol::nonterminal("Y")];
        store.add(t.clone(), v.clone());
        assert_eq!(store.get(t.clone()), v.clone().into_iter().collect());

        store.clear_dirty();
        store.add(t.clone(), v);
        assert!(!store.dirty(), "adding the same values again should not re-dirty");
    }

    #[test]
    fn key_normalization_is_order_and_length_sensitive() {
        let mut store = FirstFollowSet::new();
        let a = Symbol::nonterminal("a");
        let b = Symbol::terminal("b");
        let key = vec![a.clone(), b.clone()];
        let v = vec![Symbol::nonterminal("k")];
        store.add(key.clone(), v.clone());

        assert_eq!(store.get(key.clone()), v.clone().into_iter().collect());

        let reversed: Vec<Symbol> = key.into_iter().rev().collect();
        assert_eq!(store.get(reversed), SymbolSet::new());
    }

    #[test]
    fn single_symbol_promotes_to_length_one_sequence() {
        let mut store = FirstFollowSet::new();
        let a = Symbol::nonterminal("a");
        let v = vec![Symbol::terminal("x")];
        store.add(a.clone(), v.clone());

        assert_eq!(store.get(a.clone()), v.clone().into_iter().collect());
        assert_eq!(store.get(vec![a]), v.into_iter().collect());
    }

    #[test]
    fn remove_is_a_set_difference() {
        let mut store = FirstFollowSet::new();
        let t = Symbol::terminal("a");
        let add = vec![Symbol::terminal("x"), Symbol::nonterminal("y")];
        store.add(t.clone(), add.clone());

        store.clear_dirty();
        let remove = vec![Symbol::terminal("x"), Symbol::nonterminal("p")];
        store.remove(t.clone(), remove);
        assert!(store.dirty());
        assert_eq!(store.get(t.clone()), HashSet::from([Symbol::nonterminal("y")]));

        store.clear_dirty();
        store.remove(t, vec![Symbol::terminal("x")]);
        assert!(!store.dirty(), "removing an absent value should not re-dirty");
    }
}
