//! The LL(1) parsing table: `M[nonterminal, terminal] -> alternates`.
//!
//! Grounded in the source's `_generate_parser_table`, which fills a cell
//! whenever a terminal is in FIRST(alternate) or, when the alternate is
//! nullable, in FOLLOW(nonterminal). This builder never fails: a cell simply
//! accumulates every alternate that claims it, and conflicts become
//! queryable data instead of a build-time error (see `conflicts()` /
//! `is_ll1()`, and `DESIGN.md`).

use crate::first_follow::FirstFollowSet;
use crate::grammar::{Alternate, Grammar};
use crate::symbol::Symbol;
use std::collections::HashMap;

/// A single cell that ended up with more than one alternate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub nonterminal: Symbol,
    pub terminal: Symbol,
    pub alternates: Vec<Alternate>,
}

/// The predictive parsing table, built once from a grammar's FIRST/FOLLOW
/// sets and consulted by the recognizer on every nonterminal expansion.
#[derive(Debug, Clone)]
pub struct ParsingTable {
    cells: HashMap<(Symbol, Symbol), Vec<Alternate>>,
}

impl ParsingTable {
    /// Fills every cell `M[A, a]` for which `a` is in FIRST(alternate), or
    /// the alternate is nullable and `a` is in FOLLOW(A).
    pub fn build(grammar: &Grammar, first: &FirstFollowSet, follow: &FirstFollowSet) -> Self {
        let mut cells: HashMap<(Symbol, Symbol), Vec<Alternate>> = HashMap::new();

        let mut lookaheads: Vec<Symbol> = grammar.terminals().iter().cloned().collect();
        lookaheads.push(grammar.end_marker().clone());

        for rule in grammar.rules() {
            for alternate in &rule.alternates {
                let first_of_alternate = first.get(alternate.symbols().to_vec());
                let is_nullable = first_of_alternate.contains(grammar.epsilon());
                let follow_of_nonterminal = if is_nullable { Some(follow.get(rule.nonterminal.clone())) } else { None };

                for terminal in &lookaheads {
                    let predicts = first_of_alternate.contains(terminal)
                        || follow_of_nonterminal.as_ref().is_some_and(|f| f.contains(terminal));

                    if predicts {
                        cells
                            .entry((rule.nonterminal.clone(), terminal.clone()))
                            .or_default()
                            .push(alternate.clone());
                    }
                }
            }
        }

        Self { cells }
    }

    /// The alternates predicted for `(nonterminal, terminal)`, if any. A
    /// well-formed LL(1) table never returns more than one.
    pub fn get(&self, nonterminal: &Symbol, terminal: &Symbol) -> Option<&[Alternate]> {
        self.cells.get(&(nonterminal.clone(), terminal.clone())).map(Vec::as_slice)
    }

    /// Every cell that ended up with more than one alternate.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.cells
            .iter()
            .filter(|(_, alternates)| alternates.len() > 1)
            .map(|((nonterminal, terminal), alternates)| Conflict {
                nonterminal: nonterminal.clone(),
                terminal: terminal.clone(),
                alternates: alternates.clone(),
            })
            .collect()
    }

    /// True iff no cell has more than one alternate.
    pub fn is_ll1(&self) -> bool {
        self.conflicts().is_empty()
    }
}
