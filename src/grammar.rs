//! Grammar module for context-free grammars.
//!
//! This module provides the data structures for a context-free grammar: an
//! [`Alternate`] (one right-hand side), a [`Rule`] (a nonterminal's
//! alternates), and [`Grammar`] itself, which bundles terminals,
//! nonterminals, the rule map, and the three distinguished symbols
//! (start, epsilon, end-marker).
//!
//! Constructing a `Grammar` validates the invariants from the data model:
//! every nonterminal used in a production has a rule, and the start symbol
//! has a rule. Once constructed, a `Grammar` is read-only.

use crate::error::GrammarError;
use crate::symbol::Symbol;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// One right-hand side of a production: an ordered sequence of symbols.
///
/// An empty sequence is accepted but discouraged; callers should prefer an
/// `Alternate` containing only the grammar's `Epsilon` symbol to denote the
/// empty production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alternate(Vec<Symbol>);

impl Alternate {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if this alternate is the single-symbol epsilon production.
    pub fn is_epsilon(&self) -> bool {
        matches!(self.0.as_slice(), [s] if s.is_epsilon())
    }
}

impl fmt::Display for Alternate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Binds a nonterminal to its list of alternates: `A -> w1 | w2 | ...`.
#[derive(Debug, Clone)]
pub struct Rule {
    pub nonterminal: Symbol,
    pub alternates: Vec<Alternate>,
}

impl Rule {
    pub fn new(nonterminal: Symbol, alternates: Vec<Alternate>) -> Self {
        Self { nonterminal, alternates }
    }
}

/// A context-free grammar: terminals, nonterminals, a rule per nonterminal,
/// and the three distinguished symbols (start, epsilon, end-marker).
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: HashSet<Symbol>,
    nonterminals: HashSet<Symbol>,
    rules: HashMap<Symbol, Rule>,
    start: Symbol,
    epsilon: Symbol,
    end_marker: Symbol,
}

impl Grammar {
    /// Builds a grammar from its rules and distinguished symbols, validating
    /// the invariants from the data model: every nonterminal referenced by an
    /// alternate has a rule, and `start` has a rule.
    pub fn new(
        terminals: HashSet<Symbol>,
        rules: HashMap<Symbol, Rule>,
        start: Symbol,
        epsilon: Symbol,
        end_marker: Symbol,
    ) -> Result<Self, GrammarError> {
        if !rules.contains_key(&start) {
            return Err(GrammarError::StartNotDeclared(start.to_string()));
        }

        let nonterminals: HashSet<Symbol> = rules.keys().cloned().collect();

        for rule in rules.values() {
            for alternate in &rule.alternates {
                for symbol in alternate.symbols() {
                    if symbol.is_nonterminal() && !rules.contains_key(symbol) {
                        return Err(GrammarError::MissingRule(symbol.to_string()));
                    }
                }
            }
        }

        Ok(Self { terminals, nonterminals, rules, start, epsilon, end_marker })
    }

    pub fn rule(&self, nonterminal: &Symbol) -> Option<&Rule> {
        self.rules.get(nonterminal)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Iterates every `(nonterminal, alternate)` pair in the grammar.
    pub fn alternates(&self) -> impl Iterator<Item = (&Symbol, &Alternate)> {
        self.rules.values().flat_map(|rule| {
            rule.alternates.iter().map(move |alt| (&rule.nonterminal, alt))
        })
    }

    pub fn terminals(&self) -> &HashSet<Symbol> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &HashSet<Symbol> {
        &self.nonterminals
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn epsilon(&self) -> &Symbol {
        &self.epsilon
    }

    pub fn end_marker(&self) -> &Symbol {
        &self.end_marker
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules.values() {
            for alt in &rule.alternates {
                writeln!(f, "{} -> {}", rule.nonterminal, alt)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_grammar() -> Grammar {
        let s = Symbol::start("S");
        let f = Symbol::nonterminal("F");
        let a = Symbol::terminal("a");
        let leftparen = Symbol::terminal("(");
        let rightparen = Symbol::terminal(")");
        let plus = Symbol::terminal("+");

        let mut rules = HashMap::new();
        rules.insert(
            s.clone(),
            Rule::new(
                s.clone(),
                vec![
                    Alternate::new(vec![f.clone()]),
                    Alternate::new(vec![leftparen.clone(), s.clone(), plus.clone(), f.clone(), rightparen.clone()]),
                ],
            ),
        );
        rules.insert(f.clone(), Rule::new(f.clone(), vec![Alternate::new(vec![a.clone()])]));

        let terminals: HashSet<Symbol> = [a, leftparen, rightparen, plus].into_iter().collect();
        Grammar::new(terminals, rules, s, Symbol::epsilon("e"), Symbol::end_marker("$")).unwrap()
    }

    #[test]
    fn constructs_with_valid_rules() {
        let grammar = simple_grammar();
        assert_eq!(grammar.nonterminals().len(), 2);
        assert_eq!(grammar.terminals().len(), 4);
        assert!(grammar.start().is_start());
    }

    #[test]
    fn missing_rule_is_rejected() {
        let s = Symbol::start("S");
        let f = Symbol::nonterminal("F");
        let mut rules = HashMap::new();
        rules.insert(s.clone(), Rule::new(s.clone(), vec![Alternate::new(vec![f])]));

        let result = Grammar::new(HashSet::new(), rules, s, Symbol::epsilon("e"), Symbol::end_marker("$"));
        assert!(matches!(result, Err(GrammarError::MissingRule(_))));
    }

    #[test]
    fn start_without_rule_is_rejected() {
        let s = Symbol::start("S");
        let result = Grammar::new(HashSet::new(), HashMap::new(), s, Symbol::epsilon("e"), Symbol::end_marker("$"));
        assert!(matches!(result, Err(GrammarError::StartNotDeclared(_))));
    }

    #[test]
    fn alternates_iterates_every_rhs() {
        let grammar = simple_grammar();
        assert_eq!(grammar.alternates().count(), 3);
    }

    #[test]
    fn epsilon_alternate_is_detected() {
        let alt = Alternate::new(vec![Symbol::epsilon("e")]);
        assert!(alt.is_epsilon());
        assert!(!Alternate::new(vec![Symbol::terminal("a")]).is_epsilon());
    }
}
