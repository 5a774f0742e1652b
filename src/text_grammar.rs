//! Loads a [`Grammar`] from its textual surface form: one production per
//! line, `NT : sym sym ...`.
//!
//! Grounded in the source's `create_grammar` test helper: the first
//! nonterminal seen on a left-hand side becomes `Start`; every other
//! right-hand-side word that never appears as a left-hand side becomes a
//! `Terminal`, named after itself. A caller-chosen word may be reserved to
//! mean `Epsilon` on a right-hand side.

use crate::error::GrammarError;
use crate::grammar::{Alternate, Grammar, Rule};
use crate::symbol::{Symbol, TokenValue};
use std::collections::{HashMap, HashSet};

/// Parses `source` into a [`Grammar`].
///
/// `epsilon_word`, if given, is the right-hand-side word that denotes the
/// empty production; any other word is taken as a terminal unless it
/// already names a nonterminal. `end_marker_glyph` is purely cosmetic — it
/// is never matched against input.
pub fn parse_text_grammar(
    source: &str,
    epsilon_word: Option<&str>,
    end_marker_glyph: &str,
) -> Result<Grammar, GrammarError> {
    let lines: Vec<&str> = source.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    if lines.is_empty() {
        return Err(GrammarError::EmptyInput);
    }

    let mut order: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for &line in &lines {
        let (lhs, _) = split_rule(line)?;
        if seen.insert(lhs.clone()) {
            order.push(lhs);
        }
    }
    let start_name = order[0].clone();

    let nonterminal_symbols: HashMap<String, Symbol> = order
        .iter()
        .map(|name| {
            let symbol = if *name == start_name { Symbol::start(name.clone()) } else { Symbol::nonterminal(name.clone()) };
            (name.clone(), symbol)
        })
        .collect();

    let epsilon = Symbol::epsilon(epsilon_word.unwrap_or("e").to_string());
    let end_marker = Symbol::end_marker(end_marker_glyph);

    let mut terminal_symbols: HashMap<String, Symbol> = HashMap::new();
    let mut alternates_by_nonterminal: HashMap<String, Vec<Alternate>> = HashMap::new();

    for &line in &lines {
        let (lhs, rhs_words) = split_rule(line)?;
        let mut symbols = Vec::with_capacity(rhs_words.len());

        for word in rhs_words {
            if epsilon_word.is_some_and(|e| e == word) {
                symbols.push(epsilon.clone());
            } else if let Some(symbol) = nonterminal_symbols.get(word) {
                symbols.push(symbol.clone());
            } else {
                let symbol = terminal_symbols
                    .entry(word.to_string())
                    .or_insert_with(|| Symbol::terminal_with_value(word, TokenValue::Text(word.to_string())))
                    .clone();
                symbols.push(symbol);
            }
        }

        alternates_by_nonterminal.entry(lhs).or_default().push(Alternate::new(symbols));
    }

    let mut rules = HashMap::new();
    for (name, symbol) in &nonterminal_symbols {
        let alternates = alternates_by_nonterminal.remove(name).unwrap_or_default();
        rules.insert(symbol.clone(), Rule::new(symbol.clone(), alternates));
    }

    let start_symbol = nonterminal_symbols.get(&start_name).unwrap().clone();
    let terminals: HashSet<Symbol> = terminal_symbols.into_values().collect();

    Grammar::new(terminals, rules, start_symbol, epsilon, end_marker)
}

/// Splits one `NT : sym sym ...` line into its left-hand side and the
/// whitespace-separated words of its right-hand side.
fn split_rule(line: &str) -> Result<(String, Vec<&str>), GrammarError> {
    let mut parts = line.splitn(2, ':');
    let lhs = parts.next().unwrap_or_default().trim();
    let rhs = parts.next().ok_or_else(|| GrammarError::InvalidFormat(line.to_string()))?;

    if lhs.is_empty() {
        return Err(GrammarError::InvalidFormat(line.to_string()));
    }

    Ok((lhs.to_string(), rhs.split_whitespace().collect()))
}
