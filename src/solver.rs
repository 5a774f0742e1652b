//! The FIRST/FOLLOW fixed-point solver.
//!
//! Grounded in the source's `LLParser._setup_llparser` / `_firsts_loop`: the
//! same three-step pass (FIRST of every stored key, FIRST of each rule,
//! FOLLOW propagation across each rule's positions), repeated until a full
//! pass leaves both stores clean. Unlike the source, FOLLOW never receives a
//! raw `FIRST(suffix)` that might still contain Epsilon — Epsilon is always
//! stripped before the union, preserving the invariant that Epsilon never
//! appears in a FOLLOW set (see `DESIGN.md`).

use crate::first_follow::FirstFollowSet;
use crate::grammar::Grammar;

/// Computes FIRST and FOLLOW sets for every nonterminal (and every
/// right-hand-side suffix FIRST needs along the way) in `grammar`.
pub fn solve(grammar: &Grammar) -> (FirstFollowSet, FirstFollowSet) {
    let mut first = FirstFollowSet::new();
    let mut follow = FirstFollowSet::new();

    for rule in grammar.rules() {
        first.add_empty(rule.nonterminal.clone());
        for alternate in &rule.alternates {
            first.add_empty(alternate.symbols().to_vec());
        }
    }

    follow.add(grammar.start().clone(), grammar.end_marker().clone());

    loop {
        first.clear_dirty();
        follow.clear_dirty();

        first_of_every_known_word(grammar, &mut first);
        first_of_every_rule(grammar, &mut first);
        follow_across_every_rule(grammar, &mut first, &mut follow);

        if !first.dirty() && !follow.dirty() {
            break;
        }
    }

    (first, follow)
}

/// Step (a): for every sequence `word = [X, ...rest]` currently keyed in
/// FIRST, extend FIRST(word) according to what `X` is.
fn first_of_every_known_word(grammar: &Grammar, first: &mut FirstFollowSet) {
    let words: Vec<_> = first.keys().cloned().collect();

    for word in words {
        let Some(x) = word.head() else { continue };
        let x = x.clone();

        if x.is_terminal() {
            first.add(word, x);
        } else if x.is_nonterminal() {
            let first_x = first.get(x.clone());
            if !first_x.contains(grammar.epsilon()) {
                first.add(word, first_x);
            } else {
                let rest = word.tail();
                let mut first_x_minus_epsilon = first_x;
                first_x_minus_epsilon.remove(grammar.epsilon());
                let first_rest = first.get(rest);
                first.add(word.clone(), first_x_minus_epsilon);
                first.add(word, first_rest);
            }
        } else if x.is_epsilon() && word.len() == 1 {
            first.add(word, x);
        }
    }
}

/// Step (b): for every rule `A -> w`, add FIRST(w) to FIRST(A).
fn first_of_every_rule(grammar: &Grammar, first: &mut FirstFollowSet) {
    for rule in grammar.rules() {
        for alternate in &rule.alternates {
            let first_alternate = first.get(alternate.symbols().to_vec());
            first.add(rule.nonterminal.clone(), first_alternate);
        }
    }
}

/// Step (c): for every rule `A -> X1...Xn` and every nonterminal position
/// `Xi`, propagate FIRST of the suffix (minus Epsilon) and, when the suffix
/// can vanish, FOLLOW(A) as well.
fn follow_across_every_rule(grammar: &Grammar, first: &mut FirstFollowSet, follow: &mut FirstFollowSet) {
    for rule in grammar.rules() {
        for alternate in &rule.alternates {
            let symbols = alternate.symbols();
            for (i, xi) in symbols.iter().enumerate() {
                if !xi.is_nonterminal() {
                    continue;
                }

                let suffix = symbols[i + 1..].to_vec();
                first.add_empty(suffix.clone());
                let first_suffix = first.get(suffix.clone());

                let mut first_suffix_minus_epsilon = first_suffix.clone();
                first_suffix_minus_epsilon.remove(grammar.epsilon());
                follow.add(xi.clone(), first_suffix_minus_epsilon);

                if suffix.is_empty() || first_suffix.contains(grammar.epsilon()) {
                    let follow_a = follow.get(rule.nonterminal.clone());
                    follow.add(xi.clone(), follow_a);
                }
            }
        }
    }
}
