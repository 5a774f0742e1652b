//! Drives the predictive parsing table over a token stream.
//!
//! Grounded in the source's `LLParser.parse`: a stack seeded with
//! `[EndMarker, Start]`, repeatedly popped against the current lookahead —
//! match a terminal, discard an epsilon, or replace a nonterminal with the
//! table's predicted alternate (reversed, so the leftmost symbol lands on
//! top) — until the stack and the input both run dry.

use crate::error::ParseError;
use crate::grammar::Grammar;
use crate::peekable::PeekableStream;
use crate::stack::Stack;
use crate::symbol::Symbol;
use crate::table::ParsingTable;
use crate::token::{Token, TokenType};

/// A token cursor that transparently skips `Whitespace` tokens, the way the
/// recognizer expects its input prepared.
struct TokenCursor<I: Iterator<Item = Token>> {
    stream: PeekableStream<I>,
}

impl<I: Iterator<Item = Token>> TokenCursor<I> {
    fn new(iter: I) -> Self {
        Self { stream: PeekableStream::new(iter) }
    }

    fn next(&mut self) -> Option<Token> {
        loop {
            while matches!(self.stream.peek(), Some(t) if t.token_type == TokenType::Whitespace) {
                self.stream.next();
            }
            return self.stream.next();
        }
    }
}

/// Recognizes token streams against one grammar's parsing table.
pub struct Recognizer<'a> {
    grammar: &'a Grammar,
    table: &'a ParsingTable,
}

impl<'a> Recognizer<'a> {
    pub fn new(grammar: &'a Grammar, table: &'a ParsingTable) -> Self {
        Self { grammar, table }
    }

    /// Recognizes `tokens`, which must end with exactly one `EndOfInput`
    /// token. Returns `Ok(())` if the input is accepted.
    pub fn recognize(&self, tokens: impl IntoIterator<Item = Token>) -> Result<(), ParseError> {
        let mut stack: Stack<Symbol> = Stack::new();
        stack.push(self.grammar.end_marker().clone());
        stack.push(self.grammar.start().clone());

        let mut cursor = TokenCursor::new(tokens.into_iter());
        let mut current = cursor.next();

        while let (Some(top), Some(token)) = (stack.peek(), current.as_ref()) {
            let lookahead = if token.token_type == TokenType::EndOfInput {
                self.grammar.end_marker().clone()
            } else {
                Symbol::terminal(token.lexeme().unwrap_or_default())
            };

            if top.is_terminal() && top.name() == lookahead.name() {
                stack.pop();
                current = cursor.next();
            } else if top.is_epsilon() {
                stack.pop();
            } else if top.is_end_marker() && token.token_type == TokenType::EndOfInput {
                stack.pop();
                current = cursor.next();
            } else if top.is_nonterminal() {
                let top = top.clone();
                match self.table.get(&top, &lookahead) {
                    Some(alternates) if !alternates.is_empty() => {
                        // A conflict cell (more than one alternate) deterministically
                        // picks the first; `table.conflicts()` is how callers detect this.
                        stack.pop();
                        for symbol in alternates[0].symbols().iter().rev() {
                            stack.push(symbol.clone());
                        }
                    }
                    _ => {
                        return Err(ParseError::NoTableEntry {
                            nonterminal: top.to_string(),
                            lookahead: lookahead.to_string(),
                            stack: stack.iter().map(Symbol::to_string).collect(),
                        });
                    }
                }
            } else {
                return Err(ParseError::TerminalMismatch {
                    expected: top.to_string(),
                    found: lookahead.to_string(),
                    stack: stack.iter().map(Symbol::to_string).collect(),
                });
            }
        }

        match (stack.is_empty(), current.is_none()) {
            (true, true) => Ok(()),
            (false, true) => Err(ParseError::TruncatedInput { stack: stack.iter().map(Symbol::to_string).collect() }),
            (true, false) => {
                Err(ParseError::TrailingInput { remaining: current.map(|t| t.to_string()).unwrap_or_default() })
            }
            (false, false) => unreachable!("the loop only exits when the stack or the input is exhausted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Alternate, Rule};
    use crate::solver::solve;
    use crate::tokenizer::tokenize;
    use std::collections::{HashMap, HashSet};

    fn scenario_a() -> Grammar {
        let s = Symbol::start("S");
        let f = Symbol::nonterminal("F");
        let a = Symbol::terminal("a");
        let lparen = Symbol::terminal("(");
        let rparen = Symbol::terminal(")");
        let plus = Symbol::terminal("+");

        let mut rules = HashMap::new();
        rules.insert(
            s.clone(),
            Rule::new(
                s.clone(),
                vec![
                    Alternate::new(vec![f.clone()]),
                    Alternate::new(vec![lparen.clone(), s.clone(), plus.clone(), f.clone(), rparen.clone()]),
                ],
            ),
        );
        rules.insert(f.clone(), Rule::new(f.clone(), vec![Alternate::new(vec![a.clone()])]));

        let terminals: HashSet<Symbol> = [a, lparen, rparen, plus].into_iter().collect();
        Grammar::new(terminals, rules, s, Symbol::epsilon("e"), Symbol::end_marker("$")).unwrap()
    }

    #[test]
    fn accepts_a_valid_sentence() {
        let grammar = scenario_a();
        let (first, follow) = solve(&grammar);
        let table = ParsingTable::build(&grammar, &first, &follow);
        let recognizer = Recognizer::new(&grammar, &table);

        let tokens = tokenize("( a + a )").unwrap();
        assert!(recognizer.recognize(tokens).is_ok());
    }

    #[test]
    fn rejects_truncated_input() {
        let grammar = scenario_a();
        let (first, follow) = solve(&grammar);
        let table = ParsingTable::build(&grammar, &first, &follow);
        let recognizer = Recognizer::new(&grammar, &table);

        let tokens = tokenize("( a +").unwrap();
        assert!(recognizer.recognize(tokens).is_err());
    }

    #[test]
    fn rejects_trailing_input() {
        let grammar = scenario_a();
        let (first, follow) = solve(&grammar);
        let table = ParsingTable::build(&grammar, &first, &follow);
        let recognizer = Recognizer::new(&grammar, &table);

        let tokens = tokenize("a a").unwrap();
        assert!(recognizer.recognize(tokens).is_err());
    }

    #[test]
    fn rejects_unknown_terminal() {
        let grammar = scenario_a();
        let (first, follow) = solve(&grammar);
        let table = ParsingTable::build(&grammar, &first, &follow);
        let recognizer = Recognizer::new(&grammar, &table);

        let tokens = tokenize("b").unwrap();
        match recognizer.recognize(tokens) {
            Err(ParseError::NoTableEntry { .. }) | Err(ParseError::TerminalMismatch { .. }) => {}
            other => panic!("expected a parse error, got {other:?}"),
        }
    }
}
