//! CLI module for the predictive parser application.

use crate::recognizer::Recognizer;
use crate::solver::solve;
use crate::table::ParsingTable;
use crate::text_grammar::parse_text_grammar;
use crate::tokenizer::tokenize;
use std::io::{self, BufRead};

/// Main CLI runner: reads a grammar, reports its LL(1)-ness, then recognizes
/// strings read one per line until a blank line.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let Some(grammar_text) = read_grammar_text(&mut lines)? else {
        return Ok(());
    };

    let grammar = match parse_text_grammar(&grammar_text, Some("e"), "$") {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("invalid grammar: {e}");
            return Ok(());
        }
    };

    let (first, follow) = solve(&grammar);
    let table = ParsingTable::build(&grammar, &first, &follow);

    if table.is_ll1() {
        println!("Grammar is LL(1).");
    } else {
        println!("Grammar is not LL(1).");
        for conflict in table.conflicts() {
            println!(
                "  conflict at M[{}, {}]: {} alternates",
                conflict.nonterminal,
                conflict.terminal,
                conflict.alternates.len()
            );
        }
    }

    let recognizer = Recognizer::new(&grammar, &table);
    parse_strings(&recognizer, &mut lines)
}

/// Reads the grammar's textual form: a first line giving the number of
/// production lines that follow. Returns `None` on immediate EOF.
fn read_grammar_text<R: BufRead>(lines: &mut io::Lines<R>) -> io::Result<Option<String>> {
    let n_line = match lines.next() {
        Some(line) => line?,
        None => return Ok(None),
    };

    let n: usize = n_line
        .trim()
        .parse()
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "expected a production count"))?;

    let mut production_lines = Vec::with_capacity(n);
    for _ in 0..n {
        let line = lines
            .next()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "expected a production line"))??;
        production_lines.push(line);
    }

    Ok(Some(production_lines.join("\n")))
}

/// Recognizes one candidate string per line until a blank line or EOF,
/// printing `yes`/`no` for each.
fn parse_strings<R: BufRead>(recognizer: &Recognizer, lines: &mut io::Lines<R>) -> io::Result<()> {
    for line in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }

        let accepted = tokenize(trimmed).is_ok_and(|tokens| recognizer.recognize(tokens).is_ok());
        println!("{}", if accepted { "yes" } else { "no" });
    }

    Ok(())
}
