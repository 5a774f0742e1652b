//! Predictive top-down (LL(1)) parser generator and recognizer.
//!
//! Reads a grammar and a batch of candidate strings from standard input and
//! reports, for each, whether it belongs to the grammar's language.
//!
//! # References
//! Aho, Alfred V. et al. "Compilers: Principles, Techniques, and Tools" (2nd Edition).
//! Addison-Wesley, 2006.

mod cli;
mod error;
mod first_follow;
mod grammar;
mod peekable;
mod recognizer;
mod solver;
mod stack;
mod symbol;
mod table;
mod text_grammar;
mod token;
mod tokenizer;

use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
