//! Splits raw text into a token stream for the recognizer.
//!
//! Grounded in the source's `tokenizer.py`: a first pass (`words()`) that
//! walks the input one character at a time, yielding every whitespace
//! character as its own one-character word and every maximal run of
//! non-whitespace characters as one word, followed by a classification pass
//! that turns each word into a [`Token`] and appends a single `EndOfInput`.

use crate::error::TokenizerError;
use crate::peekable::PeekableStream;
use crate::symbol::TokenValue;
use crate::token::{Token, TokenType};

/// Characters that may never appear inside a `Name` word — they only make
/// sense as the delimiters of a `String` word.
const QUOTE_CHARS: [char; 2] = ['\'', '"'];

fn has_no_stray_quotes(word: &str) -> bool {
    !word.chars().any(|c| QUOTE_CHARS.contains(&c))
}

/// Splits `input` into whitespace characters (one word each) and maximal
/// runs of non-whitespace characters.
fn words(input: &str) -> Vec<String> {
    let mut stream = PeekableStream::new(input.chars());
    let mut out = Vec::new();

    while let Some(&c) = stream.peek() {
        if c.is_whitespace() {
            out.push(stream.next().unwrap().to_string());
            continue;
        }

        let mut word = String::new();
        while let Some(&c) = stream.peek() {
            if c.is_whitespace() {
                break;
            }
            word.push(stream.next().unwrap());
        }
        out.push(word);
    }

    out
}

/// Tokenizes `input`, appending exactly one `EndOfInput` token at the end.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizerError> {
    let mut tokens = Vec::with_capacity(words(input).len() + 1);
    for word in words(input) {
        tokens.push(classify(&word)?);
    }
    tokens.push(Token::new(TokenType::EndOfInput, None));
    Ok(tokens)
}

fn classify(word: &str) -> Result<Token, TokenizerError> {
    if !word.is_empty() && word.chars().all(|c| c.is_ascii_digit()) {
        let value: i64 = word.parse().map_err(|_| TokenizerError::MalformedLexeme(word.to_string()))?;
        return Ok(Token::new(TokenType::Integer, Some(TokenValue::Int(value))));
    }

    if is_quoted(word, '\'') || is_quoted(word, '"') {
        return Ok(Token::new(TokenType::String, Some(TokenValue::Text(word.to_string()))));
    }

    if word.chars().count() == 1 && word.chars().next().is_some_and(char::is_whitespace) {
        return Ok(Token::new(TokenType::Whitespace, Some(TokenValue::Text(word.to_string()))));
    }

    if has_no_stray_quotes(word) {
        return Ok(Token::new(TokenType::Name, Some(TokenValue::Text(word.to_string()))));
    }

    Err(TokenizerError::MalformedLexeme(word.to_string()))
}

/// True if `word` is at least three characters long, opens and closes with
/// `quote`, and its interior contains no stray quote character.
fn is_quoted(word: &str, quote: char) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    if chars[0] != quote || *chars.last().unwrap() != quote {
        return false;
    }
    let interior: String = chars[1..chars.len() - 1].iter().collect();
    has_no_stray_quotes(&interior)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_single_whitespace_characters() {
        let w = words("a b  c");
        assert_eq!(w, vec!["a", " ", "b", " ", " ", "c"]);
    }

    #[test]
    fn tokenizes_name_and_appends_end_of_input() {
        let tokens = tokenize("hello").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token_type, TokenType::Name);
        assert_eq!(tokens[1].token_type, TokenType::EndOfInput);
    }

    #[test]
    fn tokenizes_integer() {
        let tokens = tokenize("42").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::Integer);
        assert_eq!(tokens[0].value, Some(TokenValue::Int(42)));
    }

    #[test]
    fn tokenizes_quoted_string() {
        let tokens = tokenize("'hi there'").unwrap();
        assert_eq!(tokens[0].token_type, TokenType::String);
    }

    #[test]
    fn tokenizes_whitespace_runs_one_token_per_character() {
        let tokens = tokenize("a  b").unwrap();
        assert_eq!(tokens.len(), 5); // a, space, space, b, eof
        assert_eq!(tokens[1].token_type, TokenType::Whitespace);
        assert_eq!(tokens[2].token_type, TokenType::Whitespace);
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = tokenize("'unterminated").unwrap_err();
        assert!(matches!(err, TokenizerError::MalformedLexeme(_)));
    }
}
