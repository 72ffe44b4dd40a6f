use logos::Logos;

use crate::error::ShellError;

/// Maximum number of whitespace-delimited tokens in one command line.
pub const MAX_ARGS: usize = 512;

/// Lexical grammar of a command line: maximal runs of non-whitespace.
///
/// There is deliberately no quoting and no operator lexing here; `<`, `>`
/// and `&` are ordinary words until the classifier decides otherwise.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[regex(r"[^ \t\r\n]+")]
    Word,
}

/// Split an expanded line into its argument vector.
///
/// Runs of whitespace collapse, tokens keep their order, and a line with
/// more than [`MAX_ARGS`] tokens is rejected rather than truncated. A
/// blank or whitespace-only line yields an empty vector.
pub fn tokenize(line: &str) -> Result<Vec<String>, ShellError> {
    let mut lexer = Token::lexer(line);
    let mut words = Vec::new();
    while let Some(token) = lexer.next() {
        if let Ok(Token::Word) = token {
            if words.len() == MAX_ARGS {
                return Err(ShellError::TooManyArgs { max: MAX_ARGS });
            }
            words.push(lexer.slice().to_string());
        }
    }
    Ok(words)
}
