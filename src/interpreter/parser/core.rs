use crate::{
    error::ParseError,
    interpreter::lexer::{Token, tokenize},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Tokenizes an expression and wraps it in one pair of parentheses, ready to
/// be inlined as the argument of the built-in `expression` function.
///
/// A terminating `;` is dropped.
///
/// # Example
/// ```
/// use scopecalc::interpreter::{lexer::Token, parser::core::wrap_expression};
///
/// assert_eq!(wrap_expression("x + 1;"),
///            vec![Token::LParen,
///                 Token::word("x"),
///                 Token::Plus,
///                 Token::word("1"),
///                 Token::RParen]);
/// ```
#[must_use]
pub fn wrap_expression(expression: &str) -> Vec<Token> {
    let mut tokens = tokenize(expression);
    if tokens.last() == Some(&Token::Semicolon) {
        tokens.pop();
    }

    let mut wrapped = Vec::with_capacity(tokens.len() + 2);
    wrapped.push(Token::LParen);
    wrapped.extend(tokens);
    wrapped.push(Token::RParen);
    wrapped
}
