use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult, scope::ScopeStack},
    util::num::is_numeric,
};

/// Converts an inlined infix token sequence into postfix order.
///
/// This is a shunting-yard pass. Numbers are emitted as they are, and known
/// variables are emitted as their current value rather than their name.
/// Unary negation and `(` go straight onto the operator stack. `*` and `/`
/// first pop pending negations, `*` and `/`; `+` and `-` pop every pending
/// operator down to the nearest `(`. A `)` pops until its matching `(`, which
/// is dropped.
///
/// The inliner wraps every expression in parentheses, so a well-formed input
/// leaves the operator stack empty.
///
/// # Errors
/// - `UnknownToken` for a word that is neither a number nor a visible
///   variable, and for punctuation that has no place in an expression (`,`,
///   `:`, `;`, `=`).
/// - `UnbalancedParentheses` when a `)` has no `(` to close, or the input
///   ends with one still open.
///
/// # Example
/// ```
/// use scopecalc::interpreter::{
///     lexer::{Token, tokenize},
///     parser::postfix::to_postfix,
///     scope::ScopeStack,
///     value::core::{VarKind, Variable},
/// };
///
/// let mut scopes = ScopeStack::new();
/// scopes.declare_variable("x", Variable::new(VarKind::Int, "5"));
///
/// let postfix = to_postfix(&tokenize("(2+x*4)"), &scopes, 1).unwrap();
/// assert_eq!(postfix,
///            vec![Token::word("2"),
///                 Token::word("5"),
///                 Token::word("4"),
///                 Token::Star,
///                 Token::Plus]);
///
/// assert!(to_postfix(&tokenize("(y)"), &scopes, 2).is_err());
/// assert!(to_postfix(&tokenize("((2+x)"), &scopes, 3).is_err());
/// ```
pub fn to_postfix(tokens: &[Token], scopes: &ScopeStack, line: usize) -> ParseResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::Word(word) if is_numeric(word) => output.push(token.clone()),
            Token::Word(word) => {
                let variable =
                    scopes.lookup_variable(word)
                          .ok_or_else(|| ParseError::UnknownToken { token: word.clone(),
                                                                    line })?;
                output.push(Token::Word(variable.value.clone()));
            },
            Token::Negate | Token::LParen => operators.push(token.clone()),
            Token::Star | Token::Slash => {
                pop_while(&mut operators, &mut output, |op| {
                    matches!(op, Token::Negate | Token::Star | Token::Slash)
                });
                operators.push(token.clone());
            },
            Token::Plus | Token::Minus => {
                pop_while(&mut operators, &mut output, |op| {
                    matches!(op,
                             Token::Negate | Token::Star | Token::Slash | Token::Plus | Token::Minus)
                });
                operators.push(token.clone());
            },
            Token::RParen => loop {
                match operators.pop() {
                    Some(Token::LParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(ParseError::UnbalancedParentheses { line }),
                }
            },
            Token::Comma | Token::Colon | Token::Semicolon | Token::Equals => {
                return Err(ParseError::UnknownToken { token: token.to_string(),
                                                      line });
            },
        }
    }

    if !operators.is_empty() {
        return Err(ParseError::UnbalancedParentheses { line });
    }

    Ok(output)
}

/// Moves operators from the top of the stack to the output while `pred`
/// holds for them.
fn pop_while(operators: &mut Vec<Token>, output: &mut Vec<Token>, pred: impl Fn(&Token) -> bool) {
    while let Some(top) = operators.last() {
        if !pred(top) {
            break;
        }
        if let Some(op) = operators.pop() {
            output.push(op);
        }
    }
}
