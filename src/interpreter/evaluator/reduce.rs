use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, lexer::Token},
    util::num::{format_number, parse_operand, toggle_sign},
};

/// Reduces a postfix token sequence to a single numeric string.
///
/// The sequence is reduced in place with an index cursor rather than a
/// separate value stack. Values move the cursor forward. An operator combines
/// the values right before it, the result replaces them, and the cursor steps
/// back by the number of values consumed. Unary negation toggles the sign of
/// the value before it without parsing it. Binary operators parse both
/// operands as `f64`; division by zero yields `inf`, `-inf` or `NaN`.
///
/// # Errors
/// - `InvalidNumber` when an operand or the final value is not a number.
/// - `MissingOperand` when an operator has too few values before it.
/// - `MalformedExpression` when the sequence does not end as one value.
///
/// # Example
/// ```
/// use scopecalc::interpreter::{evaluator::reduce::evaluate, lexer::Token};
///
/// // 3 4 2 * +  ==  3 + 4 * 2
/// let postfix = vec![Token::word("3"),
///                    Token::word("4"),
///                    Token::word("2"),
///                    Token::Star,
///                    Token::Plus];
/// assert_eq!(evaluate(postfix, 1).unwrap(), "11");
///
/// let postfix = vec![Token::word("5"), Token::word("0"), Token::Slash];
/// assert_eq!(evaluate(postfix, 2).unwrap(), "inf");
/// ```
pub fn evaluate(mut postfix: Vec<Token>, line: usize) -> EvalResult<String> {
    let mut cursor = 0;

    while cursor < postfix.len() {
        match &postfix[cursor] {
            Token::Word(_) => cursor += 1,
            Token::Negate => {
                let negated = toggle_sign(operand(&postfix, cursor, 1, line)?);
                postfix[cursor - 1] = Token::Word(negated);
                postfix.remove(cursor);
            },
            op @ (Token::Plus | Token::Minus | Token::Star | Token::Slash) => {
                let op = op.clone();
                let left = parse_operand(operand(&postfix, cursor, 2, line)?, line)?;
                let right = parse_operand(operand(&postfix, cursor, 1, line)?, line)?;

                let result = match op {
                    Token::Plus => left + right,
                    Token::Minus => left - right,
                    Token::Star => left * right,
                    _ => left / right,
                };

                postfix[cursor - 2] = Token::Word(format_number(result));
                postfix.drain(cursor - 1..=cursor);
                cursor -= 1;
            },
            _ => return Err(RuntimeError::MalformedExpression { line }),
        }
    }

    match postfix.as_slice() {
        [Token::Word(value)] => Ok(format_number(parse_operand(value, line)?)),
        _ => Err(RuntimeError::MalformedExpression { line }),
    }
}

/// Returns the value `back` positions before the operator at `cursor`.
fn operand(postfix: &[Token], cursor: usize, back: usize, line: usize) -> EvalResult<&str> {
    cursor.checked_sub(back)
          .and_then(|index| postfix[index].as_word())
          .ok_or_else(|| RuntimeError::MissingOperand { operator: postfix[cursor].to_string(),
                                                        line })
}
