use log::debug;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult, lexer::Token, scope::ScopeStack, value::core::Function,
    },
};

/// How many calls may be nested inside one another, counting calls that
/// appear in function bodies.
pub const MAX_INLINE_DEPTH: usize = 64;

/// Inlines a call to `target` and returns a flat token sequence in which no
/// user function call remains.
///
/// `call` is the parenthesized argument list, outer parentheses included:
/// `( arg1 , arg2 , ... )`. Arguments are split at top-level commas, calls
/// inside them are inlined recursively, and each occurrence of a parameter in
/// the body is replaced by its argument wrapped in parentheses. Calls written
/// in the body itself are expanded afterwards, and the whole result is wrapped
/// in one more pair of parentheses.
///
/// A word only counts as a call when it names a function visible in `scopes`
/// and is directly followed by `(`.
///
/// # Errors
/// - `ArgumentCountMismatch` when a call has more arguments than parameters.
/// - `InliningTooDeep` when expansion nests deeper than [`MAX_INLINE_DEPTH`].
///
/// # Example
/// ```
/// use scopecalc::interpreter::{
///     lexer::{Token, tokenize},
///     parser::inline::inline,
///     scope::ScopeStack,
///     value::core::Function,
/// };
///
/// let mut scopes = ScopeStack::new();
/// let double = Function::new(vec!["n".to_string()], tokenize("n*2"));
/// scopes.declare_function("double", double.clone(), 1).unwrap();
///
/// let tokens = inline(&scopes, "double", &double, &tokenize("(5)"), 2).unwrap();
/// assert_eq!(tokens,
///            vec![Token::LParen,
///                 Token::LParen,
///                 Token::word("5"),
///                 Token::RParen,
///                 Token::Star,
///                 Token::word("2"),
///                 Token::RParen]);
/// ```
pub fn inline(scopes: &ScopeStack,
              name: &str,
              target: &Function,
              call: &[Token],
              line: usize)
              -> EvalResult<Vec<Token>> {
    Inliner { scopes, line }.inline_call(name, target, call, 1)
}

/// A function call found at some position of a token buffer.
struct Call<'a> {
    name:     &'a str,
    function: &'a Function,
    /// Index of the opening parenthesis.
    open:     usize,
    /// Index one past the matching closing parenthesis.
    end:      usize,
}

struct Inliner<'a> {
    scopes: &'a ScopeStack,
    line:   usize,
}

impl<'a> Inliner<'a> {
    fn inline_call(&self,
                   name: &str,
                   target: &Function,
                   call: &[Token],
                   depth: usize)
                   -> EvalResult<Vec<Token>> {
        if depth > MAX_INLINE_DEPTH {
            return Err(RuntimeError::InliningTooDeep { name: name.to_string(),
                                                       line: self.line, });
        }

        // The wrapper takes the whole expression, commas included.
        let inner = strip_outer_parens(call);
        let raw_arguments = if name == Function::WRAPPER {
            vec![inner]
        } else {
            split_arguments(inner)
        };
        if raw_arguments.len() > target.params.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name:     name.to_string(),
                                                             expected: target.params.len(),
                                                             found:    raw_arguments.len(),
                                                             line:     self.line, });
        }

        let mut arguments = raw_arguments.into_iter()
                                         .map(|argument| self.expand(argument, depth))
                                         .collect::<EvalResult<Vec<_>>>()?;
        arguments.resize(target.params.len(), Vec::new());

        let mut body = Vec::with_capacity(target.body.len());
        for token in &target.body {
            match token.as_word().and_then(|word| target.param_index(word)) {
                Some(index) => {
                    body.push(Token::LParen);
                    body.extend(arguments[index].iter().cloned());
                    body.push(Token::RParen);
                },
                None => body.push(token.clone()),
            }
        }

        let mut result = Vec::with_capacity(body.len() + 2);
        result.push(Token::LParen);
        result.extend(self.expand(&body, depth)?);
        result.push(Token::RParen);

        debug!("line {}: inlined '{name}' at depth {depth} into {} tokens",
               self.line,
               result.len());
        Ok(result)
    }

    /// Copies `tokens`, replacing every call with its inlined form.
    fn expand(&self, tokens: &[Token], depth: usize) -> EvalResult<Vec<Token>> {
        let mut expanded = Vec::with_capacity(tokens.len());
        let mut cursor = 0;

        while cursor < tokens.len() {
            if let Some(call) = self.call_at(tokens, cursor) {
                let inlined = self.inline_call(call.name,
                                               call.function,
                                               &tokens[call.open..call.end],
                                               depth + 1)?;
                expanded.extend(inlined);
                cursor = call.end;
            } else {
                expanded.push(tokens[cursor].clone());
                cursor += 1;
            }
        }

        Ok(expanded)
    }

    /// Recognises `name ( ... )` at `cursor`, where `name` is a known function
    /// and the parentheses are balanced.
    fn call_at<'t>(&self, tokens: &'t [Token], cursor: usize) -> Option<Call<'t>>
        where 'a: 't
    {
        let name = tokens.get(cursor)?.as_word()?;
        if tokens.get(cursor + 1) != Some(&Token::LParen) {
            return None;
        }
        let function = self.scopes.lookup_function(name)?;
        let open = cursor + 1;
        let end = matching_paren(tokens, open)? + 1;

        Some(Call { name,
                    function,
                    open,
                    end })
    }
}

/// Returns the index of the `)` closing the `(` at `open`.
fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut nesting = 0usize;
    for (offset, token) in tokens[open..].iter().enumerate() {
        match token {
            Token::LParen => nesting += 1,
            Token::RParen => {
                nesting -= 1;
                if nesting == 0 {
                    return Some(open + offset);
                }
            },
            _ => {},
        }
    }
    None
}

fn strip_outer_parens(call: &[Token]) -> &[Token] {
    match call {
        [Token::LParen, inner @ .., Token::RParen] => inner,
        _ => call,
    }
}

/// Splits an argument list at the commas that are not inside parentheses.
///
/// An empty list yields no arguments at all.
fn split_arguments(tokens: &[Token]) -> Vec<&[Token]> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut arguments = Vec::new();
    let mut nesting = 0usize;
    let mut start = 0;

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => nesting += 1,
            Token::RParen => nesting = nesting.saturating_sub(1),
            Token::Comma if nesting == 0 => {
                arguments.push(&tokens[start..index]);
                start = index + 1;
            },
            _ => {},
        }
    }
    arguments.push(&tokens[start..]);

    arguments
}
