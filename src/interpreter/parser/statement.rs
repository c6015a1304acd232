use crate::{
    ast::Instruction,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::ParseResult,
        value::core::Function,
    },
    util::num::is_numeric,
};

/// Classifies a single source line.
///
/// The line may be one of:
/// - blank, or a `#` comment (yields `None`).
/// - a display request: `print` or `print a, b`.
/// - a variable declaration: `name(tag)=:value;`.
/// - a function definition: `name(p1, p2): body;`.
/// - an assignment: `name = expression;`.
///
/// Whitespace is not significant except to separate `print` from the names
/// that follow it. The forms are tried in that order and the first match is
/// returned.
///
/// # Errors
/// Returns `MalformedDeclaration`, `MalformedDefinition` or
/// `MalformedStatement` when the line looks like a form but does not follow
/// it, or matches none.
///
/// # Example
/// ```
/// use scopecalc::{ast::Instruction, interpreter::parser::statement::parse_instruction};
///
/// let instruction = parse_instruction("x(i)=: -5;", 1).unwrap();
/// assert_eq!(instruction,
///            Some(Instruction::Declaration { name:  "x".to_string(),
///                                            tag:   "i".to_string(),
///                                            value: "-5".to_string(),
///                                            line:  1, }));
///
/// assert_eq!(parse_instruction("   ", 2).unwrap(), None);
/// assert!(parse_instruction("3 + 4", 3).is_err());
/// ```
pub fn parse_instruction(source: &str, line: usize) -> ParseResult<Option<Instruction>> {
    let trimmed = source.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    if let Some(instruction) = parse_display(trimmed, line) {
        return Ok(Some(instruction));
    }

    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(instruction) = parse_declaration(&compact, line)? {
        return Ok(Some(instruction));
    }
    if let Some(instruction) = parse_function_definition(&compact, line)? {
        return Ok(Some(instruction));
    }
    if let Some(instruction) = parse_assignment(&compact, line)? {
        return Ok(Some(instruction));
    }

    Err(ParseError::MalformedStatement { line })
}

/// Parses `print` followed by an optional list of names.
fn parse_display(trimmed: &str, line: usize) -> Option<Instruction> {
    let rest = trimmed.strip_prefix("print")?;
    if !(rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ';')) {
        return None;
    }

    let names = tokenize(rest).into_iter()
                              .filter_map(|token| match token {
                                  Token::Word(name) => Some(name),
                                  _ => None,
                              })
                              .collect();

    Some(Instruction::Display { names, line })
}

/// Parses `name(tag)=:value;`.
///
/// The value is kept as raw text so that signed literals survive unchanged.
fn parse_declaration(compact: &str, line: usize) -> ParseResult<Option<Instruction>> {
    let Some(marker) = compact.find(")=:") else {
        return Ok(None);
    };

    let (name, tag) = compact[..marker].split_once('(')
                                       .ok_or(ParseError::MalformedDeclaration { line })?;
    let value = &compact[marker + 3..];
    let value = value.strip_suffix(';').unwrap_or(value);

    if !is_identifier(name) || tag.is_empty() || value.is_empty() {
        return Err(ParseError::MalformedDeclaration { line });
    }

    Ok(Some(Instruction::Declaration { name: name.to_string(),
                                       tag: tag.to_string(),
                                       value: value.to_string(),
                                       line }))
}

/// Parses `name(p1, p2): body;`.
fn parse_function_definition(compact: &str, line: usize) -> ParseResult<Option<Instruction>> {
    if !compact.contains(':') {
        return Ok(None);
    }

    let malformed = |details: &str| ParseError::MalformedDefinition { details: details.to_string(),
                                                                      line };

    let mut tokens = tokenize(compact);
    if tokens.last() == Some(&Token::Semicolon) {
        tokens.pop();
    }

    let name = match tokens.as_slice() {
        [Token::Word(name), Token::LParen, ..] if is_identifier(name) => name.clone(),
        _ => return Err(malformed("expected a name followed by '('")),
    };

    let close = tokens.iter()
                      .position(|t| *t == Token::RParen)
                      .ok_or_else(|| malformed("missing ')' after the parameters"))?;

    let mut params: Vec<String> = Vec::new();
    let mut expect_name = true;
    for token in &tokens[2..close] {
        match (token, expect_name) {
            (Token::Word(param), true) if is_identifier(param) => {
                if params.contains(param) {
                    return Err(malformed(&format!("parameter '{param}' appears twice")));
                }
                params.push(param.clone());
                expect_name = false;
            },
            (Token::Comma, false) => expect_name = true,
            _ => return Err(malformed("parameters must be names separated by ','")),
        }
    }
    if expect_name && !params.is_empty() {
        return Err(malformed("trailing ',' in the parameters"));
    }

    if tokens.get(close + 1) != Some(&Token::Colon) {
        return Err(malformed("expected ':' after the parameters"));
    }
    let body = tokens[close + 2..].to_vec();
    if body.is_empty() {
        return Err(malformed("empty body"));
    }

    Ok(Some(Instruction::FunctionDefinition { name,
                                              function: Function::new(params, body),
                                              line }))
}

/// Parses `name = expression;`.
fn parse_assignment(compact: &str, line: usize) -> ParseResult<Option<Instruction>> {
    let Some((name, expression)) = compact.split_once('=') else {
        return Ok(None);
    };

    if !is_identifier(name) {
        return Err(ParseError::MalformedStatement { line });
    }

    Ok(Some(Instruction::Assignment { name: name.to_string(),
                                      expression: expression.to_string(),
                                      line }))
}

/// A name is a single non-numeric word.
fn is_identifier(text: &str) -> bool {
    !text.is_empty()
    && !is_numeric(text)
    && matches!(tokenize(text).as_slice(), [Token::Word(word)] if word == text)
}
