use logos::Logos;

/// Represents a lexical token in an expression.
///
/// Numbers and identifiers share the `Word` variant; they are told apart only
/// when the converter tries to read the word as a number. Every other
/// character class of the language has its own variant. `Negate` is never
/// produced by the lexer itself; [`tokenize`] rewrites unary `-` into it.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// A run of characters that are not punctuation, such as `42`, `2.5` or
    /// `radius`.
    #[regex(r"[^+\-*/(),:;=]+", |lex| lex.slice().to_string())]
    Word(String),
    /// `+`
    #[token("+")]
    Plus,
    /// Binary `-`.
    #[token("-")]
    Minus,
    /// Unary `-`, written `~` when displayed.
    Negate,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `=`
    #[token("=")]
    Equals,
}

impl Token {
    /// Convenience constructor for word tokens.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::lexer::Token;
    ///
    /// assert_eq!(Token::word("x"), Token::Word("x".to_string()));
    /// ```
    #[must_use]
    pub fn word(text: &str) -> Self {
        Self::Word(text.to_string())
    }

    /// Returns the word text, or `None` for punctuation.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(text) => Some(text),
            _ => None,
        }
    }

    /// Whether a `-` directly after this token negates instead of subtracts.
    const fn precedes_operand(&self) -> bool {
        matches!(self,
                 Self::LParen
                 | Self::Slash
                 | Self::Star
                 | Self::Plus
                 | Self::Minus
                 | Self::Negate
                 | Self::Comma
                 | Self::Colon
                 | Self::Equals)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word(text) => f.write_str(text),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Negate => f.write_str("~"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Comma => f.write_str(","),
            Self::Colon => f.write_str(":"),
            Self::Semicolon => f.write_str(";"),
            Self::Equals => f.write_str("="),
        }
    }
}

/// Splits an expression into tokens.
///
/// All whitespace is removed before lexing, so `3 4` is the single word `34`.
/// A `-` at the start, or after an operator, `(`, `,`, `:` or `=`, becomes
/// [`Token::Negate`]. Tokenizing never fails: anything that is not
/// punctuation ends up inside a word.
///
/// # Example
/// ```
/// use scopecalc::interpreter::lexer::{Token, tokenize};
///
/// assert_eq!(tokenize("3 + 4*2"),
///            vec![Token::word("3"),
///                 Token::Plus,
///                 Token::word("4"),
///                 Token::Star,
///                 Token::word("2")]);
///
/// assert_eq!(tokenize("-3+4"),
///            vec![Token::Negate, Token::word("3"), Token::Plus, Token::word("4")]);
/// ```
#[must_use]
pub fn tokenize(expression: &str) -> Vec<Token> {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();

    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(&compact);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok),
            Err(()) => tokens.push(Token::word(lexer.slice())),
        }
    }

    mark_unary_minus(&mut tokens);
    tokens
}

/// Rewrites every unary `-` into [`Token::Negate`] in a single left-to-right
/// pass.
fn mark_unary_minus(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        if tokens[i] == Token::Minus && (i == 0 || tokens[i - 1].precedes_operand()) {
            tokens[i] = Token::Negate;
        }
    }
}
