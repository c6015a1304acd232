#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while reading an instruction, before
/// any arithmetic is performed.
pub enum ParseError {
    /// An identifier in an expression is neither a number nor a known
    /// variable.
    UnknownToken {
        /// The offending token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A `(` without its `)`, or the other way round.
    UnbalancedParentheses {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The requested notation is not one the calculator knows about.
    UnknownNotation {
        /// The requested notation.
        notation: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The requested notation is reserved but has no evaluator.
    NotationNotImplemented {
        /// The requested notation.
        notation: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A variable declaration used a type tag other than `i` or `f`.
    InvalidTypeTag {
        /// The tag found between the parentheses.
        tag:  String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A variable declaration did not follow `name(tag)=:value;`.
    MalformedDeclaration {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function definition did not follow `name(p1, p2): body;`.
    MalformedDefinition {
        /// Details about what is wrong with the definition.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The line is not a declaration, display, definition or assignment.
    MalformedStatement {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// Returns the source line the error is attached to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnknownToken { line, .. }
            | Self::UnbalancedParentheses { line }
            | Self::UnknownNotation { line, .. }
            | Self::NotationNotImplemented { line, .. }
            | Self::InvalidTypeTag { line, .. }
            | Self::MalformedDeclaration { line }
            | Self::MalformedDefinition { line, .. }
            | Self::MalformedStatement { line } => *line,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownToken { token, line } => {
                write!(f, "[{line}] ERROR: unknown token: {token}")
            },
            Self::UnbalancedParentheses { line } => {
                write!(f, "[{line}] ERROR: unbalanced parentheses")
            },
            Self::UnknownNotation { notation, line } => {
                write!(f, "[{line}] ERROR: unknown notation: {notation}")
            },
            Self::NotationNotImplemented { notation, line } => {
                write!(f, "[{line}] ERROR: notation not implemented: {notation}")
            },
            Self::InvalidTypeTag { tag, line } => write!(f,
                                                         "[{line}] ERROR: couldn't save variable, invalid type '{tag}'"),
            Self::MalformedDeclaration { line } => write!(f,
                                                          "[{line}] ERROR: malformed declaration. Example: x(i)=:5;"),
            Self::MalformedDefinition { details, line } => write!(f,
                                                                  "[{line}] ERROR: malformed function definition: {details}. Example: double(n): n*2;"),
            Self::MalformedStatement { line } => {
                write!(f, "[{line}] ERROR: unrecognised instruction")
            },
        }
    }
}

impl std::error::Error for ParseError {}
