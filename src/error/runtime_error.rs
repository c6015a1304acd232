#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while inlining or evaluating an
/// expression, or while mutating the scope stack.
pub enum RuntimeError {
    /// An operand of an arithmetic operator is not a valid number.
    InvalidNumber {
        /// The operand text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An operator had fewer values in front of it than it consumes.
    MissingOperand {
        /// The operator that could not be applied.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// The postfix sequence did not reduce to exactly one value.
    MalformedExpression {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a variable that no scope declares.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied more arguments than the function has parameters.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments found at the call site.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Function calls kept expanding past the inlining depth limit.
    InliningTooDeep {
        /// The function being expanded when the limit was hit.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to redefine the built-in `expression` wrapper.
    BuiltinFunctionRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl RuntimeError {
    /// Returns the source line the error is attached to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::InvalidNumber { line, .. }
            | Self::MissingOperand { line, .. }
            | Self::MalformedExpression { line }
            | Self::UnknownVariable { line, .. }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::InliningTooDeep { line, .. }
            | Self::BuiltinFunctionRedefinition { line, .. } => *line,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { token, line } => {
                write!(f, "[{line}] ERROR: can't parse float {token}")
            },
            Self::MissingOperand { operator, line } => write!(f,
                                                              "[{line}] ERROR: missing operand for '{operator}'"),
            Self::MalformedExpression { line } => write!(f,
                                                         "[{line}] ERROR: expression does not reduce to a single value"),
            Self::UnknownVariable { name, line } => {
                write!(f, "[{line}] ERROR: unknown variable: {name}")
            },
            Self::ArgumentCountMismatch { name,
                                         expected,
                                         found,
                                         line, } => write!(f,
                                                           "[{line}] ERROR: '{name}' takes {expected} argument(s) but {found} were supplied"),
            Self::InliningTooDeep { name, line } => write!(f,
                                                           "[{line}] ERROR: function '{name}' expands too deeply (is it recursive?)"),
            Self::BuiltinFunctionRedefinition { name, line } => write!(f,
                                                                       "[{line}] ERROR: cannot redefine built-in function '{name}'"),
        }
    }
}

impl std::error::Error for RuntimeError {}
