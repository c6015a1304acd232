/// Parsing errors.
///
/// Defines the errors raised while classifying a line or turning an
/// expression into postfix order: unknown identifiers, unsupported notations,
/// bad declaration tags and malformed definitions.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors raised while inlining functions, reducing postfix
/// sequences, or updating variables that no scope owns.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error a calculator instruction can produce.
///
/// Every variant displays as `[<line>] ERROR: <detail>`, so the driver can
/// print it as-is and move on to the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The instruction could not be read.
    Parse(ParseError),
    /// The instruction was read but could not be carried out.
    Runtime(RuntimeError),
}

impl Error {
    /// Returns the source line the error is attached to.
    ///
    /// # Example
    /// ```
    /// use scopecalc::error::{Error, RuntimeError};
    ///
    /// let error = Error::from(RuntimeError::MalformedExpression { line: 7 });
    /// assert_eq!(error.line(), 7);
    /// ```
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => e.fmt(f),
            Self::Runtime(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}
