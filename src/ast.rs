use crate::interpreter::value::core::Function;

/// One classified line of a calculator program.
///
/// The driver turns each non-blank source line into an `Instruction`; the
/// [`Context`](crate::interpreter::evaluator::core::Context) carries it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `name(tag)=:value;`
    Declaration {
        /// Name of the new variable.
        name:  String,
        /// The raw type tag, `i` or `f` when well formed.
        tag:   String,
        /// The raw value text.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `print` or `print a, b`.
    Display {
        /// Names to show; empty means every variable.
        names: Vec<String>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name(p1, p2): body;`
    FunctionDefinition {
        /// Name of the function.
        name:     String,
        /// Parameters and body.
        function: Function,
        /// Line number in the source code.
        line:     usize,
    },
    /// `name = expression;`
    Assignment {
        /// Variable receiving the result.
        name:       String,
        /// The expression text, terminating `;` included if present.
        expression: String,
        /// Line number in the source code.
        line:       usize,
    },
}

impl Instruction {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use scopecalc::ast::Instruction;
    ///
    /// let instruction = Instruction::Display { names: Vec::new(),
    ///                                          line:  5, };
    ///
    /// assert_eq!(instruction.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Declaration { line, .. }
            | Self::Display { line, .. }
            | Self::FunctionDefinition { line, .. }
            | Self::Assignment { line, .. } => *line,
        }
    }
}
