use log::debug;

use crate::{
    ast::Instruction,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::reduce::evaluate,
        parser::{core::wrap_expression, inline::inline, postfix::to_postfix},
        scope::ScopeStack,
        value::core::{Function, VarKind, Variable},
    },
};

/// Result type used by the evaluator.
///
/// Inlining and reduction return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Result type of whole instructions, which can fail while parsing or while
/// evaluating.
pub type CalcResult<T> = Result<T, Error>;

/// `(name, value)` pairs produced by a display request.
pub type Listing = Vec<(String, String)>;

/// The notation an expression is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Operators between operands: `2 + 3`.
    Infix,
    /// Operators before operands. Reserved.
    Prefix,
    /// Operators after operands. Reserved.
    Postfix,
}

impl Notation {
    /// Decodes a notation name.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownNotation` for any name other than `infix`,
    /// `prefix` or `postfix`.
    pub fn from_name(name: &str, line: usize) -> Result<Self, ParseError> {
        match name {
            "infix" => Ok(Self::Infix),
            "prefix" => Ok(Self::Prefix),
            "postfix" => Ok(Self::Postfix),
            _ => Err(ParseError::UnknownNotation { notation: name.to_string(),
                                                   line }),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Infix => "infix",
            Self::Prefix => "prefix",
            Self::Postfix => "postfix",
        }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct owns the scope stack holding every variable and user-defined
/// function. It is created once per program run and passed by `&mut` to
/// every stage; cloning it gives an independent snapshot for a separate
/// evaluation.
///
/// ## Usage
///
/// ```
/// use scopecalc::interpreter::evaluator::core::Context;
///
/// let mut context = Context::new();
/// context.declare_variable("x", "i", "5", 1).unwrap();
///
/// assert_eq!(context.evaluate_line(2, "x+1", "infix").unwrap(), "6");
/// assert_eq!(context.evaluate_line(3, "2+3*4", "infix").unwrap(), "14");
/// assert_eq!(context.evaluate_line(4, "(2+3)*4", "infix").unwrap(), "20");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Every scope, the base scope included.
    pub scopes: ScopeStack,
}

impl Context {
    /// Creates a new evaluation context holding only the base scope, with
    /// the built-in `expression` wrapper installed.
    #[must_use]
    pub fn new() -> Self {
        Self { scopes: ScopeStack::new() }
    }

    /// Makes sure the base scope and its built-in wrapper exist. Idempotent.
    pub fn ensure_base_scope(&mut self) {
        self.scopes.ensure_base_scope();
    }

    /// Declares a variable in the innermost scope.
    ///
    /// `tag` is `i` for an integer or `f` for a float. The value is stored as
    /// given.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTypeTag` for any other tag.
    ///
    /// # Example
    /// ```
    /// use scopecalc::{error::ParseError, interpreter::evaluator::core::Context};
    ///
    /// let mut context = Context::new();
    /// assert!(context.declare_variable("r", "f", "2.5", 1).is_ok());
    ///
    /// let err = context.declare_variable("s", "q", "1", 2).unwrap_err();
    /// assert!(matches!(err, ParseError::InvalidTypeTag { line: 2, .. }));
    /// ```
    pub fn declare_variable(&mut self,
                            name: &str,
                            tag: &str,
                            value: &str,
                            line: usize)
                            -> Result<(), ParseError> {
        let kind = VarKind::from_tag(tag).ok_or_else(|| {
                                              ParseError::InvalidTypeTag { tag: tag.to_string(),
                                                                           line }
                                          })?;

        debug!("line {line}: declare {kind} {name} = {value}");
        self.scopes
            .declare_variable(name, Variable::new(kind, value));
        Ok(())
    }

    /// Defines a function in the innermost scope.
    ///
    /// # Errors
    /// Returns `RuntimeError::BuiltinFunctionRedefinition` for `expression`.
    pub fn define_function(&mut self, name: &str, function: Function, line: usize) -> EvalResult<()> {
        debug!("line {line}: define {name}({})", function.params.join(", "));
        self.scopes.declare_function(name, function, line)
    }

    /// Evaluates one expression and returns its value as canonical text.
    ///
    /// The expression is tokenized, inlined through the built-in `expression`
    /// wrapper, converted to postfix order and reduced. A terminating `;` is
    /// ignored.
    ///
    /// # Errors
    /// - `UnknownNotation` for a notation other than `infix`, `prefix` or
    ///   `postfix`, and `NotationNotImplemented` for the latter two.
    /// - `UnknownToken` for an identifier that is not a visible variable.
    /// - Any `RuntimeError` raised while inlining or reducing.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::evaluator::core::Context;
    ///
    /// let mut context = Context::new();
    ///
    /// assert_eq!(context.evaluate_line(1, "5/0;", "infix").unwrap(), "inf");
    ///
    /// let err = context.evaluate_line(7, "foo + 1", "infix").unwrap_err();
    /// assert_eq!(err.to_string(), "[7] ERROR: unknown token: foo");
    /// ```
    pub fn evaluate_line(&mut self,
                         line: usize,
                         expression: &str,
                         notation: &str)
                         -> CalcResult<String> {
        match Notation::from_name(notation, line)? {
            Notation::Infix => self.evaluate_infix(line, expression),
            reserved @ (Notation::Prefix | Notation::Postfix) => {
                Err(ParseError::NotationNotImplemented { notation: reserved.name().to_string(),
                                                         line }.into())
            },
        }
    }

    fn evaluate_infix(&mut self, line: usize, expression: &str) -> CalcResult<String> {
        self.ensure_base_scope();

        let call = wrap_expression(expression);
        let wrapper = self.scopes.wrapper();
        let inlined = inline(&self.scopes, Function::WRAPPER, &wrapper, &call, line)?;
        let postfix = to_postfix(&inlined, &self.scopes, line)?;

        debug!("line {line}: postfix {}",
               postfix.iter()
                      .map(ToString::to_string)
                      .collect::<Vec<_>>()
                      .join(" "));

        Ok(evaluate(postfix, line)?)
    }

    /// Lists every variable of every scope, innermost scope first. Within a
    /// scope, names are sorted.
    ///
    /// # Example
    /// ```
    /// use scopecalc::interpreter::evaluator::core::Context;
    ///
    /// let mut context = Context::new();
    /// context.declare_variable("b", "i", "2", 1).unwrap();
    /// context.declare_variable("a", "i", "1", 2).unwrap();
    /// context.scopes.push_scope();
    /// context.declare_variable("c", "f", "0.5", 3).unwrap();
    ///
    /// let names: Vec<_> = context.lookup_all_variables()
    ///                            .into_iter()
    ///                            .map(|(name, _)| name)
    ///                            .collect();
    /// assert_eq!(names, ["c", "a", "b"]);
    /// ```
    #[must_use]
    pub fn lookup_all_variables(&self) -> Listing {
        self.scopes
            .iter()
            .flat_map(|scope| {
                let mut entries = scope.variables
                                       .iter()
                                       .map(|(name, variable)| (name.clone(), variable.value.clone()))
                                       .collect::<Vec<_>>();
                entries.sort();
                entries
            })
            .collect()
    }

    /// Resolves each of `names` to its nearest value, skipping names no scope
    /// declares.
    #[must_use]
    pub fn lookup_named_variables<S: AsRef<str>>(&self, names: &[S]) -> Listing {
        names.iter()
             .filter_map(|name| {
                 let name = name.as_ref();
                 self.scopes
                     .lookup_variable(name)
                     .map(|variable| (name.to_string(), variable.value.clone()))
             })
             .collect()
    }

    /// Carries out a classified instruction.
    ///
    /// Declarations, definitions and assignments change the scopes and
    /// produce nothing; a display request produces the listing to print.
    ///
    /// # Errors
    /// Propagates the error of whichever operation the instruction maps to.
    /// Assigning to a variable that no scope declares is an `UnknownVariable`
    /// error, reported before the expression is evaluated.
    pub fn execute(&mut self,
                   instruction: &Instruction,
                   notation: &str)
                   -> CalcResult<Option<Listing>> {
        match instruction {
            Instruction::Declaration { name,
                                       tag,
                                       value,
                                       line, } => {
                self.declare_variable(name, tag, value, *line)?;
                Ok(None)
            },
            Instruction::Display { names, .. } => {
                if names.is_empty() {
                    Ok(Some(self.lookup_all_variables()))
                } else {
                    Ok(Some(self.lookup_named_variables(names)))
                }
            },
            Instruction::FunctionDefinition { name, function, line } => {
                self.define_function(name, function.clone(), *line)?;
                Ok(None)
            },
            Instruction::Assignment { name,
                                      expression,
                                      line, } => {
                if self.scopes.lookup_variable(name).is_none() {
                    return Err(RuntimeError::UnknownVariable { name: name.clone(),
                                                               line: *line, }.into());
                }

                let value = self.evaluate_line(*line, expression, notation)?;
                debug!("line {line}: {name} = {value}");
                self.scopes.update_variable(name, &value, *line)?;
                Ok(None)
            },
        }
    }
}
