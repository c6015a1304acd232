/// The evaluator module carries out instructions and computes results.
///
/// It owns the scope stack through the `Context` type, runs each expression
/// through the full pipeline, and reduces postfix sequences to values.
///
/// # Responsibilities
/// - Declares variables and defines functions in the innermost scope.
/// - Evaluates expressions in the requested notation.
/// - Reports runtime errors such as malformed expressions or bad operands.
pub mod evaluator;
/// The lexer module tokenizes expressions.
///
/// The lexer reads raw expression text, drops whitespace, and produces the
/// flat token sequence the other stages work on.
///
/// # Responsibilities
/// - Splits text into words and punctuation.
/// - Tells unary negation apart from binary subtraction.
pub mod lexer;
/// The parser module reshapes token sequences.
///
/// It classifies source lines, inlines user-defined functions, and converts
/// infix token sequences to postfix order.
///
/// # Responsibilities
/// - Recognises the instruction forms of the language.
/// - Expands function calls recursively.
/// - Orders operators by precedence and resolves variables to values.
pub mod parser;
/// The scope module implements lexical shadowing.
///
/// Defines the `Scope` frame and the `ScopeStack`, where every lookup walks
/// from the innermost scope outward and updates land in the owning scope.
pub mod scope;
/// The value module defines what scopes store.
///
/// # Responsibilities
/// - Defines variables with a kind label and a textual value.
/// - Defines user functions as parameter names plus body tokens.
pub mod value;
