/// Shared parser definitions.
///
/// Holds the `ParseResult` alias and the helper that wraps a bare expression
/// so it can be inlined through the built-in `expression` function.
pub mod core;

/// Function inlining.
///
/// Expands user-defined function calls into flat token sequences, with
/// parameters replaced by their argument tokens.
pub mod inline;

/// Infix to postfix conversion.
///
/// Reorders an inlined token sequence by operator precedence and replaces
/// variable names with their current values.
pub mod postfix;

/// Line classification.
///
/// Turns a source line into a declaration, display request, function
/// definition or assignment.
pub mod statement;
