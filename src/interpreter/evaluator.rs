/// Core evaluation logic and context management.
///
/// Contains the runtime `Context` that owns the scope stack, the notation
/// switch, and the per-line pipeline that chains tokenizing, inlining,
/// postfix conversion and reduction.
pub mod core;

/// Postfix reduction.
///
/// Reduces a postfix token sequence in place to a single numeric string.
pub mod reduce;
