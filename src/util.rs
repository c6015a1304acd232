/// Numeric text helpers.
///
/// Values travel through the calculator as decimal strings. This module
/// holds the conversions between that text and `f64`: checking whether a word
/// is a number, parsing operands with line-tagged errors, toggling signs, and
/// formatting results in their canonical shortest form.
pub mod num;
