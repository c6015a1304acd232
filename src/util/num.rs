use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Magnitude from which results switch to exponent notation.
pub const EXPONENT_ABOVE: f64 = 1e21;
/// Magnitude below which non-zero results switch to exponent notation.
pub const EXPONENT_BELOW: f64 = 1e-4;

/// Returns `true` if `text` reads as a floating-point number.
///
/// `inf`, `-inf` and `NaN` count as numbers so that results of a division by
/// zero can flow back into later expressions.
///
/// ## Example
/// ```
/// use scopecalc::util::num::is_numeric;
///
/// assert!(is_numeric("42"));
/// assert!(is_numeric("-0.5"));
/// assert!(is_numeric("inf"));
/// assert!(!is_numeric("radius"));
/// ```
#[must_use]
pub fn is_numeric(text: &str) -> bool {
    text.parse::<f64>().is_ok()
}

/// Parses an operand of an arithmetic operator.
///
/// ## Errors
/// Returns `RuntimeError::InvalidNumber` if `text` is not a valid number.
///
/// ## Example
/// ```
/// use scopecalc::{error::RuntimeError, util::num::parse_operand};
///
/// assert_eq!(parse_operand("2.5", 1).unwrap(), 2.5);
///
/// let err = parse_operand("2.5.1", 9).unwrap_err();
/// assert!(matches!(err, RuntimeError::InvalidNumber { line: 9, .. }));
/// ```
pub fn parse_operand(text: &str, line: usize) -> EvalResult<f64> {
    text.parse()
        .map_err(|_| RuntimeError::InvalidNumber { token: text.to_string(),
                                                   line })
}

/// Flips the sign of a textual value by adding or removing a leading `-`.
///
/// The text is not parsed, so a value that is not a number is still
/// accepted here and rejected later by the operator that consumes it.
///
/// ## Example
/// ```
/// use scopecalc::util::num::toggle_sign;
///
/// assert_eq!(toggle_sign("3"), "-3");
/// assert_eq!(toggle_sign("-3"), "3");
/// assert_eq!(toggle_sign("inf"), "-inf");
/// ```
#[must_use]
pub fn toggle_sign(text: &str) -> String {
    text.strip_prefix('-')
        .map_or_else(|| format!("-{text}"), str::to_string)
}

/// Formats a result in its shortest form that reads back to the same `f64`.
///
/// Integral values print without a fraction, very large and very small
/// magnitudes print in exponent form, and non-finite values print as `inf`,
/// `-inf` or `NaN`.
///
/// ## Example
/// ```
/// use scopecalc::util::num::format_number;
///
/// assert_eq!(format_number(11.0), "11");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(-2.25), "-2.25");
/// assert_eq!(format_number(1e21), "1e21");
/// assert_eq!(format_number(0.00001), "1e-5");
/// assert_eq!(format_number(f64::INFINITY), "inf");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && magnitude != 0.0 && !(EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        return format!("{value:e}");
    }
    format!("{value}")
}
