//! # scopecalc
//!
//! scopecalc is a line-oriented calculator language written in Rust.
//! It keeps a stack of lexical scopes holding numeric variables and inline
//! functions, and evaluates one infix expression per line by tokenizing it,
//! inlining function calls, converting it to postfix order, and reducing the
//! result.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, Write};

use log::{debug, info, warn};

use crate::{
    error::Error,
    interpreter::{evaluator::core::Context, parser::statement::parse_instruction},
};

/// Defines the classified form of a source line.
///
/// This module declares the `Instruction` enum: the declaration, display,
/// function definition and assignment forms a line can take. The line parser
/// produces it and the evaluation context carries it out.
///
/// # Responsibilities
/// - Defines one variant per instruction form.
/// - Attaches the source line to every instruction for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while classifying a
/// line, converting an expression, inlining functions or reducing a postfix
/// sequence. Every error carries the line it came from and displays as
/// `[<line>] ERROR: <detail>`.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the expression pipeline.
///
/// This module ties together the lexer, the scope stack, the function
/// inliner, the postfix converter and the reducer, and exposes the
/// evaluation context that drives them.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for declaring, defining and evaluating.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for numeric text.
///
/// Values travel as decimal strings; this module converts between that text
/// and `f64` and formats results canonically.
pub mod util;

/// Counts of what a [`run`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source lines read, blank ones included.
    pub lines:    usize,
    /// Lines that reported an error.
    pub failures: usize,
}

/// Runs a whole program, one line at a time.
///
/// Every line is classified and carried out against a fresh evaluation
/// context. Display requests write a `Variables:` header followed by
/// `name = value` lines to `out`. A line that fails writes its error to `out`
/// and the run continues with the next line.
///
/// `notation` is used for every assignment; only `infix` evaluates.
///
/// # Errors
/// Returns an error only if writing to `out` fails.
///
/// # Examples
/// ```
/// use scopecalc::run;
///
/// let source = "x(i)=:5;\n\
///               double(n): n*2;\n\
///               x = double(x) + 1;\n\
///               y = z;\n\
///               print x";
///
/// let mut out = Vec::new();
/// let summary = run(source, "infix", &mut out).unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(),
///            "[4] ERROR: unknown variable: y\nVariables:\nx = 11\n");
/// assert_eq!(summary.lines, 5);
/// assert_eq!(summary.failures, 1);
/// ```
pub fn run<W: Write>(source: &str, notation: &str, out: &mut W) -> io::Result<RunSummary> {
    let mut context = Context::new();
    let mut summary = RunSummary::default();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        summary.lines += 1;

        let outcome = parse_instruction(text, line).map_err(Error::from)
                                                   .and_then(|instruction| match instruction {
                                                       Some(instruction) => {
                                                           debug!("line {}: {instruction:?}",
                                                                  instruction.line_number());
                                                           context.execute(&instruction, notation)
                                                       },
                                                       None => Ok(None),
                                                   });

        match outcome {
            Ok(Some(listing)) => {
                writeln!(out, "Variables:")?;
                for (name, value) in listing {
                    writeln!(out, "{name} = {value}")?;
                }
            },
            Ok(None) => {},
            Err(e) => {
                warn!("line {} rejected: {e:?}", e.line());
                summary.failures += 1;
                writeln!(out, "{e}")?;
            },
        }
    }

    info!("processed {} line(s), {} failed", summary.lines, summary.failures);
    Ok(summary)
}
