//! Expression evaluation using fasteval.
//!
//! Wraps fasteval to provide a simple interface for evaluating the
//! free-form expressions stored in notes.

use std::collections::BTreeMap;

use tracing::debug;

use crate::calculator::format_number;

/// Shown when fasteval cannot parse or evaluate an expression.
pub const INVALID_EXPRESSION: &str = "Invalid expression";

/// Result of evaluating a note expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success { value: f64 },
    /// Expression could not be parsed or did not produce a finite number.
    Error { message: String },
}

impl CalcResult {
    fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> String {
        match self {
            Self::Success { value } => format_number(*value),
            Self::Error { message } => message.clone(),
        }
    }
}

/// Evaluate a mathematical expression.
///
/// Keypad glyphs `×` and `÷` are accepted in place of `*` and `/`.
pub fn evaluate_expression(input: &str) -> CalcResult {
    let expression = input.trim();

    if expression.is_empty() {
        return CalcResult::error("Empty expression");
    }

    let normalized = expression.replace('×', "*").replace('÷', "/");

    // Use an empty namespace (no custom variables)
    let mut namespace = BTreeMap::<String, f64>::new();

    match fasteval::ez_eval(&normalized, &mut namespace) {
        Ok(value) => {
            if value.is_nan() {
                CalcResult::error("Not a Number")
            } else if value.is_infinite() {
                let msg = if value.is_sign_positive() {
                    "Infinity"
                } else {
                    "-Infinity"
                };
                CalcResult::error(msg)
            } else {
                CalcResult::Success { value }
            }
        }
        Err(err) => {
            debug!(%expression, error = ?err, "expression rejected by fasteval");
            CalcResult::error(INVALID_EXPRESSION)
        }
    }
}
