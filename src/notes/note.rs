//! A single entry in the notes list.

use serde::{Deserialize, Serialize};

use super::evaluation::CalcResult;
use crate::calculator::format_number;

/// One expression in the notes list together with its last evaluation.
///
/// `output` and `error` are never both set: a successful evaluation clears
/// the error and a failed one clears the output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub input: String,
    pub output: Option<f64>,
    pub error: Option<String>,
}

impl Note {
    /// Create an empty, unevaluated note.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            input: String::new(),
            output: None,
            error: None,
        }
    }

    /// Store the outcome of evaluating this note's input.
    pub fn apply_result(&mut self, result: &CalcResult) {
        match result {
            CalcResult::Success { value } => {
                self.output = Some(*value);
                self.error = None;
            }
            CalcResult::Error { message } => {
                self.output = None;
                self.error = Some(message.clone());
            }
        }
    }

    /// Text shown next to the expression: the result, the error, or
    /// nothing when the note has not been evaluated.
    pub fn result_text(&self) -> Option<String> {
        match (&self.output, &self.error) {
            (Some(value), _) => Some(format_number(*value)),
            (None, Some(error)) => Some(error.clone()),
            (None, None) => None,
        }
    }
}
