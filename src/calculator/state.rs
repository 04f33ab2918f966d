//! Calculator state: the display, pending computation and memory register.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::format::is_error;

/// A binary arithmetic operator on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol printed on the key and used in history expressions.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Look up an operator by key symbol. ASCII `*`, `x` and `/` are
    /// accepted alongside the keypad glyphs.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "×" | "*" | "x" | "X" => Some(Self::Multiply),
            "÷" | "/" => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operator.
    ///
    /// Returns `None` when the result is not a finite number, which covers
    /// division by zero as well as overflow.
    pub fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return None;
                }
                lhs / rhs
            }
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The left-hand side of an unresolved computation.
///
/// Operator and operand are captured together, so one can never be set
/// without the other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pending {
    pub operator: Operator,
    pub operand: f64,
}

/// Which operand the calculator is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    AwaitingFirstOperand,
    AwaitingSecondOperand,
}

/// Everything the calculator knows during a session.
///
/// Only the engine mutates this; everyone else reads it through the
/// accessors.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    pub(crate) display: String,
    pub(crate) pending: Option<Pending>,
    pub(crate) memory: Option<f64>,
    pub(crate) reset_on_next_input: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            pending: None,
            memory: None,
            reset_on_next_input: false,
        }
    }
}

impl CalculatorState {
    /// Fresh state: display `0`, nothing pending, empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        is_error(&self.display)
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending.map(|p| p.operand)
    }

    pub fn memory(&self) -> Option<f64> {
        self.memory
    }

    /// Whether the memory indicator should be lit.
    pub fn has_memory(&self) -> bool {
        self.memory.is_some()
    }

    /// Whether the next digit or decimal point starts a new number.
    pub fn reset_on_next_input(&self) -> bool {
        self.reset_on_next_input
    }

    pub fn mode(&self) -> Mode {
        if self.pending.is_some() {
            Mode::AwaitingSecondOperand
        } else {
            Mode::AwaitingFirstOperand
        }
    }
}
