//! Calculator module for the retro keypad calculator.
//!
//! This module provides functionality to:
//! - Turn keypad text into key presses
//! - Run key presses through the calculator state machine
//! - Keep a history of resolved calculations and memory operations
//! - Copy the display to the clipboard

mod clipboard;
mod engine;
mod format;
mod history;
mod keys;
mod session;
mod state;

pub use clipboard::{clipboard_text, copy_to_clipboard};
pub use engine::{Effect, Record, apply};
pub use format::{ERROR_MARKER, format_number, group_digits, is_error, parse_display};
pub use history::{History, HistoryEntry};
pub use keys::{Digit, Key, KeyParseError, parse_keys};
pub use session::Session;
pub use state::{CalculatorState, Mode, Operator, Pending};
