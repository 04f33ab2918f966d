//! Keypad input for the calculator.
//!
//! Defines the closed set of keys the engine understands and a tokenizer
//! that turns keypad text like `"12.5 × 3 = M+"` into a key sequence.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::state::Operator;

/// A single decimal digit, `0` through `9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// One button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(Digit),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    Percent,
    SignFlip,
    ClearHistory,
}

impl Key {
    /// Convenience constructor for digit keys.
    pub fn digit(value: u8) -> Option<Self> {
        Digit::new(value).map(Self::Digit)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{}", d.as_char()),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::Equals => f.write_str("="),
            Self::Clear => f.write_str("C"),
            Self::MemoryAdd => f.write_str("M+"),
            Self::MemorySubtract => f.write_str("M-"),
            Self::MemoryRecall => f.write_str("MR"),
            Self::MemoryClear => f.write_str("MC"),
            Self::Percent => f.write_str("%"),
            Self::SignFlip => f.write_str("+/-"),
            Self::ClearHistory => f.write_str("CH"),
        }
    }
}

/// Errors produced while tokenizing keypad text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("unknown key '{token}' at offset {offset}")]
    UnknownKey { token: String, offset: usize },
}

lazy_static! {
    /// Matches one key token at the start of the input.
    /// Longer labels come first so `+/-` wins over `+` and `CH` over `C`.
    static ref KEY_TOKEN: Regex = Regex::new(
        r"(?i)^(?:\+/-|±|neg|m\+|m-|mr|mc|ac|ch|c|[0-9]|\.|[+\-*/×÷x=%])"
    ).unwrap();
}

/// Tokenize keypad text into keys.
///
/// Tokens may be separated by whitespace or written back to back
/// (`"3+4="`). Labels are case-insensitive.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyParseError> {
    let mut keys = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let rest = &input[offset..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        offset += rest.len() - trimmed.len();

        let matched = KEY_TOKEN
            .find(trimmed)
            .and_then(|m| key_for_token(m.as_str()).map(|key| (key, m.end())));

        let Some((key, len)) = matched else {
            let token = trimmed.split_whitespace().next().unwrap_or(trimmed);
            return Err(KeyParseError::UnknownKey {
                token: token.to_string(),
                offset,
            });
        };

        keys.push(key);
        offset += len;
    }

    Ok(keys)
}

fn key_for_token(token: &str) -> Option<Key> {
    let lower = token.to_lowercase();
    let key = match lower.as_str() {
        "+/-" | "±" | "neg" => Key::SignFlip,
        "m+" => Key::MemoryAdd,
        "m-" => Key::MemorySubtract,
        "mr" => Key::MemoryRecall,
        "mc" => Key::MemoryClear,
        "ac" | "c" => Key::Clear,
        "ch" => Key::ClearHistory,
        "." => Key::Decimal,
        "=" => Key::Equals,
        "%" => Key::Percent,
        other => {
            if let Some(op) = Operator::from_symbol(other) {
                Key::Operator(op)
            } else {
                let digit = other.parse::<u8>().ok()?;
                Key::digit(digit)?
            }
        }
    };
    Some(key)
}
