//! A retro pocket calculator: keypad state machine with memory and history,
//! plus a persisted stack of math notes.

pub mod calculator;
pub mod config;
pub mod notes;
