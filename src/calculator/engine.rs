//! The calculator state machine.
//!
//! [`apply`] is a pure transition function: it consumes the current state
//! and one key, and returns the next state together with an [`Effect`] the
//! caller should carry out on the history. Nothing here fails; input that
//! cannot be acted on (for instance an operator while the error marker is
//! shown) leaves the state untouched.

use tracing::{debug, trace};

use super::format::{ERROR_MARKER, format_number, parse_display};
use super::keys::{Digit, Key};
use super::state::{CalculatorState, Operator, Pending};

/// A history line produced by a transition, before it gets an id and
/// timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub expression: String,
    pub result: String,
}

impl Record {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

/// What the history should do after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Record(Record),
    ClearHistory,
}

/// Compute the next state for one key press.
pub fn apply(mut state: CalculatorState, key: Key) -> (CalculatorState, Effect) {
    trace!(%key, display = %state.display, "key pressed");

    let effect = match key {
        Key::Digit(digit) => {
            press_digit(&mut state, digit);
            Effect::None
        }
        Key::Decimal => {
            press_decimal(&mut state);
            Effect::None
        }
        Key::Operator(op) => press_operator(&mut state, op),
        Key::Equals => resolve(&mut state),
        Key::Clear => {
            clear(&mut state);
            Effect::None
        }
        Key::MemoryAdd => update_memory(&mut state, Key::MemoryAdd, |m, v| m + v),
        Key::MemorySubtract => update_memory(&mut state, Key::MemorySubtract, |m, v| m - v),
        Key::MemoryRecall => recall_memory(&mut state),
        Key::MemoryClear => clear_memory(&mut state),
        Key::Percent => percent(&mut state),
        Key::SignFlip => {
            flip_sign(&mut state);
            Effect::None
        }
        Key::ClearHistory => Effect::ClearHistory,
    };

    (state, effect)
}

fn press_digit(state: &mut CalculatorState, digit: Digit) {
    if state.display == "0" || state.reset_on_next_input {
        state.display = digit.as_char().to_string();
        state.reset_on_next_input = false;
    } else {
        state.display.push(digit.as_char());
    }
}

fn press_decimal(state: &mut CalculatorState) {
    if state.reset_on_next_input {
        state.display = "0.".to_string();
        state.reset_on_next_input = false;
    } else if !state.display.contains('.') {
        state.display.push('.');
    }
}

fn press_operator(state: &mut CalculatorState, op: Operator) -> Effect {
    // A new operator on top of an entered right-hand operand resolves the
    // pending computation first, so `3 + 4 +` shows 7.
    let effect = if state.pending.is_some() && !state.reset_on_next_input {
        resolve(state)
    } else {
        Effect::None
    };

    let Some(operand) = parse_display(&state.display) else {
        debug!(display = %state.display, operator = %op, "operator ignored, display is not a number");
        return effect;
    };

    state.pending = Some(Pending {
        operator: op,
        operand,
    });
    state.reset_on_next_input = true;
    effect
}

fn resolve(state: &mut CalculatorState) -> Effect {
    let Some(Pending { operator, operand }) = state.pending.take() else {
        debug!("equals ignored, no pending operator");
        return Effect::None;
    };

    let rhs = parse_display(&state.display);
    let rhs_text = rhs.map_or_else(|| state.display.clone(), format_number);
    let expression = format!("{} {} {}", format_number(operand), operator, rhs_text);

    state.display = match rhs.and_then(|rhs| operator.apply(operand, rhs)) {
        Some(value) => format_number(value),
        None => ERROR_MARKER.to_string(),
    };
    state.reset_on_next_input = true;

    debug!(%expression, result = %state.display, "calculation resolved");
    Effect::Record(Record::new(expression, state.display.clone()))
}

fn clear(state: &mut CalculatorState) {
    state.display = "0".to_string();
    state.pending = None;
    state.reset_on_next_input = false;
}

fn update_memory(state: &mut CalculatorState, key: Key, combine: fn(f64, f64) -> f64) -> Effect {
    let Some(value) = parse_display(&state.display) else {
        debug!(%key, "memory update ignored, display is not a number");
        return Effect::None;
    };

    let updated = combine(state.memory.unwrap_or(0.0), value);
    state.reset_on_next_input = true;

    let result = if updated.is_finite() {
        state.memory = Some(updated);
        format_number(updated)
    } else {
        debug!(%key, "memory overflow, register left unchanged");
        ERROR_MARKER.to_string()
    };

    Effect::Record(Record::new(
        format!("{} {}", key, format_number(value)),
        result,
    ))
}

fn recall_memory(state: &mut CalculatorState) -> Effect {
    let Some(value) = state.memory else {
        debug!("memory recall ignored, register is empty");
        return Effect::None;
    };

    state.display = format_number(value);
    // With an operator pending the recalled value is the right-hand operand,
    // so the next operator or `=` must resolve with it.
    state.reset_on_next_input = state.pending.is_none();

    Effect::Record(Record::new(Key::MemoryRecall.to_string(), state.display.clone()))
}

fn clear_memory(state: &mut CalculatorState) -> Effect {
    let Some(value) = state.memory.take() else {
        return Effect::None;
    };

    Effect::Record(Record::new(
        format!("{} {}", Key::MemoryClear, format_number(value)),
        "0",
    ))
}

fn percent(state: &mut CalculatorState) -> Effect {
    let Some(value) = parse_display(&state.display) else {
        debug!("percent ignored, display is not a number");
        return Effect::None;
    };

    state.display = format_number(value / 100.0);
    Effect::Record(Record::new(
        format!("{}%", format_number(value)),
        state.display.clone(),
    ))
}

fn flip_sign(state: &mut CalculatorState) {
    if state.display == "0" {
        return;
    }
    if let Some(value) = parse_display(&state.display) {
        state.display = format_number(-value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::keys::parse_keys;

    /// Run a key sequence from a fresh state, collecting every record.
    fn run(input: &str) -> (CalculatorState, Vec<Record>) {
        run_from(CalculatorState::new(), input)
    }

    fn run_from(mut state: CalculatorState, input: &str) -> (CalculatorState, Vec<Record>) {
        let mut records = Vec::new();
        for key in parse_keys(input).unwrap() {
            let (next, effect) = apply(state, key);
            state = next;
            if let Effect::Record(record) = effect {
                records.push(record);
            }
        }
        (state, records)
    }

    #[test]
    fn test_digits_collapse_leading_zero() {
        let (state, _) = run("0 0 7 0");
        assert_eq!(state.display(), "70");
    }

    #[test]
    fn test_single_decimal_point() {
        let (state, _) = run("1 . . 2 . 5 .");
        assert_eq!(state.display(), "1.25");
        assert_eq!(state.display().matches('.').count(), 1);
    }

    #[test]
    fn test_decimal_on_zero() {
        let (state, _) = run(". 5");
        assert_eq!(state.display(), "0.5");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let (state, _) = run("3 + . 5");
        assert_eq!(state.display(), "0.5");
        assert!(!state.reset_on_next_input());
    }

    #[test]
    fn test_simple_addition() {
        let (state, records) = run("3 + 4 =");
        assert_eq!(state.display(), "7");
        assert_eq!(state.pending(), None);
        assert!(state.reset_on_next_input());
        assert_eq!(records, vec![Record::new("3 + 4", "7")]);
    }

    #[test]
    fn test_operator_captures_pending() {
        let (state, records) = run("8 ×");
        assert_eq!(state.pending_operator(), Some(Operator::Multiply));
        assert_eq!(state.pending_operand(), Some(8.0));
        assert!(state.reset_on_next_input());
        assert!(records.is_empty());
    }

    #[test]
    fn test_digit_after_operator_replaces_display() {
        let (state, _) = run("8 × 2");
        assert_eq!(state.display(), "2");
    }

    #[test]
    fn test_divide_by_zero_shows_error() {
        let (state, records) = run("5 ÷ 0 =");
        assert_eq!(state.display(), ERROR_MARKER);
        assert!(state.is_error());
        assert_eq!(records, vec![Record::new("5 ÷ 0", ERROR_MARKER)]);
    }

    #[test]
    fn test_error_does_not_touch_memory() {
        let (state, _) = run("9 M+ 5 ÷ 0 =");
        assert!(state.is_error());
        assert_eq!(state.memory(), Some(9.0));
    }

    #[test]
    fn test_clear_recovers_from_error() {
        let (state, _) = run("5 ÷ 0 = C 2 + 2 =");
        assert_eq!(state.display(), "4");
    }

    #[test]
    fn test_digit_after_error_starts_fresh() {
        let (state, _) = run("5 ÷ 0 = 4");
        assert_eq!(state.display(), "4");
    }

    #[test]
    fn test_value_keys_ignored_on_error() {
        let (error, _) = run("5 ÷ 0 =");
        let (state, records) = run_from(error.clone(), "+ M+ % +/-");
        assert_eq!(state, error);
        assert!(records.is_empty());
    }

    /// Keypad text typing `count` nines.
    fn nines(count: usize) -> String {
        "9 ".repeat(count)
    }

    #[test]
    fn test_multiply_overflow_shows_error() {
        let (state, records) = run(&format!("{} × 1 0 =", nines(308)));
        assert_eq!(state.display(), ERROR_MARKER);
        assert_eq!(state.pending(), None);

        let record = records.last().unwrap();
        assert!(record.expression.ends_with(" × 10"));
        assert_eq!(record.result, ERROR_MARKER);
    }

    #[test]
    fn test_memory_overflow_keeps_register() {
        let (state, records) = run(&format!("{} M+ M+", nines(308)));
        let memory = state.memory().unwrap();
        assert!(memory.is_finite());
        assert_eq!(format_number(memory), records[0].result);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].result, ERROR_MARKER);
    }

    #[test]
    fn test_display_beyond_f64_range_ignores_value_keys() {
        let (typed, _) = run(&nines(309));
        assert_eq!(typed.display().len(), 309);

        let (state, records) = run_from(typed.clone(), "+ M+ M- % +/- =");
        assert_eq!(state, typed);
        assert!(records.is_empty());
    }

    #[test]
    fn test_chained_operators_resolve_left_to_right() {
        let (state, records) = run("3 + 4 + 5 =");
        assert_eq!(state.display(), "12");
        assert_eq!(
            records,
            vec![Record::new("3 + 4", "7"), Record::new("7 + 5", "12")]
        );
    }

    #[test]
    fn test_chained_operator_shows_intermediate() {
        let (state, _) = run("2 × 3 -");
        assert_eq!(state.display(), "6");
        assert_eq!(state.pending_operator(), Some(Operator::Subtract));
        assert_eq!(state.pending_operand(), Some(6.0));
    }

    #[test]
    fn test_replacing_operator_does_not_resolve() {
        let (state, records) = run("3 + × 4 =");
        assert_eq!(state.display(), "12");
        assert_eq!(records, vec![Record::new("3 × 4", "12")]);
    }

    #[test]
    fn test_chain_into_division_by_zero() {
        let (state, _) = run("6 ÷ 0 + 1");
        assert_eq!(state.display(), "1");
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let (state, records) = run("4 2 =");
        assert_eq!(state.display(), "42");
        assert!(!state.reset_on_next_input());
        assert!(records.is_empty());
    }

    #[test]
    fn test_equals_reuses_display_as_rhs() {
        let (state, _) = run("3 + =");
        assert_eq!(state.display(), "6");
    }

    #[test]
    fn test_clear_keeps_memory() {
        let (state, _) = run("7 M+ 3 + 2 C");
        assert_eq!(state.display(), "0");
        assert_eq!(state.pending(), None);
        assert!(!state.reset_on_next_input());
        assert_eq!(state.memory(), Some(7.0));
    }

    #[test]
    fn test_memory_add_accumulates() {
        let (state, records) = run("5 M+ 3 M+");
        assert_eq!(state.memory(), Some(8.0));
        assert!(state.reset_on_next_input());
        assert_eq!(
            records,
            vec![Record::new("M+ 5", "5"), Record::new("M+ 3", "8")]
        );
    }

    #[test]
    fn test_memory_subtract_into_empty_register_negates() {
        let (state, records) = run("5 M-");
        assert_eq!(state.memory(), Some(-5.0));
        assert_eq!(records, vec![Record::new("M- 5", "-5")]);
    }

    #[test]
    fn test_memory_subtract_from_existing() {
        let (state, _) = run("10 M+ 4 M-");
        assert_eq!(state.memory(), Some(6.0));
    }

    #[test]
    fn test_memory_round_trip() {
        let (state, records) = run("1 2 . 5 M+ C MR");
        assert_eq!(state.display(), "12.5");
        assert_eq!(records.last(), Some(&Record::new("MR", "12.5")));
    }

    #[test]
    fn test_memory_recall_empty_is_noop() {
        let (state, records) = run("4 MR");
        assert_eq!(state.display(), "4");
        assert!(records.is_empty());
    }

    #[test]
    fn test_memory_recall_as_right_operand() {
        let (state, _) = run("5 M+ C 2 + MR =");
        assert_eq!(state.display(), "7");
    }

    #[test]
    fn test_memory_recall_feeds_chained_operator() {
        let (state, _) = run("5 M+ C 2 + MR + 1 =");
        assert_eq!(state.display(), "8");
    }

    #[test]
    fn test_memory_recall_without_pending_starts_fresh() {
        let (state, _) = run("5 M+ C MR 3");
        assert_eq!(state.display(), "3");
    }

    #[test]
    fn test_memory_clear_empty_is_noop() {
        let (state, records) = run("MC");
        assert_eq!(state.memory(), None);
        assert!(records.is_empty());
    }

    #[test]
    fn test_memory_clear_records() {
        let (state, records) = run("4 M+ MC");
        assert_eq!(state.memory(), None);
        assert!(!state.has_memory());
        assert_eq!(records.last(), Some(&Record::new("MC 4", "0")));
    }

    #[test]
    fn test_percent() {
        let (state, records) = run("5 %");
        assert_eq!(state.display(), "0.05");
        assert_eq!(records, vec![Record::new("5%", "0.05")]);
    }

    #[test]
    fn test_sign_flip() {
        let (state, _) = run("1 2 +/-");
        assert_eq!(state.display(), "-12");
        let (state, _) = run_from(state, "+/-");
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn test_sign_flip_on_zero_is_noop() {
        let (state, records) = run("+/-");
        assert_eq!(state.display(), "0");
        assert!(records.is_empty());
    }

    #[test]
    fn test_sign_flip_partial_zero_normalises() {
        let (state, _) = run("0 . +/-");
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_negative_operand_arithmetic() {
        let (state, _) = run("4 +/- - 6 =");
        assert_eq!(state.display(), "-10");
    }

    #[test]
    fn test_clear_history_effect_keeps_state() {
        let (state, _) = run("3 + 4");
        let (next, effect) = apply(state.clone(), Key::ClearHistory);
        assert_eq!(next, state);
        assert_eq!(effect, Effect::ClearHistory);
    }

    #[test]
    fn test_floating_point_result_formatting() {
        let (state, _) = run(". 1 + . 2 =");
        assert_eq!(state.display(), "0.30000000000000004");
    }

    #[test]
    fn test_display_never_has_two_decimal_points() {
        let (state, _) = run(". 5 . + . . 2 5 = .");
        assert_eq!(state.display(), "0.");
        let (state, _) = run("1 ÷ 4 = . 3");
        assert_eq!(state.display(), "0.3");
    }
}
