//! Number parsing and formatting for the calculator display.
//!
//! The display always holds either a decimal numeral (possibly partial,
//! like `"12."`) or the [`ERROR_MARKER`]. Results are rendered with the
//! shortest decimal representation that round-trips the `f64`.

/// Shown in place of any result that is not a finite number.
pub const ERROR_MARKER: &str = "Error";

/// Parse the display text into a number.
///
/// Accepts partial numerals such as `"12."` or `"-0."`. Returns `None`
/// for the error marker and for anything that does not describe a finite
/// number (`"inf"` and `"NaN"` are valid `f64` literals but never valid
/// display text).
pub fn parse_display(display: &str) -> Option<f64> {
    let value: f64 = display.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Format a number for the display.
///
/// Negative zero is shown as `0`; non-finite values become the error marker.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_MARKER.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Check whether the display currently shows the error marker.
pub fn is_error(display: &str) -> bool {
    display == ERROR_MARKER
}

/// Render display text with thousand separators in the integer part.
///
/// Partial numerals keep their shape (`"1234."` becomes `"1,234."`), and
/// anything that is not a numeral is returned unchanged.
pub fn group_digits(display: &str) -> String {
    if parse_display(display).is_none() {
        return display.to_string();
    }

    let (sign, unsigned) = match display.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", display),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, frac_part)
}
