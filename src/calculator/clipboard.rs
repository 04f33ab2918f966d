//! Clipboard functionality for copying the calculator display.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Text to copy for a given display.
///
/// A dangling decimal point is dropped so `"12."` copies as `12`. The error
/// marker is copied as is so the user can still paste what they saw.
pub fn clipboard_text(display: &str) -> &str {
    display.strip_suffix('.').unwrap_or(display)
}

/// Copy text to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;

    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")
}
