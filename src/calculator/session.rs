//! A calculator session: one state plus its history.

use tracing::debug;

use super::engine::{self, Effect};
use super::history::{History, HistoryEntry};
use super::keys::Key;
use super::state::CalculatorState;

/// Drives the engine one key at a time and keeps the history in step.
#[derive(Clone, Debug, Default)]
pub struct Session {
    state: CalculatorState,
    history: History,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one key press. Returns the history entry it created, if any.
    pub fn press(&mut self, key: Key) -> Option<&HistoryEntry> {
        let state = std::mem::take(&mut self.state);
        let (next, effect) = engine::apply(state, key);
        self.state = next;

        match effect {
            Effect::None => None,
            Effect::Record(record) => Some(self.history.push(record)),
            Effect::ClearHistory => {
                debug!(cleared = self.history.len(), "history cleared");
                self.history.clear();
                None
            }
        }
    }

    /// Handle a sequence of key presses in order.
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn display(&self) -> &str {
        self.state.display()
    }

    pub fn has_memory(&self) -> bool {
        self.state.has_memory()
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
