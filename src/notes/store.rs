//! Persistence for the notes list.
//!
//! The list lives in a single key-value slot and is always loaded and
//! saved as a whole.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info};

use super::STORAGE_KEY;
use super::error::NotesError;
use super::note::Note;

/// Somewhere the notes list can be loaded from and written back to.
pub trait NotesStore {
    /// Load the full list. A slot that was never written yields an empty list.
    fn load(&self) -> Result<Vec<Note>, NotesError>;

    /// Replace the stored list with `notes`.
    fn save(&mut self, notes: &[Note]) -> Result<(), NotesError>;
}

/// Key-value slots kept as one JSON object in a file.
///
/// Other keys in the file are preserved when the notes slot is rewritten.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_slots(&self) -> Result<BTreeMap<String, Value>, NotesError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "notes file does not exist yet");
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(NotesError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| NotesError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl NotesStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Note>, NotesError> {
        let mut slots = self.read_slots()?;
        let Some(value) = slots.remove(STORAGE_KEY) else {
            return Ok(Vec::new());
        };

        let notes: Vec<Note> =
            serde_json::from_value(value).map_err(|source| NotesError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        info!(path = %self.path.display(), count = notes.len(), "loaded notes");
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> Result<(), NotesError> {
        let mut slots = self.read_slots()?;
        slots.insert(STORAGE_KEY.to_string(), serde_json::to_value(notes)?);
        let contents = serde_json::to_string_pretty(&slots)?;

        let write_err = |source| NotesError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write next to the target and rename so a crash never leaves half a list.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents).map_err(write_err)?;
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), count = notes.len(), "saved notes");
        Ok(())
    }
}

/// In-memory store, for embedding without a file and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    notes: Vec<Note>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already populated slot.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self { notes, saves: 0 }
    }

    /// How many times the list has been written.
    pub fn saves(&self) -> usize {
        self.saves
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl NotesStore for MemoryStore {
    fn load(&self) -> Result<Vec<Note>, NotesError> {
        Ok(self.notes.clone())
    }

    fn save(&mut self, notes: &[Note]) -> Result<(), NotesError> {
        self.notes = notes.to_vec();
        self.saves += 1;
        Ok(())
    }
}
