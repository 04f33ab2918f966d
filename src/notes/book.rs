//! The notes list and its operations.

use tracing::debug;

use super::error::NotesError;
use super::evaluation::evaluate_expression;
use super::note::Note;
use super::store::NotesStore;

/// An ordered list of expression notes backed by a store.
///
/// The list is loaded once when the book is opened and written back in
/// full after every change.
#[derive(Debug)]
pub struct NoteBook<S: NotesStore> {
    store: S,
    notes: Vec<Note>,
}

impl<S: NotesStore> NoteBook<S> {
    /// Load the list from `store`.
    pub fn open(store: S) -> Result<Self, NotesError> {
        let notes = store.load()?;
        Ok(Self { store, notes })
    }

    /// Notes in list order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: u64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a blank note and return its id.
    pub fn add(&mut self) -> Result<u64, NotesError> {
        let id = self.notes.iter().map(|note| note.id).max().unwrap_or(0) + 1;
        let mut notes = self.notes.clone();
        notes.push(Note::new(id));
        self.commit(notes)?;
        Ok(id)
    }

    /// Replace the expression text of a note. Its last result is kept until
    /// it is evaluated again.
    pub fn update_input(&mut self, id: u64, input: impl Into<String>) -> Result<(), NotesError> {
        let mut notes = self.notes.clone();
        find_mut(&mut notes, id)?.input = input.into();
        self.commit(notes)
    }

    /// Remove a note and return it.
    pub fn delete(&mut self, id: u64) -> Result<Note, NotesError> {
        let index = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NotesError::NotFound(id))?;
        let mut notes = self.notes.clone();
        let note = notes.remove(index);
        self.commit(notes)?;
        Ok(note)
    }

    /// Evaluate one note. A failing expression is recorded on the note,
    /// not returned as an error.
    pub fn evaluate(&mut self, id: u64) -> Result<&Note, NotesError> {
        let mut notes = self.notes.clone();
        let note = find_mut(&mut notes, id)?;
        let result = evaluate_expression(&note.input);
        debug!(id, input = %note.input, result = %result.display(), "evaluated note");
        note.apply_result(&result);

        self.commit(notes)?;
        self.get(id).ok_or(NotesError::NotFound(id))
    }

    /// Evaluate every note, saving once at the end.
    pub fn evaluate_all(&mut self) -> Result<(), NotesError> {
        let mut notes = self.notes.clone();
        for note in &mut notes {
            let result = evaluate_expression(&note.input);
            note.apply_result(&result);
        }
        debug!(count = notes.len(), "evaluated all notes");
        self.commit(notes)
    }

    /// Save `notes` and adopt them only once the store accepted the write,
    /// so a failed save leaves the book as it was.
    fn commit(&mut self, notes: Vec<Note>) -> Result<(), NotesError> {
        self.store.save(&notes)?;
        self.notes = notes;
        Ok(())
    }
}

fn find_mut(notes: &mut [Note], id: u64) -> Result<&mut Note, NotesError> {
    notes
        .iter_mut()
        .find(|note| note.id == id)
        .ok_or(NotesError::NotFound(id))
}
