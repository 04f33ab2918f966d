//! Stack math notes: a persisted list of free-form expressions.
//!
//! Each note holds an expression and the outcome of its last evaluation.
//! Evaluation failures stay on the note they belong to.

mod book;
mod error;
mod evaluation;
mod note;
mod store;

pub use book::NoteBook;
pub use error::NotesError;
pub use evaluation::{CalcResult, evaluate_expression};
pub use note::Note;
pub use store::{JsonFileStore, MemoryStore, NotesStore};

/// Name of the key-value slot holding the notes list.
pub const STORAGE_KEY: &str = "stack-calc-values";
