//! Note persistence.
//!
//! Handlers only ever see [`NoteStore`]; the concrete backend is chosen once at
//! startup and injected as `web::Data<dyn NoteStore>`.
//!
//! - [`postgres::PgNoteStore`]: diesel over a pooled PostgreSQL connection.
//! - [`memory::MemoryNoteStore`]: process-local, used by tests and for
//!   running without a database.
//!
//! Every method is a single atomic step against one note. Lookups answer
//! `Ok(None)` when the note does not exist so callers decide how to report it.

use crate::errors::ServerError;
use crate::models::note::{NewNote, Note, NoteChanges};

pub mod memory;
pub mod postgres;

pub trait NoteStore: Send + Sync {
    /// Persist a new note, assigning its id and timestamps.
    fn insert(&self, note: NewNote) -> Result<Note, ServerError>;

    /// All notes, oldest first. Notes created at the same instant are ordered
    /// by id.
    fn find_all(&self) -> Result<Vec<Note>, ServerError>;

    fn find_by_id(&self, id: &str) -> Result<Option<Note>, ServerError>;

    /// Apply `changes` and bump `updated_at`, returning the stored result.
    fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>, ServerError>;

    /// Hard delete, returning the note as it was before removal.
    fn delete_by_id(&self, id: &str) -> Result<Option<Note>, ServerError>;
}
