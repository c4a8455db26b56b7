use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::note::{NewNote, Note, NoteChanges},
};

/// Notes kept in a vector behind one lock, so insertion order is list order
/// and each call sees a consistent snapshot.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Note>>, ServerError> {
        self.notes.lock().map_err(|_| {
            log::error!("memory note store lock poisoned");
            ServerError::StoreLockError
        })
    }
}

impl NoteStore for MemoryNoteStore {
    fn insert(&self, note: NewNote) -> Result<Note, ServerError> {
        let row = note.into_insertable(Utc::now());
        let note = Note {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        self.lock()?.push(note.clone());
        Ok(note)
    }

    fn find_all(&self) -> Result<Vec<Note>, ServerError> {
        Ok(self.lock()?.clone())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Note>, ServerError> {
        Ok(self.lock()?.iter().find(|n| n.id == id).cloned())
    }

    fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>, ServerError> {
        let mut notes = self.lock()?;

        Ok(notes.iter_mut().find(|n| n.id == id).map(|note| {
            changes.apply_to(note, Utc::now());
            note.clone()
        }))
    }

    fn delete_by_id(&self, id: &str) -> Result<Option<Note>, ServerError> {
        let mut notes = self.lock()?;

        Ok(notes
            .iter()
            .position(|n| n.id == id)
            .map(|index| notes.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_note(title: &str, content: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn insert_assigns_id_and_timestamps() {
        let store = MemoryNoteStore::new();
        let note = store.insert(new_note("A", "B")).unwrap();

        assert!(crate::models::note::is_well_formed_id(&note.id));
        assert_eq!(note.created_at, note.updated_at);
        assert_eq!(store.find_by_id(&note.id).unwrap(), Some(note));
    }

    #[test]
    fn find_all_keeps_insertion_order() {
        let store = MemoryNoteStore::new();
        assert!(store.find_all().unwrap().is_empty());

        let first = store.insert(new_note("Nota 1", "Contenido 1")).unwrap();
        let second = store.insert(new_note("Nota 2", "Contenido 2")).unwrap();

        let ids: Vec<String> = store.find_all().unwrap().into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn update_is_partial() {
        let store = MemoryNoteStore::new();
        let note = store.insert(new_note("A", "B")).unwrap();

        let updated = store
            .update_by_id(
                &note.id,
                NoteChanges {
                    title: None,
                    content: Some("D".into()),
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "A");
        assert_eq!(updated.content, "D");
        assert_eq!(updated.created_at, note.created_at);
        assert!(updated.updated_at >= note.updated_at);
        assert_eq!(store.find_by_id(&note.id).unwrap(), Some(updated));
    }

    #[test]
    fn missing_ids_yield_none() {
        let store = MemoryNoteStore::new();
        store.insert(new_note("A", "B")).unwrap();

        assert_eq!(store.find_by_id("nope").unwrap(), None);
        assert_eq!(
            store.update_by_id("nope", NoteChanges::default()).unwrap(),
            None
        );
        assert_eq!(store.delete_by_id("nope").unwrap(), None);
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_once() {
        let store = MemoryNoteStore::new();
        let note = store.insert(new_note("A", "B")).unwrap();

        assert_eq!(store.delete_by_id(&note.id).unwrap(), Some(note.clone()));
        assert_eq!(store.delete_by_id(&note.id).unwrap(), None);
        assert_eq!(store.find_by_id(&note.id).unwrap(), None);
    }
}
