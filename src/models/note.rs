use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable};
use nanoid::nanoid;
use serde_derive::{Deserialize, Serialize};

use crate::errors::ServerError;
use crate::schema::notes;

pub const ID_LENGTH: usize = 21;

const MISSING_FIELDS: &str = "please provide title and content";
const NOTHING_TO_UPDATE: &str = "please provide title or content to update";

#[derive(Clone, Debug, PartialEq, Eq, Queryable, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = notes)]
pub struct InsertNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated note ready to be persisted; the store fills in id and timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
}

impl NewNote {
    pub fn into_insertable(self, now: DateTime<Utc>) -> InsertNote {
        InsertNote {
            id: new_id(),
            title: self.title,
            content: self.content,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = notes)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteChanges {
    pub fn apply_to(self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
        note.updated_at = now;
    }
}

/// Request body shared by create and update. Anything besides these two
/// fields is dropped during deserialization.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IncomingNote {
    #[serde(alias = "titulo")]
    pub title: Option<String>,
    #[serde(alias = "contenido")]
    pub content: Option<String>,
}

impl IncomingNote {
    pub fn into_new_note(self) -> Result<NewNote, ServerError> {
        let (title, content) = self.normalized();

        match (title, content) {
            (Some(title), Some(content)) if !title.is_empty() && !content.is_empty() => {
                Ok(NewNote { title, content })
            }
            _ => Err(ServerError::validation(MISSING_FIELDS)),
        }
    }

    pub fn into_changes(self) -> Result<NoteChanges, ServerError> {
        let (title, content) = self.normalized();
        let provided = |field: &Option<String>| field.as_deref().map_or(false, |v| !v.is_empty());

        if !provided(&title) && !provided(&content) {
            return Err(ServerError::validation(NOTHING_TO_UPDATE));
        }
        if title.as_deref() == Some("") {
            return Err(ServerError::validation("title must not be empty"));
        }
        if content.as_deref() == Some("") {
            return Err(ServerError::validation("content must not be empty"));
        }

        Ok(NoteChanges { title, content })
    }

    fn normalized(self) -> (Option<String>, Option<String>) {
        (self.title.map(|t| t.trim().to_string()), self.content)
    }
}

pub fn new_id() -> String {
    nanoid!(ID_LENGTH)
}

pub fn is_well_formed_id(id: &str) -> bool {
    id.len() == ID_LENGTH
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
