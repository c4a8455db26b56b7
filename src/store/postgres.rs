use chrono::Utc;
use diesel::{pg::PgConnection, prelude::*, r2d2::ConnectionManager};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::note::{NewNote, Note, NoteChanges},
    schema::notes,
};

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    /// Opens the pool and brings the `notes` table up to date.
    pub fn connect(database_url: &str) -> Result<Self, ServerError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = r2d2::Pool::builder().build(manager)?;

        let mut connection = pool.get()?;
        let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
            log::error!("failed to run migrations: {e}");
            ServerError::MigrationError
        })?;
        for version in applied {
            log::info!("applied migration {version}");
        }

        Ok(PgNoteStore { pool })
    }
}

impl NoteStore for PgNoteStore {
    fn insert(&self, note: NewNote) -> Result<Note, ServerError> {
        let mut connection = self.pool.get()?;

        let result = diesel::insert_into(notes::table)
            .values(note.into_insertable(Utc::now()))
            .get_result::<Note>(&mut connection)?;
        Ok(result)
    }

    fn find_all(&self) -> Result<Vec<Note>, ServerError> {
        let mut connection = self.pool.get()?;

        let result = notes::table
            .order((notes::created_at.asc(), notes::id.asc()))
            .load::<Note>(&mut connection)?;
        Ok(result)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Note>, ServerError> {
        let mut connection = self.pool.get()?;

        let result = notes::table
            .find(id)
            .first::<Note>(&mut connection)
            .optional()?;
        Ok(result)
    }

    fn update_by_id(&self, id: &str, changes: NoteChanges) -> Result<Option<Note>, ServerError> {
        let mut connection = self.pool.get()?;

        let result = diesel::update(notes::table.find(id))
            .set((&changes, notes::updated_at.eq(Utc::now())))
            .get_result::<Note>(&mut connection)
            .optional()?;
        Ok(result)
    }

    fn delete_by_id(&self, id: &str) -> Result<Option<Note>, ServerError> {
        let mut connection = self.pool.get()?;

        let result = diesel::delete(notes::table.find(id))
            .get_result::<Note>(&mut connection)
            .optional()?;
        Ok(result)
    }
}
