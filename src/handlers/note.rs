use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::{
    errors::ServerError,
    models::note::{is_well_formed_id, IncomingNote},
    store::NoteStore,
};

// Malformed ids can never resolve, so they get the same answer as unknown ones.
fn checked_id(note_id: web::Path<String>) -> Result<String, ServerError> {
    let note_id = note_id.into_inner();
    if is_well_formed_id(&note_id) {
        Ok(note_id)
    } else {
        log::debug!("rejecting malformed note id {note_id:?}");
        Err(ServerError::NotFound(note_id))
    }
}

pub async fn create(
    input: web::Json<IncomingNote>,
    store: web::Data<dyn NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let new_note = input.into_inner().into_new_note()?;
    let store = store.into_inner();

    let note = web::block(move || store.insert(new_note)).await??;
    log::info!("created note {}", note.id);
    Ok(HttpResponse::Created().json(json!(note)))
}

pub async fn list(store: web::Data<dyn NoteStore>) -> Result<HttpResponse, ServerError> {
    let store = store.into_inner();

    let notes = web::block(move || store.find_all()).await??;
    Ok(HttpResponse::Ok().json(json!(notes)))
}

pub async fn get(
    note_id: web::Path<String>,
    store: web::Data<dyn NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let note_id = checked_id(note_id)?;
    let store = store.into_inner();

    let lookup_id = note_id.clone();
    match web::block(move || store.find_by_id(&lookup_id)).await?? {
        Some(note) => Ok(HttpResponse::Ok().json(json!(note))),
        None => {
            log::debug!("note {note_id} not found");
            Err(ServerError::NotFound(note_id))
        }
    }
}

pub async fn update(
    note_id: web::Path<String>,
    input: web::Json<IncomingNote>,
    store: web::Data<dyn NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let changes = input.into_inner().into_changes()?;
    let note_id = checked_id(note_id)?;
    let store = store.into_inner();

    let lookup_id = note_id.clone();
    match web::block(move || store.update_by_id(&lookup_id, changes)).await?? {
        Some(note) => {
            log::info!("updated note {}", note.id);
            Ok(HttpResponse::Ok().json(json!(note)))
        }
        None => {
            log::debug!("note {note_id} not found");
            Err(ServerError::NotFound(note_id))
        }
    }
}

pub async fn del(
    note_id: web::Path<String>,
    store: web::Data<dyn NoteStore>,
) -> Result<HttpResponse, ServerError> {
    let note_id = checked_id(note_id)?;
    let store = store.into_inner();

    let lookup_id = note_id.clone();
    match web::block(move || store.delete_by_id(&lookup_id)).await?? {
        Some(note) => {
            log::info!("deleted note {}", note.id);
            Ok(HttpResponse::Ok().json(json!({
                "id": note.id,
                "message": "note deleted",
            })))
        }
        None => {
            log::debug!("note {note_id} not found");
            Err(ServerError::NotFound(note_id))
        }
    }
}
