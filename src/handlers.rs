use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::ServerError;

pub mod note;

pub async fn index() -> impl actix_web::Responder {
    actix_web::HttpResponse::Ok().finish()
}

pub async fn not_found() -> Result<actix_web::HttpResponse, ServerError> {
    Err(ServerError::RouteNotFound)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("rejecting request body: {err}");
    ServerError::validation(format!("Invalid Request: {err}")).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(index))
        .service(
            web::scope("/api/notas")
                .route("", web::post().to(note::create))
                .route("", web::get().to(note::list))
                .route("/{id}", web::get().to(note::get))
                .route("/{id}", web::put().to(note::update))
                .route("/{id}", web::delete().to(note::del)),
        );
}
