use actix_web::{http::StatusCode, HttpResponse};
use derive_more::Display;
use serde_json::json;

#[derive(Debug, Display)]
pub enum ServerError {
    #[display(fmt = "{}", _0)]
    Validation(String),
    #[display(fmt = "note with the id of '{}' was not found", _0)]
    NotFound(String),
    #[display(fmt = "route not found")]
    RouteNotFound,
    DieselError,
    EnvironmentError,
    R2D2Error,
    BlockingError,
    MigrationError,
    StoreLockError,
}

impl ServerError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServerError::Validation(message.into())
    }
}

impl From<r2d2::Error> for ServerError {
    fn from(err: r2d2::Error) -> ServerError {
        log::error!("{err}");
        ServerError::R2D2Error
    }
}

impl From<std::num::ParseIntError> for ServerError {
    fn from(_: std::num::ParseIntError) -> ServerError {
        ServerError::EnvironmentError
    }
}

impl From<diesel::result::Error> for ServerError {
    fn from(err: diesel::result::Error) -> ServerError {
        log::error!("{err}");
        ServerError::DieselError
    }
}

impl From<actix_web::error::BlockingError> for ServerError {
    fn from(_: actix_web::error::BlockingError) -> ServerError {
        ServerError::BlockingError
    }
}

impl actix_web::error::ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) | ServerError::RouteNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ServerError::Validation(_) | ServerError::NotFound(_) | ServerError::RouteNotFound => {
                self.to_string()
            }
            ServerError::DieselError => "Library Error: Diesel Error.".to_string(),
            ServerError::EnvironmentError => {
                "Server Error: Invalid environment configuration.".to_string()
            }
            ServerError::R2D2Error => "Server Error: Pooling Error.".to_string(),
            ServerError::BlockingError => "Server Error: Worker pool unavailable.".to_string(),
            ServerError::MigrationError => "Server Error: Database schema unavailable.".to_string(),
            ServerError::StoreLockError => "Server Error: Note store unavailable.".to_string(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, ResponseError};

    async fn body_of(err: ServerError) -> serde_json::Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            ServerError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::NotFound("abc".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ServerError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn everything_else_is_internal() {
        for err in [
            ServerError::DieselError,
            ServerError::EnvironmentError,
            ServerError::R2D2Error,
            ServerError::BlockingError,
            ServerError::MigrationError,
            ServerError::StoreLockError,
        ] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[actix_web::test]
    async fn body_is_a_message_object() {
        let body = body_of(ServerError::validation("please provide title and content")).await;
        assert_eq!(body, json!({ "message": "please provide title and content" }));

        let body = body_of(ServerError::NotFound("xyz".into())).await;
        assert_eq!(
            body["message"],
            "note with the id of 'xyz' was not found"
        );
    }

    #[actix_web::test]
    async fn internal_details_are_not_leaked() {
        let body = body_of(ServerError::from(diesel::result::Error::NotFound)).await;
        assert_eq!(body["message"], "Library Error: Diesel Error.");
    }
}
