use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Any failure reaching or querying the database. `message` is what the
    /// caller sees; `detail` is the driver's text, exposed only when set.
    #[error("Database error ({message}): {source}")]
    Database {
        message: String,
        detail: Option<String>,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    pub fn database(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::Database {
            message: message.into(),
            detail: None,
            source,
        }
    }

    /// Like [`AppError::database`], but the driver error text is attached to
    /// the response body as `err`.
    pub fn database_with_detail(message: impl Into<String>, source: sqlx::Error) -> Self {
        AppError::Database {
            message: message.into(),
            detail: Some(source.to_string()),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Validation(message) | AppError::BadRequest(message) => {
                ErrorResponse::new(message)
            }
            AppError::Database {
                message,
                detail,
                source,
            } => {
                tracing::error!("{}: {:?}", message, source);
                ErrorResponse {
                    message,
                    err: detail,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("Invalid name.".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::BadRequest("nope".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::database("Failed", sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_detail_only_when_requested() {
        match AppError::database("Failed", sqlx::Error::PoolClosed) {
            AppError::Database { detail, .. } => assert!(detail.is_none()),
            other => panic!("unexpected variant: {:?}", other),
        }

        match AppError::database_with_detail("Failed", sqlx::Error::PoolClosed) {
            AppError::Database { detail, .. } => {
                assert_eq!(detail, Some(sqlx::Error::PoolClosed.to_string()))
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
