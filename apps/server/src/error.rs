use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratesync_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    detail: String,
}

impl ApiError {
    /// Status code and client-facing detail for this error.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Upstream { status, body } => (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    format!("Error querying the upstream API: {}", body),
                ),
                CoreError::Connectivity(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error connecting to the upstream API: {}", msg),
                ),
                CoreError::InvalidData(_) => (StatusCode::BAD_GATEWAY, e.to_string()),
                CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, e.to_string())
                }
                CoreError::Database(_) | CoreError::Unexpected(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            },
            ApiError::NotFound(reason) => (StatusCode::NOT_FOUND, reason.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, detail);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            detail,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> (StatusCode, String) {
        ApiError::from(err).status_and_detail()
    }

    #[test]
    fn upstream_status_is_forwarded() {
        let (status, detail) = status_of(CoreError::Upstream {
            status: 503,
            body: "maintenance".to_string(),
        });
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(detail, "Error querying the upstream API: maintenance");
    }

    #[test]
    fn invalid_upstream_status_becomes_500() {
        let (status, _) = status_of(CoreError::Upstream {
            status: 42,
            body: String::new(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn connectivity_is_500_with_message() {
        let (status, detail) = status_of(CoreError::Connectivity("refused".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Error connecting to the upstream API: refused");
    }

    #[test]
    fn remaining_kinds_map_to_their_status() {
        assert_eq!(
            status_of(CoreError::InvalidData("x".into())).0,
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::QueryFailed("x".into()))).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(CoreError::Database(DatabaseError::NotFound("x".into()))).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status_and_detail(),
            (StatusCode::NOT_FOUND, "gone".to_string())
        );
    }
}
