use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_not_found(id: i64) -> Self {
        AppError::NotFound(format!("user {} not found", id))
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Storage(_) => (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

/// Error envelope shared by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable kind, e.g. `not_found`.
    pub kind: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        match &self {
            AppError::Storage(e) => tracing::error!(error = %e, "storage error"),
            AppError::Internal(e) => tracing::error!(error = %e, "internal error"),
            _ => {}
        }
        let message = match &self {
            AppError::Storage(_) => "storage is unavailable, try again later".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
            _ => self.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                kind: kind.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_status() {
        assert_eq!(
            AppError::user_not_found(7).status_and_kind(),
            (StatusCode::NOT_FOUND, "not_found")
        );
        assert_eq!(
            AppError::Validation("bad".into()).status_and_kind(),
            (StatusCode::BAD_REQUEST, "validation_error")
        );
        assert_eq!(
            AppError::Storage(sqlx::Error::PoolTimedOut).status_and_kind(),
            (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status_and_kind(),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        );
    }

    #[tokio::test]
    async fn renders_structured_body() {
        let res = AppError::user_not_found(42).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["kind"], "not_found");
        assert_eq!(json["error"]["message"], "user 42 not found");
    }

    #[tokio::test]
    async fn hides_fault_detail_from_clients() {
        let res = AppError::Storage(sqlx::Error::Protocol("0x00 in relation users".into()))
            .into_response();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["kind"], "storage_unavailable");
        assert_eq!(json["error"]["message"], "storage is unavailable, try again later");

        let res = AppError::Internal(anyhow::anyhow!("argon2 salt error")).into_response();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"]["message"], "internal server error");
    }
}
