use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use skills_tracker_core::storage::{repository_error_to_status_code, RepositoryError};

use super::response::ApiResponse;

/// Handler error. The response carries only the status reason; the full
/// error chain goes to the log.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        tracing::error!(status = %status_code, error = ?self.0, "Request failed");
        error_response(
            status_code,
            status_code.canonical_reason().unwrap_or("Internal Server Error"),
        )
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// JSON `{ "message": ... }` error body with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::message(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn body_of(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_repository_detail_stays_out_of_body() {
        let err = RepositoryError::QueryFailed(
            "Scan failed: ServiceError { raw: HttpResponse { .. } }".to_string(),
        );

        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await, json!({"message": "Internal Server Error"}));
    }

    #[tokio::test]
    async fn test_status_follows_repository_error() {
        let err = RepositoryError::NotFound {
            entity_type: "Tag",
            id: "rust".to_string(),
        };

        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, json!({"message": "Not Found"}));
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let response = AppError(anyhow::anyhow!("secret connection string")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert!(!body.to_string().contains("secret"));
    }
}
