use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::CatalogError;

/// Every way a request can fail, and the HTTP status it maps to.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input missing or malformed (400).
    #[error("{0}")]
    Validation(String),

    /// Entity does not exist upstream (404).
    #[error("{0}")]
    NotFound(String),

    /// Catalog not initialized or the call failed (500).
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Upstream failures are logged with their operation where they happen.
        if status.is_server_error() {
            debug!("{} {}", status, self);
        } else {
            warn!("{} {}", status, self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status() {
        assert_eq!(
            ApiError::Validation("missing".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn catalog_failures_keep_their_message() {
        let err: ApiError = CatalogError::Status {
            status: 503,
            body: "unavailable".into(),
        }
        .into();
        assert!(matches!(&err, ApiError::Upstream(_)));
        assert_eq!(err.to_string(), "Upstream returned status 503: unavailable");

        let err: ApiError = CatalogError::NotInitialized.into();
        assert_eq!(err.to_string(), "YTMusic not initialized");
    }

    #[test]
    fn query_rejections_are_validation_errors() {
        use axum::{extract::Query, http::Uri};

        use crate::controllers::catalog::SearchParams;

        let uri: Uri = "/search?q=a&q=b".parse().unwrap();
        let err: ApiError = Query::<SearchParams>::try_from_uri(&uri).unwrap_err().into();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("duplicate field `q`"));
    }

    #[tokio::test]
    async fn renders_detail_body() {
        let response = ApiError::NotFound("Playlist not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "detail": "Playlist not found" }));
    }
}
