use axum::Json;

use crate::models::catalog::Status;

pub struct RootController;

impl RootController {
    /// Liveness only; never touches the catalog.
    pub async fn root() -> Json<Status> {
        Json(Status::ok())
    }

    pub async fn health_check() -> Json<Status> {
        Self::root().await
    }
}
