use axum::Json;

use crate::controllers::RootController;
use crate::models::catalog::Status;

pub async fn root_route() -> Json<Status> {
    RootController::root().await
}

pub async fn health_check_route() -> Json<Status> {
    RootController::health_check().await
}
