use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use serde_json::Value;

use crate::{
    controllers::{CatalogController, catalog::SearchParams},
    error::ApiError,
    models::catalog::{PlaylistSummary, PlaylistTracks, SongResult},
    state::AppState,
};

pub async fn search_songs_route(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SongResult>>, ApiError> {
    let Query(params) = query?;
    CatalogController::new(&state.catalog)
        .search_songs(&params)
        .await
        .map(Json)
}

pub async fn search_playlists_route(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<PlaylistSummary>>, ApiError> {
    let Query(params) = query?;
    CatalogController::new(&state.catalog)
        .search_playlists(&params)
        .await
        .map(Json)
}

pub async fn playlist_detail_route(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    CatalogController::new(&state.catalog)
        .playlist_detail(&playlist_id)
        .await
        .map(Json)
}

pub async fn playlist_tracks_route(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<Json<PlaylistTracks>, ApiError> {
    CatalogController::new(&state.catalog)
        .playlist_tracks(&playlist_id)
        .await
        .map(Json)
}
