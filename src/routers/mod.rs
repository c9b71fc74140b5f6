pub mod catalog;
pub mod root;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
pub use catalog::{
    playlist_detail_route, playlist_tracks_route, search_playlists_route, search_songs_route,
};
pub use root::{health_check_route, root_route};

/// Paths served, for the startup banner.
pub const ROUTES: &[&str] = &[
    "/",
    "/health",
    "/search",
    "/playlists/{playlist_id}",
    "/playlists/{playlist_id}/tracks",
    "/api/youtube/search",
    "/api/youtube/playlists/search",
    "/api/youtube/playlists/{playlist_id}",
    "/api/playlists/{playlist_id}",
    "/api/playlists/{playlist_id}/tracks",
];

/// `/api` endpoint set.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/youtube/search", get(search_songs_route))
        .route("/youtube/playlists/search", get(search_playlists_route))
        .route("/youtube/playlists/{playlist_id}", get(playlist_detail_route))
        .route("/playlists/{playlist_id}", get(playlist_detail_route))
        .route("/playlists/{playlist_id}/tracks", get(playlist_tracks_route))
}

pub fn app(state: AppState) -> Router {
    // Public, unauthenticated API.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_check_route))
        .route("/search", get(search_songs_route))
        .route("/playlists/{playlist_id}", get(playlist_detail_route))
        .route("/playlists/{playlist_id}/tracks", get(playlist_tracks_route))
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
