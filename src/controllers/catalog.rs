use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    catalog::{self, CatalogError, CatalogHandle, SearchKind},
    error::ApiError,
    models::catalog::{PlaylistSummary, PlaylistTracks, SongResult},
    normalize,
};

/// Upper bound on tracks fetched per playlist lookup.
pub const PLAYLIST_TRACK_LIMIT: usize = 200;

/// Search parameters; clients send either `q` or `query`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub query: Option<String>,
}

impl SearchParams {
    /// First non-blank of `q` and `query`.
    pub fn text(&self) -> Option<&str> {
        [self.q.as_deref(), self.query.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}

pub struct CatalogController<'a> {
    catalog: &'a CatalogHandle,
}

impl<'a> CatalogController<'a> {
    pub fn new(catalog: &'a CatalogHandle) -> Self {
        Self { catalog }
    }

    pub async fn search_songs(&self, params: &SearchParams) -> Result<Vec<SongResult>, ApiError> {
        let query = required_query(params)?;
        let records = self.search(query, SearchKind::Songs).await?;
        info!("Song search {:?}: {} results", query, records.len());
        Ok(records.iter().map(normalize::song_result).collect())
    }

    pub async fn search_playlists(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<PlaylistSummary>, ApiError> {
        let query = required_query(params)?;
        let records = self.search(query, SearchKind::Playlists).await?;
        info!("Playlist search {:?}: {} results", query, records.len());
        Ok(records.iter().map(normalize::playlist_summary).collect())
    }

    /// Raw playlist record, or 404 when upstream has nothing for `playlist_id`.
    pub async fn playlist_detail(&self, playlist_id: &str) -> Result<Value, ApiError> {
        let playlist = self.playlist(playlist_id).await?;

        match playlist {
            Some(record) if !normalize::is_missing_record(&record) => Ok(record),
            _ => {
                debug!("Playlist {} not found upstream", playlist_id);
                Err(ApiError::NotFound("Playlist not found".to_string()))
            }
        }
    }

    /// Normalized tracks of a playlist. Unlike [`Self::playlist_detail`], an
    /// unknown playlist yields an empty list rather than 404.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<PlaylistTracks, ApiError> {
        let playlist = self.playlist(playlist_id).await?;

        Ok(PlaylistTracks {
            tracks: normalize::playlist_tracks(playlist.as_ref()),
        })
    }

    async fn search(&self, query: &str, kind: SearchKind) -> Result<Vec<Value>, ApiError> {
        let result: catalog::Result<_> = match self.catalog.client() {
            Ok(client) => client.search(query, kind).await,
            Err(err) => Err(err),
        };
        result.map_err(|err| upstream_failure(&format!("{} search {:?}", kind, query), err))
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Option<Value>, ApiError> {
        let result: catalog::Result<_> = match self.catalog.client() {
            Ok(client) => client.get_playlist(playlist_id, PLAYLIST_TRACK_LIMIT).await,
            Err(err) => Err(err),
        };
        result.map_err(|err| upstream_failure(&format!("playlist {:?}", playlist_id), err))
    }
}

fn upstream_failure(operation: &str, err: CatalogError) -> ApiError {
    error!("Catalog call failed for {}: {}", operation, err);
    err.into()
}

fn required_query(params: &SearchParams) -> Result<&str, ApiError> {
    params
        .text()
        .ok_or_else(|| ApiError::Validation("Missing required query parameter: q".to_string()))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;

    use super::*;
    use crate::catalog::{CatalogError, MockCatalogClient};

    fn params(q: &str) -> SearchParams {
        SearchParams {
            q: Some(q.to_string()),
            query: None,
        }
    }

    #[test]
    fn search_text_prefers_first_non_blank() {
        let both = SearchParams {
            q: Some("  ".to_string()),
            query: Some(" daft punk ".to_string()),
        };
        assert_eq!(both.text(), Some("daft punk"));
        assert_eq!(params("q wins").text(), Some("q wins"));
        assert_eq!(SearchParams::default().text(), None);
    }

    #[tokio::test]
    async fn search_songs_normalizes_in_order() {
        let mut mock = MockCatalogClient::new();
        mock.expect_search()
            .with(eq("daft punk"), eq(SearchKind::Songs))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    json!({ "title": "One More Time", "videoId": "v1" }),
                    json!({ "title": "Aerodynamic", "id": "v2" }),
                ])
            });
        let handle = CatalogHandle::ready(mock);

        let songs = CatalogController::new(&handle)
            .search_songs(&params("daft punk"))
            .await
            .unwrap();

        let ids: Vec<_> = songs.iter().map(|song| song.video_id.as_deref()).collect();
        assert_eq!(ids, vec![Some("v1"), Some("v2")]);
        assert_eq!(songs[0].title.as_deref(), Some("One More Time"));
    }

    #[tokio::test]
    async fn blank_query_never_reaches_catalog() {
        let mut mock = MockCatalogClient::new();
        mock.expect_search().never();
        let handle = CatalogHandle::ready(mock);
        let controller = CatalogController::new(&handle);

        let err = controller.search_songs(&params("   ")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = controller
            .search_playlists(&SearchParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn search_playlists_uses_playlist_kind() {
        let mut mock = MockCatalogClient::new();
        mock.expect_search()
            .with(eq("house"), eq(SearchKind::Playlists))
            .times(1)
            .returning(|_, _| Ok(vec![json!({ "title": "House", "id": "PL1" })]));
        let handle = CatalogHandle::ready(mock);

        let playlists = CatalogController::new(&handle)
            .search_playlists(&params("house"))
            .await
            .unwrap();

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].playlist_id.as_deref(), Some("PL1"));
    }

    #[tokio::test]
    async fn upstream_failure_is_reported_with_message() {
        let mut mock = MockCatalogClient::new();
        mock.expect_search().returning(|_, _| {
            Err(CatalogError::Status {
                status: 429,
                body: "slow down".to_string(),
            })
        });
        let handle = CatalogHandle::ready(mock);

        let err = CatalogController::new(&handle)
            .search_songs(&params("anything"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Upstream(_)));
        assert!(err.to_string().contains("slow down"));
    }

    #[tokio::test]
    async fn playlist_failures_are_not_mistaken_for_absence() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_playlist()
            .with(eq("PLbroken"), eq(PLAYLIST_TRACK_LIMIT))
            .times(2)
            .returning(|_, _| {
                Err(CatalogError::Status {
                    status: 502,
                    body: "bad gateway".to_string(),
                })
            });
        let handle = CatalogHandle::ready(mock);
        let controller = CatalogController::new(&handle);

        for err in [
            controller.playlist_detail("PLbroken").await.unwrap_err(),
            controller.playlist_tracks("PLbroken").await.unwrap_err(),
        ] {
            assert!(matches!(err, ApiError::Upstream(_)));
            assert_eq!(err.to_string(), "Upstream returned status 502: bad gateway");
        }
    }

    #[tokio::test]
    async fn playlist_detail_requests_capped_page() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_playlist()
            .with(eq("PL1"), eq(PLAYLIST_TRACK_LIMIT))
            .times(1)
            .returning(|_, _| Ok(Some(json!({ "id": "PL1", "tracks": [] }))));
        let handle = CatalogHandle::ready(mock);

        let record = CatalogController::new(&handle)
            .playlist_detail("PL1")
            .await
            .unwrap();

        assert_eq!(record, json!({ "id": "PL1", "tracks": [] }));
    }

    #[tokio::test]
    async fn absent_playlist_is_404_for_detail_but_empty_for_tracks() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_playlist()
            .times(2)
            .returning(|_, _| Ok(None));
        let handle = CatalogHandle::ready(mock);
        let controller = CatalogController::new(&handle);

        let err = controller.playlist_detail("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(err.to_string(), "Playlist not found");

        let tracks = controller.playlist_tracks("missing").await.unwrap();
        assert!(tracks.tracks.is_empty());
    }

    #[tokio::test]
    async fn empty_record_counts_as_not_found() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_playlist()
            .returning(|_, _| Ok(Some(json!({}))));
        let handle = CatalogHandle::ready(mock);

        let err = CatalogController::new(&handle)
            .playlist_detail("PL1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn playlist_tracks_use_last_thumbnail() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_playlist().returning(|_, _| {
            Ok(Some(json!({
                "tracks": [{
                    "title": "Harder, Better, Faster, Stronger",
                    "videoId": "v3",
                    "artists": [{ "name": "Daft Punk", "id": "UC1" }],
                    "duration": "3:45",
                    "thumbnails": [{ "url": "small" }, { "url": "large" }]
                }]
            })))
        });
        let handle = CatalogHandle::ready(mock);

        let tracks = CatalogController::new(&handle)
            .playlist_tracks("PL1")
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&tracks).unwrap(),
            json!({
                "tracks": [{
                    "title": "Harder, Better, Faster, Stronger",
                    "videoId": "v3",
                    "artists": [{ "name": "Daft Punk" }],
                    "duration": "3:45",
                    "thumbnail": "large"
                }]
            })
        );
    }

    #[tokio::test]
    async fn uninitialized_catalog_fails_every_operation() {
        let handle = CatalogHandle::unavailable("no network at startup");
        let controller = CatalogController::new(&handle);

        let errors = vec![
            controller.search_songs(&params("x")).await.unwrap_err(),
            controller.search_playlists(&params("x")).await.unwrap_err(),
            controller.playlist_detail("PL1").await.unwrap_err(),
            controller.playlist_tracks("PL1").await.unwrap_err(),
        ];

        for err in errors {
            assert!(matches!(err, ApiError::Upstream(_)));
            assert_eq!(err.to_string(), "YTMusic not initialized");
        }
    }
}
