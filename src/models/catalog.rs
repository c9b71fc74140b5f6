use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SongResult {
    pub title: Option<String>,
    pub video_id: Option<String>,
    pub artists: Vec<Value>,
    pub duration: Option<String>,
    pub thumbnails: Vec<Value>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub title: Option<String>,
    pub playlist_id: Option<String>,
    pub thumbnails: Vec<Value>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackResult {
    pub title: Option<String>,
    pub video_id: Option<String>,
    pub artists: Vec<TrackArtist>,
    pub duration: Option<String>,
    /// URL of the last (largest) thumbnail.
    pub thumbnail: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct PlaylistTracks {
    pub tracks: Vec<TrackResult>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Status {
    pub status: String,
}

impl Status {
    pub fn ok() -> Self {
        Status {
            status: "ok".to_string(),
        }
    }
}
