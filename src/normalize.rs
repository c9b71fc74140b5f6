//! Raw catalog records to the public response shapes.
//!
//! Every field of a raw record is optional. Lookups never fail; a missing or
//! mistyped field renders as `null` (or `[]` for lists).

use serde_json::Value;

use crate::models::catalog::{PlaylistSummary, SongResult, TrackArtist, TrackResult};

pub fn song_result(raw: &Value) -> SongResult {
    SongResult {
        title: text(raw, "title"),
        video_id: first_present(raw, &["videoId", "id"]),
        artists: list(raw, "artists"),
        duration: text(raw, "duration"),
        thumbnails: list(raw, "thumbnails"),
    }
}

pub fn playlist_summary(raw: &Value) -> PlaylistSummary {
    PlaylistSummary {
        title: text(raw, "title"),
        playlist_id: first_present(raw, &["playlistId", "id"]),
        thumbnails: list(raw, "thumbnails"),
    }
}

pub fn track_result(raw: &Value) -> TrackResult {
    TrackResult {
        title: text(raw, "title"),
        video_id: first_present(raw, &["videoId", "id"]),
        artists: artist_names(raw),
        duration: text(raw, "duration"),
        thumbnail: last_thumbnail_url(raw),
    }
}

/// Tracks of a raw playlist record; empty when the record or its `tracks`
/// field is missing.
pub fn playlist_tracks(playlist: Option<&Value>) -> Vec<TrackResult> {
    playlist
        .and_then(|record| record.get("tracks"))
        .and_then(Value::as_array)
        .map(|tracks| tracks.iter().map(track_result).collect())
        .unwrap_or_default()
}

/// URL of the last entry in `thumbnails`.
pub fn last_thumbnail_url(raw: &Value) -> Option<String> {
    raw.get("thumbnails")
        .and_then(Value::as_array)
        .and_then(|thumbnails| thumbnails.last())
        .and_then(|thumbnail| thumbnail.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Whether a playlist record counts as "not found": null or an empty container.
pub fn is_missing_record(record: &Value) -> bool {
    match record {
        Value::Null => true,
        Value::Object(fields) => fields.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn text(raw: &Value, key: &str) -> Option<String> {
    raw.get(key).and_then(Value::as_str).map(str::to_string)
}

// Empty strings fall through to the next key.
fn first_present(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(*key).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn list(raw: &Value, key: &str) -> Vec<Value> {
    raw.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn artist_names(raw: &Value) -> Vec<TrackArtist> {
    raw.get("artists")
        .and_then(Value::as_array)
        .map(|artists| {
            artists
                .iter()
                .filter_map(|artist| match artist {
                    Value::String(name) => Some(name.as_str()),
                    other => other.get("name").and_then(Value::as_str),
                })
                .map(|name| TrackArtist {
                    name: name.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}
