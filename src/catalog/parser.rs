//! Walks InnerTube responses (the JSON behind the YouTube Music web client)
//! and flattens them into raw catalog records.

use serde_json::{Map, Value, json};

use super::SearchKind;

const SEPARATOR: &str = " • ";
const ALBUM_PAGE_TYPE: &str = "MUSIC_PAGE_TYPE_ALBUM";
const GREYED_OUT: &str = "MUSIC_ITEM_RENDERER_DISPLAY_POLICY_GREY_OUT";

const SEARCH_SECTIONS: &[&str] = &[
    "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents",
    "/contents/sectionListRenderer/contents",
];

const PLAYLIST_HEADERS: &[&str] = &[
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer",
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicEditablePlaylistDetailHeaderRenderer/header/musicResponsiveHeaderRenderer",
    "/header/musicDetailHeaderRenderer",
    "/header/musicEditablePlaylistDetailHeaderRenderer/header/musicDetailHeaderRenderer",
];

const PLAYLIST_SHELVES: &[&str] = &[
    "/contents/twoColumnBrowseResultsRenderer/secondaryContents/sectionListRenderer/contents/0/musicPlaylistShelfRenderer",
    "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicPlaylistShelfRenderer",
];

const THUMBNAILS: &[&str] = &[
    "/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails",
    "/thumbnail/croppedSquareThumbnailRenderer/thumbnail/thumbnails",
];

const VIDEO_IDS: &[&str] = &[
    "/playlistItemData/videoId",
    "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId",
    "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/navigationEndpoint/watchEndpoint/videoId",
];

const FIXED_DURATIONS: &[&str] = &[
    "/fixedColumns/0/musicResponsiveListItemFixedColumnRenderer/text/runs/0/text",
    "/fixedColumns/0/musicResponsiveListItemFixedColumnRenderer/text/simpleText",
];

const DESCRIPTIONS: &[&str] = &[
    "/description/musicDescriptionShelfRenderer/description",
    "/description",
];

const NEXT_CONTINUATION: &str = "/continuations/0/nextContinuationData/continuation";

/// First page of a playlist browse response.
#[derive(Debug, Default)]
pub struct PlaylistPage {
    pub header: Map<String, Value>,
    pub tracks: Vec<Value>,
    pub continuation: Option<String>,
}

impl PlaylistPage {
    pub fn into_record(self, playlist_id: &str) -> Value {
        let mut record = Map::new();
        record.insert("id".to_string(), json!(playlist_id));
        record.extend(self.header);
        record.insert("tracks".to_string(), Value::Array(self.tracks));
        Value::Object(record)
    }
}

/// Raw song or playlist records from a filtered search response.
pub fn parse_search_results(response: &Value, kind: SearchKind) -> Vec<Value> {
    let Some(sections) = first_pointer(response, SEARCH_SECTIONS).and_then(Value::as_array) else {
        return Vec::new();
    };

    sections
        .iter()
        .filter_map(|section| {
            section
                .pointer("/musicShelfRenderer/contents")
                .and_then(Value::as_array)
        })
        .flatten()
        .filter_map(|entry| entry.get("musicResponsiveListItemRenderer"))
        .map(|item| match kind {
            SearchKind::Songs => parse_song(item),
            SearchKind::Playlists => parse_playlist_summary(item),
        })
        .collect()
}

/// `None` when the response carries neither a playlist header nor a track
/// shelf, which is how upstream answers for unknown ids.
pub fn parse_playlist_page(response: &Value) -> Option<PlaylistPage> {
    let header = first_pointer(response, PLAYLIST_HEADERS);
    let shelf = first_pointer(response, PLAYLIST_SHELVES);
    if header.is_none() && shelf.is_none() {
        return None;
    }

    let (tracks, continuation) = shelf.map(parse_shelf).unwrap_or_default();

    Some(PlaylistPage {
        header: header.map(parse_header).unwrap_or_default(),
        tracks,
        continuation,
    })
}

/// Tracks and the next token from a continuation response.
pub fn parse_playlist_continuation(response: &Value) -> (Vec<Value>, Option<String>) {
    if let Some(items) = response
        .pointer("/onResponseReceivedActions/0/appendContinuationItemsAction/continuationItems")
        .and_then(Value::as_array)
    {
        return parse_track_items(items);
    }

    response
        .pointer("/continuationContents/musicPlaylistShelfContinuation")
        .map(parse_shelf)
        .unwrap_or_default()
}

/// Seconds in a `m:ss` or `h:mm:ss` display duration.
pub fn duration_seconds(text: &str) -> Option<u64> {
    if !is_duration(text) {
        return None;
    }
    text.split(':')
        .try_fold(0u64, |acc, part| {
            acc.checked_mul(60)?.checked_add(part.parse::<u64>().ok()?)
        })
}

fn parse_song(item: &Value) -> Value {
    let mut artists = Vec::new();
    let mut album = Value::Null;
    let mut duration = None;

    for segment in split_segments(runs(flex_column(item, 1))) {
        if let Some(run) = segment.iter().find(|run| page_type(run) == Some(ALBUM_PAGE_TYPE)) {
            album = named_ref(run);
        } else if segment.len() == 1 && is_duration(run_text(&segment[0])) {
            duration = Some(run_text(&segment[0]).to_string());
        } else if artists.is_empty() {
            artists = artists_from(segment);
        }
    }

    let duration = duration.or_else(|| first_text(item, FIXED_DURATIONS));
    let seconds = duration.as_deref().and_then(duration_seconds);

    json!({
        "resultType": "song",
        "title": title(item),
        "videoId": first_text(item, VIDEO_IDS),
        "artists": artists,
        "album": album,
        "duration": duration,
        "duration_seconds": seconds,
        "thumbnails": thumbnails(item),
    })
}

fn parse_playlist_summary(item: &Value) -> Value {
    let browse = item
        .pointer("/navigationEndpoint/browseEndpoint/browseId")
        .or_else(|| {
            flex_column(item, 0)
                .and_then(|text| text.pointer("/runs/0/navigationEndpoint/browseEndpoint/browseId"))
        })
        .and_then(Value::as_str);
    let playlist_id = browse.map(|id| id.strip_prefix("VL").unwrap_or(id).to_string());

    let segments = split_segments(runs(flex_column(item, 1)));
    let author = segments.first().and_then(|segment| joined_text(segment));
    let item_count = if segments.len() > 1 {
        segments.last().and_then(|segment| joined_text(segment))
    } else {
        None
    };

    json!({
        "resultType": "playlist",
        "title": title(item),
        "playlistId": playlist_id,
        "author": author,
        "itemCount": item_count,
        "thumbnails": thumbnails(item),
    })
}

fn parse_playlist_track(item: &Value) -> Value {
    let artists = artists_from(runs(flex_column(item, 1)));
    let album = flex_column(item, 2)
        .and_then(|text| text.pointer("/runs/0"))
        .map(named_ref)
        .unwrap_or(Value::Null);
    let duration = first_text(item, FIXED_DURATIONS);
    let seconds = duration.as_deref().and_then(duration_seconds);
    let is_available =
        item.get("musicItemRendererDisplayPolicy").and_then(Value::as_str) != Some(GREYED_OUT);

    json!({
        "title": title(item),
        "videoId": first_text(item, VIDEO_IDS),
        "artists": artists,
        "album": album,
        "duration": duration,
        "duration_seconds": seconds,
        "thumbnails": thumbnails(item),
        "isAvailable": is_available,
    })
}

fn parse_shelf(shelf: &Value) -> (Vec<Value>, Option<String>) {
    let (tracks, continuation) = shelf
        .get("contents")
        .and_then(Value::as_array)
        .map(|items| parse_track_items(items))
        .unwrap_or_default();
    (tracks, continuation.or_else(|| text_at(shelf, NEXT_CONTINUATION)))
}

fn parse_track_items(items: &[Value]) -> (Vec<Value>, Option<String>) {
    let mut tracks = Vec::new();
    let mut continuation = None;
    for entry in items {
        if let Some(item) = entry.get("musicResponsiveListItemRenderer") {
            tracks.push(parse_playlist_track(item));
        } else if let Some(token) = text_at(
            entry,
            "/continuationItemRenderer/continuationEndpoint/continuationCommand/token",
        ) {
            continuation = Some(token);
        }
    }
    (tracks, continuation)
}

fn parse_header(header: &Value) -> Map<String, Value> {
    let description = first_pointer(header, DESCRIPTIONS)
        .map(|text| runs(Some(text)))
        .and_then(joined_text);
    let author = text_at(header, "/straplineTextOne/runs/0/text")
        .or_else(|| text_at(header, "/subtitle/runs/2/text"));
    let year = runs(header.get("subtitle"))
        .iter()
        .map(run_text)
        .rev()
        .find(|text| text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string);

    let second = runs(header.get("secondSubtitle"));
    let track_count = second.first().map(run_text).and_then(leading_number);
    let duration = second.get(2).map(run_text).map(str::to_string);

    let mut fields = Map::new();
    fields.insert("title".to_string(), json!(text_at(header, "/title/runs/0/text")));
    fields.insert("description".to_string(), json!(description));
    fields.insert("author".to_string(), json!(author));
    fields.insert("year".to_string(), json!(year));
    fields.insert("trackCount".to_string(), json!(track_count));
    fields.insert("duration".to_string(), json!(duration));
    fields.insert("thumbnails".to_string(), thumbnails(header));
    fields
}

fn first_pointer<'a>(root: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths.iter().find_map(|path| root.pointer(path))
}

fn text_at(root: &Value, path: &str) -> Option<String> {
    root.pointer(path).and_then(Value::as_str).map(str::to_string)
}

fn first_text(root: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|path| text_at(root, path))
}

fn flex_column(item: &Value, index: usize) -> Option<&Value> {
    item.get("flexColumns")?
        .get(index)?
        .pointer("/musicResponsiveListItemFlexColumnRenderer/text")
}

fn title(item: &Value) -> Option<String> {
    flex_column(item, 0).and_then(|text| text_at(text, "/runs/0/text"))
}

fn thumbnails(item: &Value) -> Value {
    first_pointer(item, THUMBNAILS)
        .cloned()
        .unwrap_or_else(|| json!([]))
}

fn runs(text: Option<&Value>) -> &[Value] {
    text.and_then(|text| text.get("runs"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn run_text(run: &Value) -> &str {
    run.get("text").and_then(Value::as_str).unwrap_or_default()
}

fn joined_text(runs: &[Value]) -> Option<String> {
    let text: String = runs.iter().map(run_text).collect();
    (!text.is_empty()).then_some(text)
}

fn page_type(run: &Value) -> Option<&str> {
    run.pointer("/navigationEndpoint/browseEndpoint/browseEndpointContextSupportedConfigs/browseEndpointContextMusicConfig/pageType")
        .and_then(Value::as_str)
}

fn browse_id(run: &Value) -> Option<&str> {
    run.pointer("/navigationEndpoint/browseEndpoint/browseId")
        .and_then(Value::as_str)
}

fn named_ref(run: &Value) -> Value {
    json!({ "name": run_text(run), "id": browse_id(run) })
}

fn split_segments(runs: &[Value]) -> Vec<&[Value]> {
    runs.split(|run| run_text(run) == SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect()
}

// Artist runs are interleaved with ", " and " & " joiners.
fn artists_from(runs: &[Value]) -> Vec<Value> {
    runs.iter()
        .filter(|run| {
            browse_id(run).is_some()
                || !matches!(run_text(run).trim(), "" | "," | "&" | "•")
        })
        .map(named_ref)
        .collect()
}

fn is_duration(text: &str) -> bool {
    text.contains(':') && text.chars().all(|c| c.is_ascii_digit() || c == ':')
}

fn leading_number(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
