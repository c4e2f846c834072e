use std::sync::Mutex;

use async_trait::async_trait;

use super::*;
use crate::services::metadata::types::{
    ArtistSummary, CoverImage, Label, LabelInfo, Medium, Relation, ReleaseSummary, Tag, Track, UrlResource,
};

// =========================================================================
// MockMetadata
// =========================================================================

#[derive(Default)]
struct MockMetadata {
    search_fails: bool,
    hits: Vec<ArtistSummary>,
    artist: Option<ArtistDetails>,
    failing_release: Option<String>,
    failing_cover: Option<String>,
    calls: Mutex<Vec<String>>,
}

impl MockMetadata {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn http_error(status: u16) -> ServiceError {
    ServiceError::Status { status, message: format!("HTTP error! status: {status}") }
}

#[async_trait]
impl MetadataApi for MockMetadata {
    async fn search_artist(&self, query: &str) -> Result<Vec<ArtistSummary>, ServiceError> {
        self.record(format!("search:{query}"));
        if self.search_fails {
            return Err(http_error(503));
        }
        Ok(self.hits.clone())
    }

    async fn get_artist_details(&self, artist_id: &str) -> Result<ArtistDetails, ServiceError> {
        self.record(format!("artist:{artist_id}"));
        self.artist.clone().ok_or_else(|| http_error(404))
    }

    async fn get_release_details(&self, release_id: &str) -> Result<ReleaseDetails, ServiceError> {
        self.record(format!("release:{release_id}"));
        if self.failing_release.as_deref() == Some(release_id) {
            return Err(http_error(500));
        }
        Ok(release(release_id))
    }

    async fn get_cover_art(&self, release_id: &str) -> Result<CoverArt, ServiceError> {
        self.record(format!("coverart:{release_id}"));
        if self.failing_cover.as_deref() == Some(release_id) {
            return Err(http_error(404));
        }
        Ok(CoverArt {
            images: vec![
                CoverImage { image: format!("https://img.example/{release_id}-back.jpg"), front: false },
                CoverImage { image: format!("https://img.example/{release_id}-front.jpg"), front: true },
            ],
        })
    }
}

// =========================================================================
// Fixtures
// =========================================================================

fn summary(id: &str, name: &str) -> ArtistSummary {
    ArtistSummary { id: id.into(), name: name.into(), country: None, disambiguation: None, score: Some(100) }
}

fn link(url: &str) -> Relation {
    Relation { relation_type: Some("social network".into()), url: Some(UrlResource { resource: url.into() }) }
}

fn artist(release_count: usize) -> ArtistDetails {
    ArtistDetails {
        id: "art-1".into(),
        name: "Low Tide".into(),
        country: Some("GB".into()),
        disambiguation: Some(String::new()),
        life_span: None,
        genres: Vec::new(),
        tags: vec![Tag { name: "shoegaze".into(), count: Some(3) }],
        relations: vec![
            link("https://lowtide.bandcamp.com/"),
            link("https://open.spotify.com/artist/xyz"),
            link("https://lowtide.example.org"),
            Relation { relation_type: Some("wikidata".into()), url: None },
        ],
        releases: (0..release_count)
            .map(|i| ReleaseSummary { id: format!("rel-{i}"), title: format!("Record {i}"), date: None, status: None })
            .collect(),
    }
}

fn release(id: &str) -> ReleaseDetails {
    ReleaseDetails {
        id: id.into(),
        title: format!("Title {id}"),
        date: Some("2021-04-02".into()),
        country: None,
        media: vec![
            Medium {
                position: Some(1),
                format: Some("CD".into()),
                tracks: vec![
                    Track { position: Some(1), title: "Intro".into(), length: Some(61_000) },
                    Track { position: None, title: "Drift".into(), length: None },
                ],
            },
            Medium {
                position: Some(2),
                format: Some("CD".into()),
                tracks: vec![Track { position: Some(4), title: "Outro".into(), length: Some(90_500) }],
            },
        ],
        label_info: vec![LabelInfo { label: Some(Label { name: "Night Shift".into() }) }],
    }
}

// =========================================================================
// transform_to_project_data
// =========================================================================

#[test]
fn transform_with_no_releases_keeps_classified_links() {
    let data = transform_to_project_data(&artist(0), &[]);
    assert!(data.releases.is_empty());
    let platforms: Vec<&str> = data
        .artist
        .social_links
        .iter()
        .map(|l| l.platform.as_str())
        .collect();
    assert_eq!(platforms, vec!["Bandcamp", "Spotify", "Website"]);
    assert_eq!(data.artist.social_links[0].url, "https://lowtide.bandcamp.com/");
}

#[test]
fn transform_uses_tags_when_no_genres_and_drops_empty_disambiguation() {
    let data = transform_to_project_data(&artist(0), &[]);
    assert_eq!(data.artist.genres, vec!["shoegaze"]);
    assert_eq!(data.artist.disambiguation, None);
    assert_eq!(data.artist.country.as_deref(), Some("GB"));
}

#[test]
fn transform_prefers_front_cover_and_labels() {
    let bundle = ReleaseBundle {
        details: release("rel-0"),
        cover_art: Some(CoverArt {
            images: vec![
                CoverImage { image: "back.jpg".into(), front: false },
                CoverImage { image: "front.jpg".into(), front: true },
            ],
        }),
    };
    let data = transform_to_project_data(&artist(1), &[bundle]);
    let entry = &data.releases[0];
    assert_eq!(entry.cover_image.as_deref(), Some("front.jpg"));
    assert_eq!(entry.label.as_deref(), Some("Night Shift"));
    assert_eq!(entry.release_date.as_deref(), Some("2021-04-02"));
}

#[test]
fn extract_tracks_keeps_upstream_positions() {
    let tracks = extract_tracks(&release("r"));
    let summary: Vec<(u32, u32, &str, Option<u64>)> = tracks
        .iter()
        .map(|t| (t.disc, t.position, t.title.as_str(), t.duration_ms))
        .collect();
    assert_eq!(
        summary,
        vec![(1, 1, "Intro", Some(61_000)), (1, 2, "Drift", None), (2, 4, "Outro", Some(90_500))]
    );
}

#[test]
fn extract_tracks_numbers_unpositioned_media_in_order() {
    let mut details = release("r");
    for medium in &mut details.media {
        medium.position = None;
        for track in &mut medium.tracks {
            track.position = None;
        }
    }
    let places: Vec<(u32, u32)> = extract_tracks(&details).iter().map(|t| (t.disc, t.position)).collect();
    assert_eq!(places, vec![(1, 1), (1, 2), (2, 1)]);
}

#[test]
fn classify_platform_by_domain() {
    assert_eq!(classify_platform("https://someband.bandcamp.com/album/x"), "Bandcamp");
    assert_eq!(classify_platform("https://www.youtube.com/@band"), "YouTube");
    assert_eq!(classify_platform("https://youtu.be/abc"), "YouTube");
    assert_eq!(classify_platform("https://x.com/band"), "Twitter");
    assert_eq!(classify_platform("https://music.apple.com/gb/artist/1"), "Apple Music");
    assert_eq!(classify_platform("https://en.wikipedia.org/wiki/Band"), "Wikipedia");
    assert_eq!(classify_platform("https://www.dropbox.com/s/x"), "Website");
    assert_eq!(classify_platform("not a url"), "Website");
}

#[test]
fn classify_platform_without_scheme() {
    assert_eq!(classify_platform("bandcamp.com/artist"), "Bandcamp");
    assert_eq!(classify_platform("www.instagram.com/foo"), "Instagram");
    assert_eq!(classify_platform("X.com/band"), "Twitter");
    assert_eq!(classify_platform("www.dropbox.com/s/x"), "Website");
}

#[test]
fn classify_platform_by_keyword_on_unknown_host() {
    assert_eq!(classify_platform("https://bandcamp.lowtide.net/shop"), "Bandcamp");
    assert_eq!(classify_platform("https://links.example/SoundCloud/lowtide"), "SoundCloud");
    assert_eq!(classify_platform("lowtide on spotify"), "Spotify");
}

// =========================================================================
// fetch_artist_data
// =========================================================================

#[tokio::test]
async fn search_failure_reports_and_stops() {
    let api = MockMetadata { search_fails: true, ..Default::default() };
    let result = fetch_artist_data(&api, "Low Tide").await;
    assert!(!result.success);
    assert!(result.data.is_none());
    assert!(!result.error.unwrap_or_default().is_empty());
    assert_eq!(api.calls(), vec!["search:Low Tide"]);
}

#[tokio::test]
async fn empty_search_is_a_failure() {
    let api = MockMetadata::default();
    let result = fetch_artist_data(&api, "Nobody").await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("No artist found for \"Nobody\""));
}

#[tokio::test]
async fn uses_first_hit_and_caps_releases() {
    let api = MockMetadata {
        hits: vec![summary("art-1", "Low Tide"), summary("art-2", "Low Tide (US)")],
        artist: Some(artist(14)),
        ..Default::default()
    };
    let result = fetch_artist_data(&api, "Low Tide").await;
    assert!(result.success);
    assert_eq!(result.error, None);
    let data = result.data.unwrap();
    assert_eq!(data.releases.len(), MAX_IMPORTED_RELEASES);
    assert_eq!(data.releases[0].tracks.len(), 3);

    let calls = api.calls();
    assert_eq!(calls[1], "artist:art-1");
    assert!(!calls.iter().any(|c| c == "release:rel-10"));
    assert_eq!(calls.iter().filter(|c| c.starts_with("coverart:")).count(), MAX_IMPORTED_RELEASES);
}

#[tokio::test]
async fn cover_art_failure_degrades_to_null() {
    let api = MockMetadata {
        hits: vec![summary("art-1", "Low Tide")],
        artist: Some(artist(2)),
        failing_cover: Some("rel-1".into()),
        ..Default::default()
    };
    let result = fetch_artist_data(&api, "Low Tide").await;
    assert!(result.success);
    let data = result.data.unwrap();
    assert_eq!(data.releases.len(), 2);
    assert_eq!(data.releases[0].cover_image.as_deref(), Some("https://img.example/rel-0-front.jpg"));
    assert_eq!(data.releases[1].id, "rel-1");
    assert_eq!(data.releases[1].cover_image, None);
}

#[tokio::test]
async fn release_failure_aborts_chain() {
    let api = MockMetadata {
        hits: vec![summary("art-1", "Low Tide")],
        artist: Some(artist(5)),
        failing_release: Some("rel-1".into()),
        ..Default::default()
    };
    let result = fetch_artist_data(&api, "Low Tide").await;
    assert!(!result.success);
    assert_eq!(result.data, None);
    assert_eq!(result.error.as_deref(), Some("HTTP error! status: 500"));
    assert!(!api.calls().iter().any(|c| c == "release:rel-2"));
}

#[tokio::test]
async fn serialized_failure_has_null_data() {
    let api = MockMetadata { search_fails: true, ..Default::default() };
    let json = serde_json::to_value(fetch_artist_data(&api, "x").await).unwrap();
    assert_eq!(json["success"], serde_json::json!(false));
    assert!(json["data"].is_null());
    assert!(json["error"].is_string());
}
