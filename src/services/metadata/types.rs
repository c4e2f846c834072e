//! Metadata wire types and the project-import document.
//!
//! The backend proxies a MusicBrainz-style API, so lookup payloads use its
//! kebab-case keys (`life-span`, `release-group`). Everything is optional or
//! defaulted; the backend passes upstream data through unfiltered. The
//! import document produced from them is camelCase for the page-builder
//! frontend.

use serde::{Deserialize, Serialize};

// =============================================================================
// SEARCH
// =============================================================================

/// One artist hit from `/artist/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
}

/// `/artist/search` answers either `{ "artists": [...] }` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Wrapped { artists: Vec<ArtistSummary> },
    Bare(Vec<ArtistSummary>),
}

impl SearchResponse {
    #[must_use]
    pub fn into_artists(self) -> Vec<ArtistSummary> {
        match self {
            Self::Wrapped { artists } | Self::Bare(artists) => artists,
        }
    }
}

// =============================================================================
// ARTIST
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeSpan {
    #[serde(default)]
    pub begin: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlResource {
    pub resource: String,
}

/// A relation from the artist to an external resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    #[serde(default, rename = "type")]
    pub relation_type: Option<String>,
    #[serde(default)]
    pub url: Option<UrlResource>,
}

/// Release stub listed on an artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseSummary {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `/artist/{id}` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(default, rename = "life-span")]
    pub life_span: Option<LifeSpan>,
    #[serde(default)]
    pub genres: Vec<Tag>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub releases: Vec<ReleaseSummary>,
}

// =============================================================================
// RELEASE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// 1-based position within its medium.
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub title: String,
    /// Duration in milliseconds.
    #[serde(default)]
    pub length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelInfo {
    #[serde(default)]
    pub label: Option<Label>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// `/release/{id}` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDetails {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub media: Vec<Medium>,
    #[serde(default, rename = "label-info")]
    pub label_info: Vec<LabelInfo>,
}

// =============================================================================
// COVER ART
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverImage {
    pub image: String,
    #[serde(default)]
    pub front: bool,
}

/// `/coverart/{id}` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverArt {
    #[serde(default)]
    pub images: Vec<CoverImage>,
}

impl CoverArt {
    /// The front image if one is flagged, else the first image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|image| image.front)
            .or_else(|| self.images.first())
            .map(|image| image.image.as_str())
    }
}

// =============================================================================
// PROJECT IMPORT DOCUMENT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistProfile {
    pub id: String,
    pub name: String,
    pub country: Option<String>,
    pub disambiguation: Option<String>,
    pub active_since: Option<String>,
    pub genres: Vec<String>,
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEntry {
    pub disc: u32,
    pub position: u32,
    pub title: String,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseEntry {
    pub id: String,
    pub title: String,
    pub release_date: Option<String>,
    pub label: Option<String>,
    pub cover_image: Option<String>,
    pub tracks: Vec<TrackEntry>,
}

/// Project-import document handed to the page builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub artist: ArtistProfile,
    pub releases: Vec<ReleaseEntry>,
}

/// Uniform outcome of [`super::import::fetch_artist_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<ProjectData>,
}

impl FetchResult {
    #[must_use]
    pub fn ok(data: ProjectData) -> Self {
        Self { success: true, error: None, data: Some(data) }
    }

    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, error: Some(error.into()), data: None }
    }
}
