//! Artist import: chain the metadata lookups into a project-import document.
//!
//! DESIGN
//! ======
//! search → details of the first hit → up to [`MAX_IMPORTED_RELEASES`]
//! releases, each with its details and cover art → [`ProjectData`].
//! The chain is sequential where each step needs the previous one; a
//! release's details and cover art are fetched together.
//!
//! ERROR HANDLING
//! ==============
//! Any failure aborts the chain and comes back as a failed [`FetchResult`],
//! never as an `Err`. Cover art is the exception: a failed lookup only leaves
//! that release without an image.

#[cfg(test)]
#[path = "import_test.rs"]
mod import_test;

use tracing::{info, warn};

use super::MetadataApi;
use super::types::{
    ArtistDetails, ArtistProfile, CoverArt, FetchResult, ProjectData, ReleaseDetails, ReleaseEntry, SocialLink,
    TrackEntry,
};
use crate::services::http::ServiceError;

/// Releases imported per artist; the rest are left out of the document.
pub const MAX_IMPORTED_RELEASES: usize = 10;

/// Domain → platform name. A URL matches a domain or any of its subdomains.
const PLATFORMS: &[(&str, &str)] = &[
    ("bandcamp.com", "Bandcamp"),
    ("spotify.com", "Spotify"),
    ("soundcloud.com", "SoundCloud"),
    ("youtube.com", "YouTube"),
    ("youtu.be", "YouTube"),
    ("instagram.com", "Instagram"),
    ("twitter.com", "Twitter"),
    ("x.com", "Twitter"),
    ("facebook.com", "Facebook"),
    ("tiktok.com", "TikTok"),
    ("music.apple.com", "Apple Music"),
    ("itunes.apple.com", "Apple Music"),
    ("discogs.com", "Discogs"),
    ("wikipedia.org", "Wikipedia"),
];

/// Keyword → platform name, for URLs whose host is not in [`PLATFORMS`].
const PLATFORM_KEYWORDS: &[(&str, &str)] = &[
    ("bandcamp", "Bandcamp"),
    ("spotify", "Spotify"),
    ("soundcloud", "SoundCloud"),
    ("youtube", "YouTube"),
    ("youtu.be", "YouTube"),
    ("instagram", "Instagram"),
    ("twitter", "Twitter"),
    ("facebook", "Facebook"),
    ("tiktok", "TikTok"),
    ("music.apple", "Apple Music"),
    ("itunes.apple", "Apple Music"),
    ("discogs", "Discogs"),
    ("wikipedia", "Wikipedia"),
];

/// A release's details together with its cover art, if any was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseBundle {
    pub details: ReleaseDetails,
    pub cover_art: Option<CoverArt>,
}

/// Build the project-import document for the artist best matching `name`.
pub async fn fetch_artist_data(api: &(impl MetadataApi + ?Sized), name: &str) -> FetchResult {
    match import_artist(api, name).await {
        Ok(data) => {
            info!(artist = %data.artist.name, releases = data.releases.len(), "artist import complete");
            FetchResult::ok(data)
        }
        Err(e) => {
            warn!(query = %name, error = %e, "artist import failed");
            FetchResult::failed(e.to_string())
        }
    }
}

async fn import_artist(api: &(impl MetadataApi + ?Sized), name: &str) -> Result<ProjectData, ServiceError> {
    let hits = api.search_artist(name).await?;
    let Some(best) = hits.into_iter().next() else {
        return Err(ServiceError::NotFound(format!("No artist found for \"{name}\"")));
    };

    let artist = api.get_artist_details(&best.id).await?;

    let mut bundles = Vec::new();
    for release in artist.releases.iter().take(MAX_IMPORTED_RELEASES) {
        let (details, cover_art) =
            tokio::join!(api.get_release_details(&release.id), api.get_cover_art(&release.id));
        let cover_art = match cover_art {
            Ok(art) => Some(art),
            Err(e) => {
                warn!(release_id = %release.id, error = %e, "cover art unavailable");
                None
            }
        };
        bundles.push(ReleaseBundle { details: details?, cover_art });
    }

    Ok(transform_to_project_data(&artist, &bundles))
}

/// Reshape fetched metadata into the project-import document.
#[must_use]
pub fn transform_to_project_data(artist: &ArtistDetails, releases: &[ReleaseBundle]) -> ProjectData {
    let genre_source = if artist.genres.is_empty() { &artist.tags } else { &artist.genres };
    let genres = genre_source.iter().map(|tag| tag.name.clone()).collect();

    let social_links = artist
        .relations
        .iter()
        .filter_map(|relation| relation.url.as_ref())
        .map(|url| SocialLink { platform: classify_platform(&url.resource).to_owned(), url: url.resource.clone() })
        .collect();

    ProjectData {
        artist: ArtistProfile {
            id: artist.id.clone(),
            name: artist.name.clone(),
            country: artist.country.clone(),
            disambiguation: artist.disambiguation.clone().filter(|d| !d.is_empty()),
            active_since: artist.life_span.as_ref().and_then(|span| span.begin.clone()),
            genres,
            social_links,
        },
        releases: releases.iter().map(release_entry).collect(),
    }
}

fn release_entry(bundle: &ReleaseBundle) -> ReleaseEntry {
    let details = &bundle.details;
    ReleaseEntry {
        id: details.id.clone(),
        title: details.title.clone(),
        release_date: details.date.clone(),
        label: details
            .label_info
            .iter()
            .find_map(|info| info.label.as_ref().map(|label| label.name.clone())),
        cover_image: bundle
            .cover_art
            .as_ref()
            .and_then(CoverArt::primary_image)
            .map(str::to_owned),
        tracks: extract_tracks(details),
    }
}

/// Flatten every medium's tracks in order.
///
/// Upstream disc and track positions are kept; a missing one falls back to
/// its 1-based place in the listing.
#[must_use]
pub fn extract_tracks(release: &ReleaseDetails) -> Vec<TrackEntry> {
    release
        .media
        .iter()
        .zip(1u32..)
        .flat_map(|(medium, listed_disc)| {
            let disc = medium.position.unwrap_or(listed_disc);
            medium.tracks.iter().zip(1u32..).map(move |(track, listed)| TrackEntry {
                disc,
                position: track.position.unwrap_or(listed),
                title: track.title.clone(),
                duration_ms: track.length,
            })
        })
        .collect()
}

/// Platform name for a social/profile URL.
///
/// The host is matched against the platform domains first; URLs without a scheme are
/// read as `https`. Otherwise any URL containing a platform keyword counts
/// for that platform, and everything else is a "Website".
#[must_use]
pub fn classify_platform(url: &str) -> &'static str {
    let lowered = url.trim().to_ascii_lowercase();
    let by_host = host_of(&lowered).and_then(|host| {
        PLATFORMS
            .iter()
            .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{domain}")))
    });
    by_host
        .or_else(|| PLATFORM_KEYWORDS.iter().find(|(keyword, _)| lowered.contains(keyword)))
        .map_or("Website", |&(_, platform)| platform)
}

fn host_of(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url)
        .ok()
        .filter(reqwest::Url::has_host)
        .or_else(|| reqwest::Url::parse(&format!("https://{url}")).ok())?;
    parsed.host_str().map(str::to_owned)
}
