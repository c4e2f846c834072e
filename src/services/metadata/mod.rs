//! Artist/music metadata client.
//!
//! DESIGN
//! ======
//! `MetadataApi` is the seam between the import orchestration and the
//! network: `MetadataClient` implements it over HTTP, tests implement it
//! with canned data. Each method is one request against the backend proxy.

pub mod import;
pub mod types;

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::services::http::{BackendClient, ServiceError};
use types::{ArtistDetails, ArtistSummary, CoverArt, ReleaseDetails, SearchResponse};

/// The four metadata lookups the import chain needs.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// `GET /artist/search?query=`
    async fn search_artist(&self, query: &str) -> Result<Vec<ArtistSummary>, ServiceError>;

    /// `GET /artist/{id}`
    async fn get_artist_details(&self, artist_id: &str) -> Result<ArtistDetails, ServiceError>;

    /// `GET /release/{id}`
    async fn get_release_details(&self, release_id: &str) -> Result<ReleaseDetails, ServiceError>;

    /// `GET /coverart/{id}`
    async fn get_cover_art(&self, release_id: &str) -> Result<CoverArt, ServiceError>;
}

/// HTTP implementation of [`MetadataApi`].
#[derive(Debug, Clone)]
pub struct MetadataClient {
    backend: BackendClient,
}

impl MetadataClient {
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, ServiceError> {
        Ok(Self { backend: BackendClient::new(&config.metadata_api_url, config.timeouts)? })
    }
}

#[async_trait]
impl MetadataApi for MetadataClient {
    async fn search_artist(&self, query: &str) -> Result<Vec<ArtistSummary>, ServiceError> {
        let response: SearchResponse = self
            .backend
            .get_json(&["artist", "search"], &[("query", query)])
            .await?;
        Ok(response.into_artists())
    }

    async fn get_artist_details(&self, artist_id: &str) -> Result<ArtistDetails, ServiceError> {
        self.backend.get_json(&["artist", artist_id], &[]).await
    }

    async fn get_release_details(&self, release_id: &str) -> Result<ReleaseDetails, ServiceError> {
        self.backend.get_json(&["release", release_id], &[]).await
    }

    async fn get_cover_art(&self, release_id: &str) -> Result<CoverArt, ServiceError> {
        self.backend.get_json(&["coverart", release_id], &[]).await
    }
}
