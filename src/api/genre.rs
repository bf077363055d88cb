use anyhow::Result;
use log::debug;
use serde::Serialize;

use super::types::{Envelope, Genre, Page, PageParams};
use crate::http::ApiClient;

#[derive(Serialize)]
struct NewGenre<'a> {
    name: &'a str,
}

/// `genres/` endpoints.
#[derive(Clone)]
pub struct GenreClient {
    api: ApiClient,
}

impl GenreClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Genre>> {
        debug!("Listing genres page {} (limit {})", page, limit);
        self.api
            .get_with_query("genres/", &PageParams { page, limit })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Genre> {
        let envelope: Envelope<Genre> = self.api.get(&format!("genres/slug/{}", slug)).await?;
        Ok(envelope.data)
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Genre> {
        let envelope: Envelope<Genre> = self.api.post("genres/", &NewGenre { name }).await?;
        Ok(envelope.data)
    }
}
