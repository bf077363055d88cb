use anyhow::Result;
use async_trait::async_trait;

use super::types::{Book, BookQuery, Envelope, OrderRef, Page};
use crate::http::ApiClient;

/// Book listing, search and deletion surface used by the list view.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookApi: Send + Sync {
    /// One page of books matching `query.key`.
    async fn list(&self, query: &BookQuery) -> Result<Page<Book>>;

    async fn get(&self, id: &str) -> Result<Book>;

    /// Orders that contain the book; a non-empty answer blocks deletion.
    async fn check_is_ordered(&self, id: &str) -> Result<Vec<OrderRef>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct BookClient {
    api: ApiClient,
}

impl BookClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl BookApi for BookClient {
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: &BookQuery) -> Result<Page<Book>> {
        self.api.get_with_query("books/", query).await
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Book> {
        let envelope: Envelope<Book> = self.api.get(&format!("books/{}", id)).await?;
        Ok(envelope.data)
    }

    #[tracing::instrument(skip(self))]
    async fn check_is_ordered(&self, id: &str) -> Result<Vec<OrderRef>> {
        let envelope: Envelope<Vec<OrderRef>> =
            self.api.get(&format!("orders/book/{}", id)).await?;
        Ok(envelope.data)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let _: serde_json::Value = self.api.delete(&format!("books/{}", id)).await?;
        Ok(())
    }
}
