use anyhow::Result;
use serde::Serialize;

use super::types::{Envelope, Page, PageParams, Publisher};
use crate::http::ApiClient;

#[derive(Serialize)]
struct NewPublisher<'a> {
    name: &'a str,
}

/// `publishers/` endpoints.
#[derive(Clone)]
pub struct PublisherClient {
    api: ApiClient,
}

impl PublisherClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, page: u32, limit: u32) -> Result<Page<Publisher>> {
        self.api
            .get_with_query("publishers/", &PageParams { page, limit })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Publisher> {
        let envelope: Envelope<Publisher> =
            self.api.post("publishers/", &NewPublisher { name }).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryTokenStore, Session};
    use crate::http::RetryPolicy;
    use mockito::{Matcher, Server};
    use std::sync::Arc;

    fn client(server: &Server) -> PublisherClient {
        let session = Arc::new(Session::new(MemoryTokenStore::new()));
        let api = ApiClient::new(&server.url(), session, RetryPolicy::none()).unwrap();
        PublisherClient::new(api)
    }

    #[tokio::test]
    async fn test_list() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/publishers/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "3".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"data": [{"_id": "p1", "name": "Kim Đồng"}, {"_id": "p2", "name": "Trẻ"}],
                    "pagination": {"totalPage": 4}}"#,
            )
            .create_async()
            .await;

        let page = client(&server).list(3, 10).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.pagination.total_page, 4);
    }

    #[tokio::test]
    async fn test_create() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/publishers/")
            .match_body(Matcher::Json(serde_json::json!({"name": "Trẻ"})))
            .with_status(201)
            .with_body(r#"{"data": {"_id": "p2", "name": "Trẻ"}}"#)
            .create_async()
            .await;

        let publisher = client(&server).create("Trẻ").await.unwrap();

        mock.assert_async().await;
        assert_eq!(publisher.id, "p2");
    }

    #[tokio::test]
    async fn test_create_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/publishers/")
            .with_status(409)
            .with_body(r#"{"message": "Publisher exists"}"#)
            .create_async()
            .await;

        let err = client(&server).create("Trẻ").await.unwrap_err();
        assert!(err.to_string().contains("Publisher exists"));
    }
}
