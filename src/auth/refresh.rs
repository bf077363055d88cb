//! The dedicated token refresh call.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::http::{ApiError, RetryPolicy, read_payload};

/// Backend path of the refresh endpoint, relative to the API root.
pub const REFRESH_PATH: &str = "auth/refresh-token";

/// Exchanges the current session for a new bearer token.
///
/// `Ok(None)` means the backend answered successfully but handed out no token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self) -> Result<Option<String>, ApiError>;
}

#[derive(Deserialize)]
struct RefreshResponse {
    token: Option<String>,
}

/// POSTs to [`REFRESH_PATH`] with no body and no stored token attached.
///
/// The client passed in must not carry an Authorization default header; it
/// should share the facade's cookie jar so the refresh cookie set at login
/// is presented.
pub struct HttpRefresher {
    client: Client,
    url: Url,
    policy: RetryPolicy,
}

impl HttpRefresher {
    pub fn new(client: Client, base_url: &Url, policy: RetryPolicy) -> anyhow::Result<Self> {
        let url = base_url.join(REFRESH_PATH)?;
        Ok(Self {
            client,
            url,
            policy,
        })
    }

    async fn refresh_once(&self) -> Result<Option<String>, ApiError> {
        debug!("POST {}", self.url);
        let response = self
            .client
            .post(self.url.clone())
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let body: Option<RefreshResponse> = read_payload(response).await?;
        Ok(body
            .and_then(|b| b.token)
            .filter(|token| !token.trim().is_empty()))
    }
}

#[async_trait]
impl TokenRefresher for HttpRefresher {
    #[tracing::instrument(skip(self))]
    async fn refresh(&self) -> Result<Option<String>, ApiError> {
        self.policy
            .run("Refresh token", || self.refresh_once())
            .await
    }
}
