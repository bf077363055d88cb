use anyhow::{Result, bail};
use log::info;
use serde::{Deserialize, Serialize};

use crate::http::ApiClient;

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Login and logout: the two places besides refresh that write the token slot.
#[derive(Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// POSTs the credentials to `auth/login` and stores the returned token.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let response: LoginResponse = self
            .api
            .post("auth/login", &Credentials { email, password })
            .await?;

        let Some(token) = response.token.filter(|t| !t.trim().is_empty()) else {
            bail!("Login succeeded but the server returned no token");
        };

        self.api.session().store_token(&token).await?;
        info!("Logged in as {}", email);
        Ok(())
    }

    /// Forgets the stored token. The backend is not contacted.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.api.session().clear().await
    }
}
