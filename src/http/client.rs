//! Authenticated HTTP client facade for the bookstore backend.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use log::debug;
use reqwest::{
    Client, Method, RequestBuilder, Response, Url,
    cookie::Jar,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use super::{ApiError, RetryPolicy};
use crate::auth::{HttpRefresher, Session, TokenRefresher};

/// API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1/";

const USER_AGENT: &str = concat!("bookstore-admin/", env!("BOOKSTORE_ADMIN_VERSION"));

/// Every outbound call goes through `ApiClient`.
///
/// Before a request leaves, the [`Session`] decides which bearer token (if
/// any) to attach, refreshing an expired one through the [`TokenRefresher`].
/// Responses are unwrapped to their JSON payload; non-2xx statuses come
/// back as [`ApiError`] inside the `anyhow::Error`.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<Session>,
    refresher: Arc<dyn TokenRefresher>,
}

impl ApiClient {
    /// Builds the facade and its refresh client, sharing one cookie jar.
    pub fn new(base_url: &str, session: Arc<Session>, refresh_policy: RetryPolicy) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let jar = Arc::new(Jar::default());

        let client = build_client(jar.clone())?;
        let refresher = HttpRefresher::new(build_client(jar)?, &base_url, refresh_policy)?;

        Ok(Self::with_refresher(
            client,
            base_url,
            session,
            Arc::new(refresher),
        ))
    }

    pub fn with_refresher(
        client: Client,
        base_url: Url,
        session: Arc<Session>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        Self {
            client,
            base_url,
            session,
            refresher,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Resolves `path` against the API root. Each `/`-separated segment is
    /// percent-encoded on its own; a trailing `/` is kept.
    pub fn url(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API URL {} cannot carry a path", self.base_url))?
            .pop_if_empty()
            .extend(path.trim_start_matches('/').split('/'));
        Ok(url)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, |request| request).await
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Method::GET, path, |request| request.query(query))
            .await
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, |request| request.json(body))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, |request| request).await
    }

    async fn send<T, F>(&self, method: Method, path: &str, customize: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        let mut request = customize(self.client.request(method.clone(), url.clone()));

        match self.session.bearer(self.refresher.as_ref()).await? {
            Some(token) => request = request.header(AUTHORIZATION, bearer_header(&token)?),
            None => debug!("No usable session token; {} {} goes out unauthenticated", method, url),
        }

        debug!("{} {}", method, url);
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        Ok(read_payload(response).await?)
    }
}

/// Unwraps a response to its JSON payload. An empty body reads as `null`.
pub(crate) async fn read_payload<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;

    if !status.is_success() {
        return Err(ApiError::from_status(
            status,
            &String::from_utf8_lossy(&body),
        ));
    }

    let payload: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &body[..]
    };
    serde_json::from_slice(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .context("Session token is not a valid header value")?;
    value.set_sensitive(true);
    Ok(value)
}

fn build_client(jar: Arc<Jar>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .cookie_provider(jar)
        .build()?)
}

/// Parses the API root and makes sure its path ends with `/`.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid API URL: {}", raw))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Invalid API URL: {}", raw);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
