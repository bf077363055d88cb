//! Service factory for building the clients a command needs.
//!
//! Construction is kept apart from [`Config`]: configuration says where the
//! API and the session file live, services are what talk to them.

use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::{
    api::{AuthClient, BookClient, GenreClient, PublisherClient},
    auth::{FileTokenStore, Session},
    http::ApiClient,
    runtime::Runtime,
};

use super::config::Config;

/// Build the session backed by the configured session file
pub fn build_session<R: Runtime + 'static>(runtime: R, config: &Config) -> Session {
    debug!("Session file: {:?}", config.session_file);
    Session::new(FileTokenStore::new(runtime, config.session_file.clone()))
}

/// Build the HTTP client facade from configuration
pub fn build_api_client(session: Arc<Session>, config: &Config) -> Result<ApiClient> {
    ApiClient::new(&config.api_url, session, config.refresh_policy)
}

/// Every resource client, sharing one facade and therefore one session.
pub struct Services {
    pub auth: AuthClient,
    pub books: Arc<BookClient>,
    pub genres: GenreClient,
    pub publishers: PublisherClient,
}

impl Services {
    pub fn new<R: Runtime + 'static>(runtime: R, config: &Config) -> Result<Self> {
        let session = Arc::new(build_session(runtime, config));
        Ok(Self::from_api(build_api_client(session, config)?))
    }

    pub fn from_api(api: ApiClient) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            books: Arc::new(BookClient::new(api.clone())),
            genres: GenreClient::new(api.clone()),
            publishers: PublisherClient::new(api),
        }
    }
}
