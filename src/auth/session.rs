//! Session context: the single owner of the persisted bearer token.

use anyhow::Result;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use super::claims::{is_expired, mask};
use super::clock::{Clock, SystemClock};
use super::refresh::TokenRefresher;
use super::store::TokenStore;

/// Every read, write and refresh of the token goes through a `Session`.
///
/// The internal lock is held across a refresh, so requests that find the
/// token expired at the same moment wait for one refresh and reuse its
/// result instead of each starting their own.
pub struct Session {
    store: Box<dyn TokenStore>,
    clock: Box<dyn Clock>,
    lock: Mutex<()>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self::with_clock(store, SystemClock)
    }

    pub fn with_clock(store: impl TokenStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            store: Box::new(store),
            clock: Box::new(clock),
            lock: Mutex::new(()),
        }
    }

    /// Token to attach to the next outbound request, refreshing it first if
    /// it is expired.
    ///
    /// - no stored token: `None`
    /// - `exp > now`: the stored token, unchanged
    /// - refresh succeeds: the new token, persisted
    /// - refresh rejected with 401/403: the slot is cleared, `None`
    /// - any other refresh failure: the slot is left alone, `None`
    pub async fn bearer(&self, refresher: &dyn TokenRefresher) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;

        let Some(token) = self.store.load()? else {
            return Ok(None);
        };

        let now = self.clock.now_unix();
        if !is_expired(&token, now) {
            return Ok(Some(token));
        }

        debug!("Session token {} expired at or before {}, refreshing", mask(&token), now);

        match refresher.refresh().await {
            Ok(Some(fresh)) => {
                self.store.save(&fresh)?;
                info!("Session token refreshed: {}", mask(&fresh));
                Ok(Some(fresh))
            }
            Ok(None) => {
                warn!("Token refresh returned no token; sending request unauthenticated");
                Ok(None)
            }
            Err(e) if e.is_auth() => {
                warn!("Token refresh rejected ({}); discarding stored token", e);
                self.store.clear()?;
                Ok(None)
            }
            Err(e) => {
                warn!(
                    "Token refresh failed ({}); keeping stored token, sending request unauthenticated",
                    e
                );
                Ok(None)
            }
        }
    }

    /// The stored token, without any expiry handling.
    pub async fn token(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        self.store.load()
    }

    /// Replaces the stored token (login).
    pub async fn store_token(&self, token: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        debug!("Storing session token {}", mask(token));
        self.store.save(token)
    }

    /// Forgets the stored token (logout).
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.store.clear()
    }
}
