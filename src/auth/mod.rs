//! Session handling: the persisted bearer token, its expiry and its refresh.

pub mod claims;
mod clock;
mod refresh;
mod session;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use refresh::{HttpRefresher, REFRESH_PATH, TokenRefresher};
pub use session::Session;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(test)]
pub use refresh::MockTokenRefresher;
#[cfg(test)]
pub use store::MockTokenStore;
