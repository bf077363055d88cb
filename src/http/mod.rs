//! HTTP client facade: base URL, default headers, session tokens and
//! response unwrapping for every backend call.

mod client;
mod error;
mod retry;

pub use client::{ApiClient, DEFAULT_API_URL, normalize_base_url};
pub(crate) use client::read_payload;
pub use error::ApiError;
pub use retry::{MAX_ATTEMPTS, RETRY_DELAY_MS, RetryPolicy};
