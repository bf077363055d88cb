//! Resource clients: one per backend resource, each a thin mapping from a
//! function to an HTTP verb, a path and where its parameters go.

mod auth;
mod book;
mod genre;
mod publisher;
pub mod types;

pub use auth::AuthClient;
pub use book::{BookApi, BookClient};
pub use genre::GenreClient;
pub use publisher::PublisherClient;
pub use types::{Book, BookQuery, Genre, OrderRef, Page, Pagination, Publisher, SortOrder};

#[cfg(test)]
pub use book::MockBookApi;
