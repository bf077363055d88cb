//! Command handlers behind the `bookstore-admin` binary.
//!
//! Each handler takes already-built clients so it can be exercised against a
//! mock backend; [`Services`] wires the real ones from a [`Config`].

mod books;
mod catalog;
pub mod config;
mod services;
mod session;

pub use books::{delete as delete_book, list as list_books};
pub use catalog::{
    DEFAULT_LIMIT, create_genre, create_publisher, list_genres, list_publishers, show_genre,
};
pub use config::Config;
pub use services::{Services, build_api_client, build_session};
pub use session::{login, logout};
