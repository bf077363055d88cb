//! Wire types shared by the resource clients.

use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper the backend puts around single records.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total_page: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One page of records plus the backend's page count.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Embedded reference such as a book's author or genre.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct NamedRef {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub author: Option<NamedRef>,
    #[serde(default)]
    pub genre: Option<NamedRef>,
    #[serde(default)]
    pub publisher: Option<NamedRef>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub price: f64,
    /// Percent off the list price.
    #[serde(default)]
    pub discount: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Publisher {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// An order that contains a given book. Only its existence matters here.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct OrderRef {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

/// `page` / `limit` query for the plain paginated listings.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub limit: u32,
}

/// `sortByDate` value. The admin listing only ever asks for newest first.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Desc,
}

/// Query of the book listing / search endpoint.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    pub key: String,
    pub page: u32,
    pub limit: u32,
    pub sort_by_date: SortOrder,
}

impl BookQuery {
    /// Newest first, the order the admin listing always uses.
    pub fn newest(key: impl Into<String>, page: u32, limit: u32) -> Self {
        Self {
            key: key.into(),
            page,
            limit,
            sort_by_date: SortOrder::Desc,
        }
    }
}
