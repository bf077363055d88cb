//! `genres` and `publishers` subcommands.

use anyhow::{Context, Result};

use crate::api::{Genre, GenreClient, Page, Publisher, PublisherClient};

/// Default page size for the catalog listings.
pub const DEFAULT_LIMIT: u32 = 20;

#[tracing::instrument(skip(client))]
pub async fn list_genres(client: &GenreClient, page: u32, limit: u32) -> Result<()> {
    let genres = client
        .list(page.max(1), limit.max(1))
        .await
        .context("Failed to list genres")?;
    print!("{}", render_genres(&genres, page.max(1)));
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn show_genre(client: &GenreClient, slug: &str) -> Result<()> {
    let genre = client
        .get_by_slug(slug)
        .await
        .with_context(|| format!("Failed to fetch genre {}", slug))?;
    println!("Name: {}", genre.name);
    println!("Slug: {}", genre.slug);
    println!("ID:   {}", genre.id);
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn create_genre(client: &GenreClient, name: &str) -> Result<()> {
    let genre = client
        .create(name)
        .await
        .with_context(|| format!("Failed to create genre {}", name))?;
    println!("Created genre {} ({})", genre.name, genre.id);
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn list_publishers(client: &PublisherClient, page: u32, limit: u32) -> Result<()> {
    let publishers = client
        .list(page.max(1), limit.max(1))
        .await
        .context("Failed to list publishers")?;
    print!("{}", render_publishers(&publishers, page.max(1)));
    Ok(())
}

#[tracing::instrument(skip(client))]
pub async fn create_publisher(client: &PublisherClient, name: &str) -> Result<()> {
    let publisher = client
        .create(name)
        .await
        .with_context(|| format!("Failed to create publisher {}", name))?;
    println!("Created publisher {} ({})", publisher.name, publisher.id);
    Ok(())
}

fn page_footer(out: &mut String, page: u32, total_page: u32) {
    if total_page > 1 {
        out.push_str(&format!("Page {} of {}.\n", page, total_page));
    }
}

pub(crate) fn render_genres(genres: &Page<Genre>, page: u32) -> String {
    if genres.data.is_empty() {
        return "No genres found.\n".to_string();
    }
    let mut out = String::new();
    for genre in &genres.data {
        out.push_str(&format!("{:<24}  {:<24}  {}\n", genre.name, genre.slug, genre.id));
    }
    page_footer(&mut out, page, genres.pagination.total_page);
    out
}

pub(crate) fn render_publishers(publishers: &Page<Publisher>, page: u32) -> String {
    if publishers.data.is_empty() {
        return "No publishers found.\n".to_string();
    }
    let mut out = String::new();
    for publisher in &publishers.data {
        out.push_str(&format!("{:<32}  {}\n", publisher.name, publisher.id));
    }
    page_footer(&mut out, page, publishers.pagination.total_page);
    out
}
