use std::sync::Arc;

use anyhow::{Context, Result, bail};
use log::debug;

use crate::{
    api::{Book, BookApi},
    runtime::Runtime,
    view::{BookList, BookListState, DeleteOutcome, Notifier, format_price},
};

/// Print one page of books, newest first, optionally filtered by `search`
#[tracing::instrument(skip(api, notifier))]
pub async fn list<A: BookApi + 'static>(
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    page: u32,
    search: Option<String>,
) -> Result<()> {
    let state = fetch_page(api, notifier, page, search).await?;
    print!("{}", render_books(&state));
    Ok(())
}

async fn fetch_page<A: BookApi + 'static>(
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    page: u32,
    search: Option<String>,
) -> Result<BookListState> {
    let key = search.map(|s| s.trim().to_string()).unwrap_or_default();
    let mut view = BookList::with_state(
        api,
        notifier,
        BookListState {
            page: page.max(1),
            key: key.clone(),
            search_input: key,
            ..Default::default()
        },
    );

    view.load();
    view.settle().await;

    let state = view.snapshot();
    if let Some(err) = &state.load_error {
        bail!("Failed to fetch books: {}", err);
    }
    debug!(
        "Fetched {} book(s), page {}/{}",
        state.books.len(),
        state.page,
        state.total_page
    );
    Ok(state)
}

/// Delete a book after confirmation, unless it appears in an order
#[tracing::instrument(skip(runtime, api, notifier))]
pub async fn delete<R: Runtime, A: BookApi + 'static>(
    runtime: &R,
    api: Arc<A>,
    notifier: Arc<dyn Notifier>,
    id: &str,
    yes: bool,
) -> Result<()> {
    let book = api
        .get(id)
        .await
        .with_context(|| format!("Failed to fetch book {}", id))?;

    let view = BookList::new(api, notifier);
    view.request_delete(&book.id, &book.name);

    if !yes {
        print!("{}", render_target(&book));
        if !runtime.confirm(&format!("Delete \"{}\"?", book.name))? {
            view.cancel_delete();
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    match view.confirm_delete().await {
        DeleteOutcome::Failed => bail!("Failed to delete book {}", book.id),
        outcome => {
            debug!("Delete of {} finished: {:?}", book.id, outcome);
            Ok(())
        }
    }
}

/// `Name - Author`, or just the name when the author is unknown.
fn title(book: &Book) -> String {
    match &book.author {
        Some(author) => format!("{} - {}", book.name, author.name),
        None => book.name.clone(),
    }
}

/// `Publisher - Year`, leaving out whichever part is missing.
fn imprint(book: &Book) -> String {
    let publisher = book.publisher.as_ref().map(|p| p.name.as_str());
    match (publisher, book.year) {
        (Some(name), Some(year)) => format!("{} - {}", name, year),
        (Some(name), None) => name.to_string(),
        (None, Some(year)) => year.to_string(),
        (None, None) => "-".to_string(),
    }
}

pub(crate) fn render_books(state: &BookListState) -> String {
    if state.books.is_empty() {
        return if state.key.is_empty() {
            "No books found.\n".to_string()
        } else {
            format!("No books match \"{}\".\n", state.key)
        };
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<40}  {:<16}  {:<24}  {:>14}  {:>8}  ID\n",
        "#", "Book", "Genre", "Publisher", "Price", "Discount"
    ));
    for (index, book) in state.books.iter().enumerate() {
        let genre = book.genre.as_ref().map_or("-", |g| g.name.as_str());
        out.push_str(&format!(
            "{:>4}  {:<40}  {:<16}  {:<24}  {:>14}  {:>7}%  {}\n",
            state.row_number(index),
            title(book),
            genre,
            imprint(book),
            format_price(book.price),
            book.discount,
            book.id
        ));
    }
    if state.show_pagination() {
        out.push_str(&format!(
            "Page {} of {}. Use --page to see more.\n",
            state.page, state.total_page
        ));
    }
    out
}

fn render_target(book: &Book) -> String {
    format!(
        "Book:      {}\nPublisher: {}\nPrice:     {}\nID:        {}\n",
        title(book),
        imprint(book),
        format_price(book.price),
        book.id
    )
}
