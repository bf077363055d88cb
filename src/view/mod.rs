//! List view: the state behind the admin book table and the commands that
//! change it.

mod book_list;
mod format;
mod notifier;

pub use book_list::{BookList, BookListState, DeleteOutcome, DeletionTarget, PAGE_SIZE};
pub use format::format_price;
pub use notifier::{ConsoleNotifier, Notice, Notifier};

#[cfg(test)]
pub use notifier::MockNotifier;
