//! User-facing notifications raised by the list view.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Short-lived confirmation of a completed action.
    Success(String),
    /// Business rule rejection; not a system failure.
    Error(String),
    /// Unexpected failure the user has to acknowledge.
    Alert(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "{}", msg),
            Notice::Error(msg) => write!(f, "Error: {}", msg),
            Notice::Alert(msg) => write!(f, "!! {}", msg),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Success goes to stdout, errors and alerts to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(_) => println!("{}", notice),
            Notice::Error(_) | Notice::Alert(_) => eprintln!("{}", notice),
        }
    }
}
