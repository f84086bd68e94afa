//! Screen state for the read-mostly screens.
//!
//! A view owns the data one screen shows and the last error message. Loading
//! and actions are `async` methods taking the [`ApiClient`](crate::api::ApiClient).

mod explore;
mod my_petitions;
mod petition;

pub use explore::*;
pub use my_petitions::*;
pub use petition::*;

/// The single error line shown on a screen. A new message replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    message: Option<String>,
}

impl Banner {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Replace the message, or clear it when there is nothing to show.
    pub fn show(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}
