//! Effect handlers for the TUI runtime.
//!
//! These functions perform the backend round-trips and file I/O. They do
//! NOT mutate state: each is a pure async function that returns the
//! `UiEvent` the runtime wraps in `TaskCompleted` and sends to the inbox.
//! Failures are logged here; the events only say that something failed.

pub mod chat;
pub mod files;
pub mod sessions;

pub use chat::*;
pub use files::*;
pub use sessions::*;
