//! Core library for the Sage chat client.
//!
//! Configuration, the backend API client, attachment validation, message
//! markup, durable preferences and logging setup. No UI code lives here.

pub mod api;
pub mod attachment;
pub mod config;
pub mod logging;
pub mod markup;
pub mod message;
pub mod prefs;
