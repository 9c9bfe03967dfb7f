//! Feature slices. Each owns its state, reducer helpers and drawing.

pub mod attachment;
pub mod chrome;
pub mod input;
pub mod sessions;
pub mod transcript;
