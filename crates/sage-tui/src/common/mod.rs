//! Shared types used across features.

mod task;
mod text;

pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
pub use text::{sanitize_for_display, truncate_with_ellipsis, wrap_ranges};
