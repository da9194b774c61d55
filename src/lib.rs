//! # qaforum - Q&A forum data-access layer
//!
//! Maps a small relational schema onto in-memory entities:
//! - `User`, `Question`, `Reply` (self-referential reply trees)
//! - `QuestionFollower`, `QuestionLike` join entities
//! - identity-based create/update dispatch (`save`)
//! - relationship traversal and aggregate/ranking queries
//!
//! Every operation takes the store explicitly and is a single round trip;
//! nothing is cached between calls.

pub mod storage;
pub mod model;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use model::{Karma, Question, QuestionFollower, QuestionLike, Reply, User};
pub use storage::SqliteStore;

/// Result type alias for qaforum operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for qaforum operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{table} row already saved with id {id}")]
    AlreadyPersisted { table: &'static str, id: i64 },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
