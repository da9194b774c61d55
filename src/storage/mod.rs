//! Storage Layer - SQLite-backed store access
//!
//! System of record is SQLite with tables:
//! - users(id, fname, lname)
//! - questions(id, title, body, user_id)
//! - replies(id, body, question_id, user_id, reply_id)
//! - question_followers(id, user_id, question_id)
//! - question_likes(id, user_id, question_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
