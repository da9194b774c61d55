//! Entity records - the five forum entities and their persistence
//!
//! Each entity carries `id: Option<i64>`: `None` while unsaved, `Some`
//! once the store has assigned an identifier. `save` is the only place
//! that branches on it (insert when unsaved, update when saved).
//!
//! Rows are projected into records by column name, so joined queries that
//! alias their columns to the entity's names reuse the same projection.

pub mod user;
pub mod question;
pub mod reply;
pub mod follower;
pub mod like;

pub use user::{Karma, User};
pub use question::Question;
pub use reply::Reply;
pub use follower::QuestionFollower;
pub use like::QuestionLike;

use rusqlite::{OptionalExtension, Params, Row};
use crate::storage::SqliteStore;
use crate::Result;

/// Run a statement and project every returned row, in store order.
pub(crate) fn query_all<T, P, F>(store: &SqliteStore, sql: &str, params: P, project: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = store.conn().prepare(sql)?;
    let rows = stmt
        .query_map(params, project)?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    Ok(rows)
}

/// Run a single-row lookup; zero matching rows is `Ok(None)`.
pub(crate) fn query_one<T, P, F>(store: &SqliteStore, sql: &str, params: P, project: F) -> Result<Option<T>>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
{
    store
        .conn()
        .query_row(sql, params, project)
        .optional()
        .map_err(Into::into)
}

/// SQLite `LIMIT` value for a row count; counts past `i64::MAX` saturate
pub(crate) fn limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}


#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    pub fn user(store: &SqliteStore, fname: &str, lname: &str) -> User {
        let mut user = User::new(fname, lname);
        user.save(store).unwrap();
        user
    }

    pub fn question(store: &SqliteStore, author: &User, title: &str) -> Question {
        let mut question = Question::new(title, "body text", author.id.unwrap());
        question.save(store).unwrap();
        question
    }

    pub fn reply(store: &SqliteStore, question: &Question, author: &User, parent: Option<&Reply>) -> Reply {
        let mut reply = Reply::new(
            "reply text",
            question.id.unwrap(),
            author.id.unwrap(),
            parent.and_then(|p| p.id),
        );
        reply.save(store).unwrap();
        reply
    }

    pub fn follow(store: &SqliteStore, user: &User, question: &Question) {
        QuestionFollower::new(user.id.unwrap(), question.id.unwrap())
            .save(store)
            .unwrap();
    }

    pub fn like(store: &SqliteStore, user: &User, question: &Question) {
        QuestionLike::new(user.id.unwrap(), question.id.unwrap())
            .save(store)
            .unwrap();
    }
}
