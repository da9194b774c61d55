//! Replies - answers to a question, optionally nested under another reply
//!
//! `reply_id` links a reply to its parent. Replies with no parent are
//! top-level answers, so each question owns a forest of reply trees.
//! Cycles are left to the store schema.

use rusqlite::{params, Row};
use serde::Serialize;
use crate::{Error, Result};
use crate::storage::SqliteStore;
use super::{query_all, query_one, Question, User};

/// A reply to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub id: Option<i64>,
    pub body: String,
    pub question_id: i64,
    /// Author (`users.id`)
    pub user_id: i64,
    /// Parent reply, `None` for a top-level reply
    pub reply_id: Option<i64>,
}

impl Reply {
    /// Build an unsaved reply
    pub fn new(body: impl Into<String>, question_id: i64, user_id: i64, reply_id: Option<i64>) -> Self {
        Self {
            id: None,
            body: body.into(),
            question_id,
            user_id,
            reply_id,
        }
    }

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            body: row.get("body")?,
            question_id: row.get("question_id")?,
            user_id: row.get("user_id")?,
            reply_id: row.get("reply_id")?,
        })
    }

    pub fn is_top_level(&self) -> bool {
        self.reply_id.is_none()
    }

    // ========== Persistence ==========

    pub fn find_all(store: &SqliteStore) -> Result<Vec<Reply>> {
        query_all(
            store,
            "SELECT id, body, question_id, user_id, reply_id FROM replies",
            [],
            Reply::from_row,
        )
    }

    pub fn find_by_id(store: &SqliteStore, id: i64) -> Result<Option<Reply>> {
        tracing::trace!(id, "replies lookup");
        query_one(
            store,
            "SELECT id, body, question_id, user_id, reply_id FROM replies WHERE id = ?1",
            [id],
            Reply::from_row,
        )
    }

    pub fn find_by_author_id(store: &SqliteStore, user_id: i64) -> Result<Vec<Reply>> {
        query_all(
            store,
            "SELECT id, body, question_id, user_id, reply_id FROM replies WHERE user_id = ?1",
            [user_id],
            Reply::from_row,
        )
    }

    pub fn find_by_question_id(store: &SqliteStore, question_id: i64) -> Result<Vec<Reply>> {
        query_all(
            store,
            "SELECT id, body, question_id, user_id, reply_id FROM replies WHERE question_id = ?1",
            [question_id],
            Reply::from_row,
        )
    }

    /// Insert this reply and capture the generated id.
    ///
    /// Fails without touching the store if the reply is already saved.
    pub fn create(&mut self, store: &SqliteStore) -> Result<i64> {
        if let Some(id) = self.id {
            return Err(Error::AlreadyPersisted { table: "replies", id });
        }

        store.conn().execute(
            "INSERT INTO replies (body, question_id, user_id, reply_id) VALUES (?1, ?2, ?3, ?4)",
            params![self.body, self.question_id, self.user_id, self.reply_id],
        )?;

        let id = store.last_insert_id();
        self.id = Some(id);
        tracing::debug!(id, question_id = self.question_id, parent = ?self.reply_id, "inserted reply");
        Ok(id)
    }

    /// Insert when unsaved, otherwise update the row keyed by id
    pub fn save(&mut self, store: &SqliteStore) -> Result<()> {
        match self.id {
            None => self.create(store).map(|_| ()),
            Some(id) => {
                store.conn().execute(
                    r#"
                    UPDATE replies
                    SET body = ?1, question_id = ?2, user_id = ?3, reply_id = ?4
                    WHERE id = ?5
                    "#,
                    params![self.body, self.question_id, self.user_id, self.reply_id, id],
                )?;
                tracing::debug!(id, "updated reply");
                Ok(())
            }
        }
    }

    // ========== Relationships ==========

    pub fn author(&self, store: &SqliteStore) -> Result<Option<User>> {
        User::find_by_id(store, self.user_id)
    }

    pub fn question(&self, store: &SqliteStore) -> Result<Option<Question>> {
        Question::find_by_id(store, self.question_id)
    }

    /// The reply this one answers. Top-level replies return `None`
    /// without a lookup.
    pub fn parent_reply(&self, store: &SqliteStore) -> Result<Option<Reply>> {
        match self.reply_id {
            Some(parent_id) => Reply::find_by_id(store, parent_id),
            None => Ok(None),
        }
    }

    /// Direct children of this reply, in store order
    pub fn child_replies(&self, store: &SqliteStore) -> Result<Vec<Reply>> {
        let Some(id) = self.id else {
            return Ok(Vec::new());
        };
        query_all(
            store,
            "SELECT id, body, question_id, user_id, reply_id FROM replies WHERE reply_id = ?1",
            [id],
            Reply::from_row,
        )
    }
}
