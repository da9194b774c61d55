//! Questions - authored by a user, followed, liked and replied to

use rusqlite::{params, Row};
use serde::Serialize;
use crate::{Error, Result};
use crate::storage::SqliteStore;
use super::{query_all, query_one, QuestionFollower, QuestionLike, Reply, User};

/// A question posted by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    /// Author (`users.id`)
    pub user_id: i64,
}

impl Question {
    /// Build an unsaved question
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: i64) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }

    /// Project a row carrying `id`, `title`, `body` and `user_id` columns
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            body: row.get("body")?,
            user_id: row.get("user_id")?,
        })
    }

    // ========== Persistence ==========

    pub fn find_all(store: &SqliteStore) -> Result<Vec<Question>> {
        query_all(
            store,
            "SELECT id, title, body, user_id FROM questions",
            [],
            Question::from_row,
        )
    }

    pub fn find_by_id(store: &SqliteStore, id: i64) -> Result<Option<Question>> {
        tracing::trace!(id, "questions lookup");
        query_one(
            store,
            "SELECT id, title, body, user_id FROM questions WHERE id = ?1",
            [id],
            Question::from_row,
        )
    }

    pub fn find_by_title(store: &SqliteStore, title: &str) -> Result<Vec<Question>> {
        query_all(
            store,
            "SELECT id, title, body, user_id FROM questions WHERE title = ?1",
            [title],
            Question::from_row,
        )
    }

    pub fn find_by_author_id(store: &SqliteStore, user_id: i64) -> Result<Vec<Question>> {
        query_all(
            store,
            "SELECT id, title, body, user_id FROM questions WHERE user_id = ?1",
            [user_id],
            Question::from_row,
        )
    }

    /// Insert this question and capture the generated id.
    ///
    /// Fails without touching the store if the question is already saved.
    pub fn create(&mut self, store: &SqliteStore) -> Result<i64> {
        if let Some(id) = self.id {
            return Err(Error::AlreadyPersisted { table: "questions", id });
        }

        store.conn().execute(
            "INSERT INTO questions (title, body, user_id) VALUES (?1, ?2, ?3)",
            params![self.title, self.body, self.user_id],
        )?;

        let id = store.last_insert_id();
        self.id = Some(id);
        tracing::debug!(id, user_id = self.user_id, "inserted question");
        Ok(id)
    }

    /// Insert when unsaved, otherwise update the row keyed by id
    pub fn save(&mut self, store: &SqliteStore) -> Result<()> {
        match self.id {
            None => self.create(store).map(|_| ()),
            Some(id) => {
                store.conn().execute(
                    "UPDATE questions SET title = ?1, body = ?2, user_id = ?3 WHERE id = ?4",
                    params![self.title, self.body, self.user_id, id],
                )?;
                tracing::debug!(id, "updated question");
                Ok(())
            }
        }
    }

    // ========== Relationships ==========

    /// The authoring user, `None` if `user_id` does not resolve
    pub fn author(&self, store: &SqliteStore) -> Result<Option<User>> {
        User::find_by_id(store, self.user_id)
    }

    pub fn replies(&self, store: &SqliteStore) -> Result<Vec<Reply>> {
        match self.id {
            Some(id) => Reply::find_by_question_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn followers(&self, store: &SqliteStore) -> Result<Vec<User>> {
        match self.id {
            Some(id) => QuestionFollower::followers_for_question_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    /// Users who liked this question, each listed once
    pub fn likers(&self, store: &SqliteStore) -> Result<Vec<User>> {
        match self.id {
            Some(id) => QuestionLike::likers_for_question_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn num_likes(&self, store: &SqliteStore) -> Result<i64> {
        match self.id {
            Some(id) => QuestionLike::num_likes_for_question_id(store, id),
            None => Ok(0),
        }
    }

    // ========== Rankings ==========

    /// See [`QuestionFollower::most_followed_questions`]
    pub fn most_followed(store: &SqliteStore, n: usize) -> Result<Vec<Question>> {
        QuestionFollower::most_followed_questions(store, n)
    }

    /// See [`QuestionLike::most_liked_questions`]
    pub fn most_liked(store: &SqliteStore, n: usize) -> Result<Vec<Question>> {
        QuestionLike::most_liked_questions(store, n)
    }
}
