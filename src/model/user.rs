//! Users - question and reply authors

use rusqlite::{params, Row};
use serde::Serialize;
use crate::{Error, Result};
use crate::storage::SqliteStore;
use super::{query_all, query_one, Question, QuestionFollower, QuestionLike, Reply};

/// A forum user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Option<i64>,
    pub fname: String,
    pub lname: String,
}

/// Average likes per authored question.
///
/// A user without questions has no meaningful average, which is kept
/// apart from an average of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Karma {
    Undefined,
    Average(f64),
}

impl Karma {
    /// Numeric value, if defined
    pub fn value(&self) -> Option<f64> {
        match self {
            Karma::Undefined => None,
            Karma::Average(avg) => Some(*avg),
        }
    }
}

impl std::fmt::Display for Karma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Karma::Undefined => write!(f, "n/a"),
            Karma::Average(avg) => write!(f, "{:.2}", avg),
        }
    }
}

impl User {
    /// Build an unsaved user
    pub fn new(fname: impl Into<String>, lname: impl Into<String>) -> Self {
        Self {
            id: None,
            fname: fname.into(),
            lname: lname.into(),
        }
    }

    /// Project a row carrying `id`, `fname` and `lname` columns
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            fname: row.get("fname")?,
            lname: row.get("lname")?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }

    // ========== Persistence ==========

    pub fn find_all(store: &SqliteStore) -> Result<Vec<User>> {
        query_all(store, "SELECT id, fname, lname FROM users", [], User::from_row)
    }

    pub fn find_by_id(store: &SqliteStore, id: i64) -> Result<Option<User>> {
        tracing::trace!(id, "users lookup");
        query_one(
            store,
            "SELECT id, fname, lname FROM users WHERE id = ?1",
            [id],
            User::from_row,
        )
    }

    /// First user with exactly this first and last name
    pub fn find_by_name(store: &SqliteStore, fname: &str, lname: &str) -> Result<Option<User>> {
        query_one(
            store,
            "SELECT id, fname, lname FROM users WHERE fname = ?1 AND lname = ?2 LIMIT 1",
            [fname, lname],
            User::from_row,
        )
    }

    /// Insert this user and capture the generated id.
    ///
    /// Fails without touching the store if the user is already saved.
    pub fn create(&mut self, store: &SqliteStore) -> Result<i64> {
        if let Some(id) = self.id {
            return Err(Error::AlreadyPersisted { table: "users", id });
        }

        store.conn().execute(
            "INSERT INTO users (fname, lname) VALUES (?1, ?2)",
            params![self.fname, self.lname],
        )?;

        let id = store.last_insert_id();
        self.id = Some(id);
        tracing::debug!(id, "inserted user");
        Ok(id)
    }

    /// Insert when unsaved, otherwise update the row keyed by id
    pub fn save(&mut self, store: &SqliteStore) -> Result<()> {
        match self.id {
            None => self.create(store).map(|_| ()),
            Some(id) => {
                store.conn().execute(
                    "UPDATE users SET fname = ?1, lname = ?2 WHERE id = ?3",
                    params![self.fname, self.lname, id],
                )?;
                tracing::debug!(id, "updated user");
                Ok(())
            }
        }
    }

    // ========== Relationships ==========

    pub fn authored_questions(&self, store: &SqliteStore) -> Result<Vec<Question>> {
        match self.id {
            Some(id) => Question::find_by_author_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn authored_replies(&self, store: &SqliteStore) -> Result<Vec<Reply>> {
        match self.id {
            Some(id) => Reply::find_by_author_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn followed_questions(&self, store: &SqliteStore) -> Result<Vec<Question>> {
        match self.id {
            Some(id) => QuestionFollower::followed_questions_for_user_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    pub fn liked_questions(&self, store: &SqliteStore) -> Result<Vec<Question>> {
        match self.id {
            Some(id) => QuestionLike::liked_questions_for_user_id(store, id),
            None => Ok(Vec::new()),
        }
    }

    // ========== Aggregates ==========

    /// Likes received across all of this user's questions divided by the
    /// number of questions they authored.
    ///
    /// Questions without likes still count towards the denominator. A user
    /// with no questions (or an unsaved user) yields `Karma::Undefined`.
    pub fn average_karma(&self, store: &SqliteStore) -> Result<Karma> {
        let Some(id) = self.id else {
            return Ok(Karma::Undefined);
        };

        let (likes, questions): (i64, i64) = store.conn().query_row(
            r#"
            SELECT COUNT(question_likes.id), COUNT(DISTINCT questions.id)
            FROM questions
            LEFT OUTER JOIN question_likes ON questions.id = question_likes.question_id
            WHERE questions.user_id = ?1
            "#,
            [id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        if questions == 0 {
            return Ok(Karma::Undefined);
        }
        Ok(Karma::Average(likes as f64 / questions as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_save_assigns_id_and_round_trips() {
        let store = fixtures::store();
        let mut user = User::new("Ada", "Lovelace");
        assert!(user.id.is_none());

        user.save(&store).unwrap();
        assert!(user.id.is_some());

        let loaded = User::find_by_id(&store, user.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn test_create_twice_fails() {
        let store = fixtures::store();
        let mut user = User::new("Ada", "Lovelace");
        let id = user.create(&store).unwrap();

        let err = user.create(&store).unwrap_err();
        assert!(matches!(err, Error::AlreadyPersisted { table: "users", id: got } if got == id));
        assert_eq!(User::find_all(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_save_updates_in_place() {
        let store = fixtures::store();
        let mut user = fixtures::user(&store, "Ada", "Byron");
        let id = user.id;

        user.lname = "Lovelace".to_string();
        user.save(&store).unwrap();

        assert_eq!(user.id, id);
        let all = User::find_all(&store).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].lname, "Lovelace");
    }

    #[test]
    fn test_find_by_id_missing() {
        let store = fixtures::store();
        assert!(User::find_by_id(&store, 42).unwrap().is_none());
    }

    #[test]
    fn test_find_all_preserves_insert_order() {
        let store = fixtures::store();
        fixtures::user(&store, "Ada", "Lovelace");
        fixtures::user(&store, "Alan", "Turing");

        let names: Vec<_> = User::find_all(&store)
            .unwrap()
            .into_iter()
            .map(|u| u.fname)
            .collect();
        assert_eq!(names, vec!["Ada", "Alan"]);
    }

    #[test]
    fn test_find_by_name() {
        let store = fixtures::store();
        let alan = fixtures::user(&store, "Alan", "Turing");

        assert_eq!(User::find_by_name(&store, "Alan", "Turing").unwrap(), Some(alan));
        assert!(User::find_by_name(&store, "Alan", "Kay").unwrap().is_none());
    }

    #[test]
    fn test_authored_and_followed() {
        let store = fixtures::store();
        let ada = fixtures::user(&store, "Ada", "Lovelace");
        let alan = fixtures::user(&store, "Alan", "Turing");
        let q1 = fixtures::question(&store, &ada, "Engines?");
        let q2 = fixtures::question(&store, &alan, "Machines?");
        fixtures::reply(&store, &q2, &ada, None);
        fixtures::follow(&store, &ada, &q2);
        fixtures::like(&store, &ada, &q2);

        assert_eq!(ada.authored_questions(&store).unwrap(), vec![q1]);
        assert_eq!(ada.authored_replies(&store).unwrap().len(), 1);
        assert_eq!(ada.followed_questions(&store).unwrap(), vec![q2.clone()]);
        assert_eq!(ada.liked_questions(&store).unwrap(), vec![q2]);
        assert!(alan.authored_replies(&store).unwrap().is_empty());
    }

    #[test]
    fn test_average_karma() {
        let store = fixtures::store();
        let author = fixtures::user(&store, "Ada", "Lovelace");
        let popular = fixtures::question(&store, &author, "Popular");
        fixtures::question(&store, &author, "Ignored");

        for i in 0..4 {
            let fan = fixtures::user(&store, "Fan", &i.to_string());
            fixtures::like(&store, &fan, &popular);
        }

        assert_eq!(author.average_karma(&store).unwrap(), Karma::Average(2.0));
    }

    #[test]
    fn test_average_karma_undefined_without_questions() {
        let store = fixtures::store();
        let lurker = fixtures::user(&store, "Lurk", "Er");

        let karma = lurker.average_karma(&store).unwrap();
        assert_eq!(karma, Karma::Undefined);
        assert_eq!(karma.value(), None);
        assert_eq!(karma.to_string(), "n/a");
    }
}
