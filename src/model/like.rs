//! Question likes - join between users and the questions they liked

use rusqlite::{params, Row};
use serde::Serialize;
use crate::{Error, Result};
use crate::storage::SqliteStore;
use super::{limit, query_all, query_one, Question, User};

/// One user liking one question. Duplicate pairs are not filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionLike {
    pub id: Option<i64>,
    pub user_id: i64,
    pub question_id: i64,
}

impl QuestionLike {
    /// Build an unsaved like
    pub fn new(user_id: i64, question_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            question_id,
        }
    }

    /// Project a row carrying `id`, `user_id` and `question_id` columns
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            question_id: row.get("question_id")?,
        })
    }

    /// All like rows, in store order
    pub fn find_all(store: &SqliteStore) -> Result<Vec<QuestionLike>> {
        query_all(
            store,
            "SELECT id, user_id, question_id FROM question_likes",
            [],
            QuestionLike::from_row,
        )
    }

    pub fn find_by_id(store: &SqliteStore, id: i64) -> Result<Option<QuestionLike>> {
        tracing::trace!(id, "question_likes lookup");
        query_one(
            store,
            "SELECT id, user_id, question_id FROM question_likes WHERE id = ?1",
            [id],
            QuestionLike::from_row,
        )
    }

    /// Insert this like and capture the generated id.
    ///
    /// Fails without touching the store if the like is already saved.
    pub fn create(&mut self, store: &SqliteStore) -> Result<i64> {
        if let Some(id) = self.id {
            return Err(Error::AlreadyPersisted { table: "question_likes", id });
        }

        store.conn().execute(
            "INSERT INTO question_likes (user_id, question_id) VALUES (?1, ?2)",
            params![self.user_id, self.question_id],
        )?;

        let id = store.last_insert_id();
        self.id = Some(id);
        tracing::debug!(id, user_id = self.user_id, question_id = self.question_id, "inserted like");
        Ok(id)
    }

    /// Insert when unsaved, otherwise update the row keyed by id
    pub fn save(&mut self, store: &SqliteStore) -> Result<()> {
        match self.id {
            None => self.create(store).map(|_| ()),
            Some(id) => {
                store.conn().execute(
                    "UPDATE question_likes SET user_id = ?1, question_id = ?2 WHERE id = ?3",
                    params![self.user_id, self.question_id, id],
                )?;
                tracing::debug!(id, "updated like");
                Ok(())
            }
        }
    }

    /// Distinct users who liked the question
    pub fn likers_for_question_id(store: &SqliteStore, question_id: i64) -> Result<Vec<User>> {
        query_all(
            store,
            r#"
            SELECT DISTINCT users.id AS id, users.fname AS fname, users.lname AS lname
            FROM question_likes AS ql
            INNER JOIN users ON ql.user_id = users.id
            WHERE ql.question_id = ?1
            "#,
            [question_id],
            User::from_row,
        )
    }

    /// Like rows attached to an existing question; zero when there are none
    pub fn num_likes_for_question_id(store: &SqliteStore, question_id: i64) -> Result<i64> {
        let count = store.conn().query_row(
            r#"
            SELECT COUNT(*)
            FROM question_likes AS ql
            INNER JOIN questions ON ql.question_id = questions.id
            WHERE ql.question_id = ?1
            "#,
            [question_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Questions the user liked
    pub fn liked_questions_for_user_id(store: &SqliteStore, user_id: i64) -> Result<Vec<Question>> {
        query_all(
            store,
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM question_likes AS ql
            INNER JOIN questions ON ql.question_id = questions.id
            WHERE ql.user_id = ?1
            "#,
            [user_id],
            Question::from_row,
        )
    }

    /// Top `n` questions by like count, highest first.
    ///
    /// Order among equal counts is store-dependent.
    pub fn most_liked_questions(store: &SqliteStore, n: usize) -> Result<Vec<Question>> {
        query_all(
            store,
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM questions
            LEFT OUTER JOIN question_likes AS ql ON ql.question_id = questions.id
            GROUP BY questions.id
            ORDER BY COUNT(ql.id) DESC
            LIMIT ?1
            "#,
            [limit(n)],
            Question::from_row,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;

    #[test]
    fn test_like_round_trip() {
        let store = fixtures::store();
        let user = fixtures::user(&store, "Ada", "Lovelace");
        let question = fixtures::question(&store, &user, "Engines?");

        let mut like = QuestionLike::new(user.id.unwrap(), question.id.unwrap());
        like.save(&store).unwrap();

        let loaded = QuestionLike::find_by_id(&store, like.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded, like);
        assert!(QuestionLike::find_by_id(&store, 99).unwrap().is_none());
    }

    #[test]
    fn test_create_twice_fails() {
        let store = fixtures::store();
        let user = fixtures::user(&store, "Ada", "Lovelace");
        let question = fixtures::question(&store, &user, "Engines?");
        let mut like = QuestionLike::new(user.id.unwrap(), question.id.unwrap());
        let id = like.create(&store).unwrap();

        match like.create(&store) {
            Err(Error::AlreadyPersisted { table, id: got }) => {
                assert_eq!(table, "question_likes");
                assert_eq!(got, id);
            }
            other => panic!("expected AlreadyPersisted, got {:?}", other),
        }
        assert_eq!(QuestionLike::find_all(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_update_moves_like() {
        let store = fixtures::store();
        let user = fixtures::user(&store, "Ada", "Lovelace");
        let first = fixtures::question(&store, &user, "First");
        let second = fixtures::question(&store, &user, "Second");

        let mut like = QuestionLike::new(user.id.unwrap(), first.id.unwrap());
        like.save(&store).unwrap();
        like.question_id = second.id.unwrap();
        like.save(&store).unwrap();

        assert_eq!(first.num_likes(&store).unwrap(), 0);
        assert_eq!(second.num_likes(&store).unwrap(), 1);
    }

    #[test]
    fn test_likers_are_distinct() {
        let store = fixtures::store();
        let fan = fixtures::user(&store, "Alan", "Turing");
        let question = fixtures::question(&store, &fan, "Engines?");
        fixtures::like(&store, &fan, &question);
        fixtures::like(&store, &fan, &question);

        let likers = QuestionLike::likers_for_question_id(&store, question.id.unwrap()).unwrap();
        assert_eq!(likers, vec![fan]);
        // the count still sees both rows
        assert_eq!(question.num_likes(&store).unwrap(), 2);
    }

    #[test]
    fn test_num_likes_for_missing_question() {
        let store = fixtures::store();
        assert_eq!(QuestionLike::num_likes_for_question_id(&store, 12).unwrap(), 0);
    }

    #[test]
    fn test_most_liked() {
        let store = fixtures::store();
        let author = fixtures::user(&store, "Ada", "Lovelace");
        let fan = fixtures::user(&store, "Alan", "Turing");
        let meh = fixtures::question(&store, &author, "Meh");
        let hit = fixtures::question(&store, &author, "Hit");
        fixtures::like(&store, &fan, &hit);
        fixtures::like(&store, &author, &hit);
        fixtures::like(&store, &fan, &meh);

        assert_eq!(Question::most_liked(&store, 1).unwrap(), vec![hit.clone()]);
        assert_eq!(Question::most_liked(&store, 5).unwrap(), vec![hit, meh]);
        assert_eq!(fan.liked_questions(&store).unwrap().len(), 2);
    }
}
