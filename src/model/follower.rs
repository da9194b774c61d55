//! Question followers - join between users and the questions they follow

use rusqlite::{params, Row};
use serde::Serialize;
use crate::{Error, Result};
use crate::storage::SqliteStore;
use super::{limit, query_all, query_one, Question, User};

/// One user following one question. Duplicate pairs are not filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFollower {
    pub id: Option<i64>,
    pub user_id: i64,
    pub question_id: i64,
}

impl QuestionFollower {
    /// Build an unsaved follow
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

    /// All follow rows, in store order
    pub fn find_all(store: &SqliteStore) -> Result<Vec<QuestionFollower>> {
        query_all(
            store,
            "SELECT id, user_id, question_id FROM question_followers",
            [],
            QuestionFollower::from_row,
        )
    }

    pub fn find_by_id(store: &SqliteStore, id: i64) -> Result<Option<QuestionFollower>> {
        tracing::trace!(id, "question_followers lookup");
        query_one(
            store,
            "SELECT id, user_id, question_id FROM question_followers WHERE id = ?1",
            [id],
            QuestionFollower::from_row,
        )
    }

    /// Insert this follow and capture the generated id.
    ///
    /// Fails without touching the store if the follow is already saved.
    pub fn create(&mut self, store: &SqliteStore) -> Result<i64> {
        if let Some(id) = self.id {
            return Err(Error::AlreadyPersisted { table: "question_followers", id });
        }

        store.conn().execute(
            "INSERT INTO question_followers (user_id, question_id) VALUES (?1, ?2)",
            params![self.user_id, self.question_id],
        )?;

        let id = store.last_insert_id();
        self.id = Some(id);
        tracing::debug!(id, user_id = self.user_id, question_id = self.question_id, "inserted follow");
        Ok(id)
    }

    /// Insert when unsaved, otherwise update the row keyed by id
    pub fn save(&mut self, store: &SqliteStore) -> Result<()> {
        match self.id {
            None => self.create(store).map(|_| ()),
            Some(id) => {
                store.conn().execute(
                    "UPDATE question_followers SET user_id = ?1, question_id = ?2 WHERE id = ?3",
                    params![self.user_id, self.question_id, id],
                )?;
                tracing::debug!(id, "updated follow");
                Ok(())
            }
        }
    }

    /// Users following the question
    pub fn followers_for_question_id(store: &SqliteStore, question_id: i64) -> Result<Vec<User>> {
        query_all(
            store,
            r#"
            SELECT users.id AS id, users.fname AS fname, users.lname AS lname
            FROM question_followers AS qf
            INNER JOIN users ON qf.user_id = users.id
            WHERE qf.question_id = ?1
            "#,
            [question_id],
            User::from_row,
        )
    }

    /// Questions the user follows
    pub fn followed_questions_for_user_id(store: &SqliteStore, user_id: i64) -> Result<Vec<Question>> {
        query_all(
            store,
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM question_followers AS qf
            INNER JOIN questions ON qf.question_id = questions.id
            WHERE qf.user_id = ?1
            "#,
            [user_id],
            Question::from_row,
        )
    }

    /// Top `n` questions by follower count, highest first.
    ///
    /// Questions without followers rank with a count of zero. No secondary
    /// sort key is applied, so the order among equal counts is whatever the
    /// store produces and must not be relied on.
    pub fn most_followed_questions(store: &SqliteStore, n: usize) -> Result<Vec<Question>> {
        query_all(
            store,
            r#"
            SELECT questions.id AS id, questions.title AS title,
                   questions.body AS body, questions.user_id AS user_id
            FROM questions
            LEFT OUTER JOIN question_followers AS qf ON qf.question_id = questions.id
            GROUP BY questions.id
            ORDER BY COUNT(qf.id) DESC
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
    fn test_follow_round_trip() {
        let store = fixtures::store();
        let user = fixtures::user(&store, "Ada", "Lovelace");
        let question = fixtures::question(&store, &user, "Engines?");

        let mut follow = QuestionFollower::new(user.id.unwrap(), question.id.unwrap());
        follow.save(&store).unwrap();

        let loaded = QuestionFollower::find_by_id(&store, follow.id.unwrap()).unwrap().unwrap();
        assert_eq!(loaded, follow);
        assert!(QuestionFollower::find_by_id(&store, 99).unwrap().is_none());
    }

    #[test]
    fn test_create_twice_fails() {
        let store = fixtures::store();
        let user = fixtures::user(&store, "Ada", "Lovelace");
        let question = fixtures::question(&store, &user, "Engines?");
        let mut follow = QuestionFollower::new(user.id.unwrap(), question.id.unwrap());
        follow.create(&store).unwrap();

        assert!(matches!(follow.create(&store), Err(Error::AlreadyPersisted { .. })));
        assert_eq!(QuestionFollower::find_all(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_follows_are_kept() {
        let store = fixtures::store();
        let user = fixtures::user(&store, "Ada", "Lovelace");
        let question = fixtures::question(&store, &user, "Engines?");
        fixtures::follow(&store, &user, &question);
        fixtures::follow(&store, &user, &question);

        assert_eq!(QuestionFollower::find_all(&store).unwrap().len(), 2);
        assert_eq!(
            QuestionFollower::followers_for_question_id(&store, question.id.unwrap()).unwrap().len(),
            2
        );
    }

    #[test]
    fn test_most_followed() {
        let store = fixtures::store();
        let author = fixtures::user(&store, "Ada", "Lovelace");
        let fans: Vec<_> = (0..5)
            .map(|i| fixtures::user(&store, "Fan", &i.to_string()))
            .collect();

        let tied_a = fixtures::question(&store, &author, "Tied A");
        let top = fixtures::question(&store, &author, "Top");
        let tied_b = fixtures::question(&store, &author, "Tied B");

        for fan in &fans {
            fixtures::follow(&store, fan, &top);
        }
        for fan in &fans[..3] {
            fixtures::follow(&store, fan, &tied_a);
            fixtures::follow(&store, fan, &tied_b);
        }

        let top_two = Question::most_followed(&store, 2).unwrap();
        assert_eq!(top_two.len(), 2);
        assert_eq!(top_two[0], top);

        let all = QuestionFollower::most_followed_questions(&store, 3).unwrap();
        assert_eq!(all[0], top);
        assert!(all.contains(&tied_a));
        assert!(all.contains(&tied_b));
    }

    #[test]
    fn test_unfollowed_questions_rank_last() {
        let store = fixtures::store();
        let author = fixtures::user(&store, "Ada", "Lovelace");
        let quiet = fixtures::question(&store, &author, "Quiet");
        let followed = fixtures::question(&store, &author, "Followed");
        fixtures::follow(&store, &author, &followed);

        let ranked = Question::most_followed(&store, 10).unwrap();
        assert_eq!(ranked, vec![followed, quiet]);
    }
}
