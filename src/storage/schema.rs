//! Database schema definitions

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    fname TEXT NOT NULL,
    lname TEXT NOT NULL
)
"#;

/// SQL to create the questions table
pub const CREATE_QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id)
)
"#;

/// SQL to create the replies table
/// `reply_id` is NULL for a top-level reply to the question
pub const CREATE_REPLIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS replies (
    id INTEGER PRIMARY KEY,
    body TEXT NOT NULL,
    question_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    reply_id INTEGER,
    FOREIGN KEY (question_id) REFERENCES questions(id),
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (reply_id) REFERENCES replies(id)
)
"#;

/// SQL to create the question_followers join table
pub const CREATE_QUESTION_FOLLOWERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS question_followers (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    question_id INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (question_id) REFERENCES questions(id)
)
"#;

/// SQL to create the question_likes join table
pub const CREATE_QUESTION_LIKES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS question_likes (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    question_id INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (question_id) REFERENCES questions(id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_questions_user ON questions(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_replies_question ON replies(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_replies_user ON replies(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_replies_parent ON replies(reply_id)",
    "CREATE INDEX IF NOT EXISTS idx_followers_question ON question_followers(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_followers_user ON question_followers(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_likes_question ON question_likes(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_likes_user ON question_likes(user_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_USERS_TABLE,
        CREATE_QUESTIONS_TABLE,
        CREATE_REPLIES_TABLE,
        CREATE_QUESTION_FOLLOWERS_TABLE,
        CREATE_QUESTION_LIKES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
