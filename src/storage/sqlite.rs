//! SQLite storage implementation

use std::path::Path;
use rusqlite::Connection;
use crate::Result;
use super::schema;

/// SQLite-backed store shared by every entity operation.
///
/// Callers hand a `&SqliteStore` to each persistence call; there is no
/// process-wide handle.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Underlying connection, used by the model layer to run its statements
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Identifier generated by the most recent insert on this connection
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        // table names come from the fixed list in `stats`, never from callers
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            users: self.count_rows("users")?,
            questions: self.count_rows("questions")?,
            replies: self.count_rows("replies")?,
            followers: self.count_rows("question_followers")?,
            likes: self.count_rows("question_likes")?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub users: usize,
    pub questions: usize,
    pub replies: usize,
    pub followers: usize,
    pub likes: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Users: {}", self.users)?;
        writeln!(f, "  Questions: {}", self.questions)?;
        writeln!(f, "  Replies: {}", self.replies)?;
        writeln!(f, "  Follows: {}", self.followers)?;
        writeln!(f, "  Likes: {}", self.likes)
    }
}
