use chrono::Utc;
use rusqlite::{Connection, params};
use std::path::Path;

use crate::models::Task;

/// SQLite store behind the reference backend.
///
/// Each task is kept as its full JSON body so that fields this crate does
/// not model (category ids, owners, ...) survive a read/overwrite cycle.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| format!("failed to open database: {e}"))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| format!("failed to set pragmas: {e}"))?;

        Ok(Database { conn })
    }

    /// Open an in-memory database with the schema already applied.
    pub fn open_in_memory() -> Result<Self, String> {
        let conn =
            Connection::open_in_memory().map_err(|e| format!("failed to open database: {e}"))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Create the schema tables if they don't exist.
    pub fn migrate(&self) -> Result<(), String> {
        self.conn
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id         TEXT PRIMARY KEY,
                body       TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
            )
            .map_err(|e| format!("migration failed: {e}"))?;
        Ok(())
    }

    // -- Config --

    pub fn set_config(&self, key: &str, value: &str) -> Result<(), String> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(|e| format!("failed to set config: {e}"))?;
        Ok(())
    }

    pub fn get_config(&self, key: &str) -> Result<Option<String>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM config WHERE key = ?1")
            .map_err(|e| format!("query error: {e}"))?;
        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .map_err(|e| format!("query error: {e}"))?;
        match rows.next() {
            Some(Ok(v)) => Ok(Some(v)),
            Some(Err(e)) => Err(format!("query error: {e}")),
            None => Ok(None),
        }
    }

    // -- Tasks --

    /// Store a new task under a freshly generated id and return it.
    pub fn insert_task(&self, task: &Task) -> Result<Task, String> {
        let mut task = task.clone();
        let id = self.generate_id()?;
        task.set_id(&id);
        let body = encode(&task)?;
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO tasks (id, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                params![id, body, now],
            )
            .map_err(|e| format!("failed to insert task: {e}"))?;
        Ok(task)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM tasks WHERE id = ?1")
            .map_err(|e| format!("query error: {e}"))?;
        let mut rows = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .map_err(|e| format!("query error: {e}"))?;
        match rows.next() {
            Some(Ok(body)) => decode(&body).map(Some),
            Some(Err(e)) => Err(format!("query error: {e}")),
            None => Ok(None),
        }
    }

    /// All tasks, oldest first.
    pub fn list_tasks(&self) -> Result<Vec<Task>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM tasks ORDER BY created_at ASC, id ASC")
            .map_err(|e| format!("query error: {e}"))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| format!("query error: {e}"))?;

        let mut tasks = Vec::new();
        for row in rows {
            let body = row.map_err(|e| format!("row error: {e}"))?;
            tasks.push(decode(&body)?);
        }
        Ok(tasks)
    }

    /// Overwrite a stored task with `task`. The stored id always wins over
    /// whatever id the body carries.
    pub fn replace_task(&self, id: &str, task: &Task) -> Result<Task, String> {
        let mut task = task.clone();
        task.set_id(id);
        let body = encode(&task)?;
        let now = Utc::now().to_rfc3339();
        let rows_changed = self
            .conn
            .execute(
                "UPDATE tasks SET body = ?1, updated_at = ?2 WHERE id = ?3",
                params![body, now, id],
            )
            .map_err(|e| format!("update failed: {e}"))?;

        if rows_changed == 0 {
            return Err(format!("task not found: {id}"));
        }
        Ok(task)
    }

    /// Remove a task. Returns `false` if there was nothing to remove.
    pub fn delete_task(&self, id: &str) -> Result<bool, String> {
        let rows_changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])
            .map_err(|e| format!("delete failed: {e}"))?;
        Ok(rows_changed > 0)
    }

    /// Generate a short hash-based ID with the configured prefix.
    pub fn generate_id(&self) -> Result<String, String> {
        let prefix = self
            .get_config("prefix")?
            .unwrap_or_else(|| "task".to_string());
        let uuid = uuid::Uuid::new_v4();
        let hash = &format!("{:032x}", uuid.as_u128())[..8];
        Ok(format!("{prefix}-{hash}"))
    }
}

fn encode(task: &Task) -> Result<String, String> {
    serde_json::to_string(task).map_err(|e| format!("json error: {e}"))
}

fn decode(body: &str) -> Result<Task, String> {
    serde_json::from_str(body).map_err(|e| format!("corrupt task row: {e}"))
}
