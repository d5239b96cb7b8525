use std::{fs, path::Path, str::FromStr, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};

/// Shared handle to the SQLite store. Clones share one pool.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self> {
        prepare_sqlite_dir(database_url)?;
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database. One connection that never expires, since
    /// the data lives only as long as that connection.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    pub async fn close(&self) { self.pool.close().await }
}

/// Creates the directory holding a file-backed database, e.g. `data/` for
/// `sqlite://data/todos.db`.
fn prepare_sqlite_dir(database_url: &str) -> Result<()> {
    if database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory") { return Ok(()); }
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; }
    }
    Ok(())
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                completed BOOLEAN DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, todo: &Todo) -> Result<TodoId> {
        let result = sqlx::query("INSERT INTO todos (title, description, completed, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.completed)
            .bind(&todo.created_at)
            .execute(&*self.pool)
            .await?;
        Ok(TodoId(result.last_insert_rowid()))
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query("SELECT id, title, description, completed, created_at FROM todos ORDER BY created_at DESC")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().filter_map(decode_row).collect())
    }

    async fn update(&self, id: TodoId, todo: &Todo) -> Result<u64> {
        let result = sqlx::query("UPDATE todos SET title = ?2, description = ?3, completed = ?4 WHERE id = ?1")
            .bind(id.0)
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(todo.completed)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: TodoId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// Rows that do not decode are dropped so one bad row cannot fail the listing.
fn decode_row(row: &SqliteRow) -> Option<Todo> {
    let decoded = (|| -> Result<Todo, sqlx::Error> {
        // sqlx reads a NULL TEXT as "" when asked for a String
        let description: Option<String> = row.try_get("description")?;
        Ok(Todo {
            id: TodoId(row.try_get("id")?),
            title: row.try_get("title")?,
            description: description.ok_or_else(|| sqlx::Error::Decode("description is NULL".into()))?,
            completed: row.try_get("completed")?,
            created_at: row.try_get("created_at")?,
        })
    })();
    match decoded {
        Ok(todo) => Some(todo),
        Err(e) => {
            tracing::warn!(error = %e, "skipping undecodable todo row");
            None
        }
    }
}
