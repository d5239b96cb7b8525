use async_trait::async_trait;
use super::todo::{Todo, TodoId};

/// Persistence contract for todo items.
///
/// `update` and `delete` do not check that the id exists: an unknown id
/// succeeds with zero affected rows.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    /// Creates the `todos` table if it is missing.
    async fn init(&self) -> anyhow::Result<()>;
    /// Stores `title`, `description`, `completed` and `created_at`; `id` is ignored.
    async fn insert(&self, todo: &Todo) -> anyhow::Result<TodoId>;
    /// Newest `created_at` first.
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    /// Overwrites `title`, `description` and `completed`; returns affected rows.
    async fn update(&self, id: TodoId, todo: &Todo) -> anyhow::Result<u64>;
    async fn delete(&self, id: TodoId) -> anyhow::Result<u64>;
}
