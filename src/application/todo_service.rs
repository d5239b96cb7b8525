use crate::application::error::TodoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CREATED_AT_FORMAT, Todo, TodoId};
use async_trait::async_trait;
use chrono::Local;

pub type Result<T> = std::result::Result<T, TodoError>;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    /// Validates the title, stamps `created_at` and returns the stored item with its new id.
    async fn create(&self, input: Todo) -> Result<Todo>;
    async fn list(&self) -> Result<Vec<Todo>>;
    /// Echoes `input` back with `id` set, whether or not a row matched.
    async fn update(&self, id: TodoId, input: Todo) -> Result<Todo>;
    async fn delete(&self, id: TodoId) -> Result<()>;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, mut input: Todo) -> Result<Todo> {
        if input.title.is_empty() {
            return Err(TodoError::TitleRequired);
        }
        input.created_at = Local::now().format(CREATED_AT_FORMAT).to_string();
        input.id = self.repo.insert(&input).await?;
        tracing::info!(id = %input.id, "todo created");
        Ok(input)
    }

    async fn list(&self) -> Result<Vec<Todo>> { Ok(self.repo.list().await?) }

    async fn update(&self, id: TodoId, mut input: Todo) -> Result<Todo> {
        let affected = self.repo.update(id, &input).await?;
        if affected == 0 {
            tracing::debug!(%id, "update matched no rows");
        }
        input.id = id;
        Ok(input)
    }

    async fn delete(&self, id: TodoId) -> Result<()> {
        let affected = self.repo.delete(id).await?;
        if affected == 0 {
            tracing::debug!(%id, "delete matched no rows");
        } else {
            tracing::info!(%id, "todo deleted");
        }
        Ok(())
    }
}
