use thiserror::Error;

/// Every way a todo request can fail. The display text is what clients see
/// in the envelope's `message`.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("ID is required")]
    IdRequired,

    #[error("Invalid ID")]
    InvalidId,

    #[error("Title is required")]
    TitleRequired,

    #[error("{0}")]
    Store(#[from] anyhow::Error),
}

impl TodoError {
    pub fn is_store(&self) -> bool { matches!(self, TodoError::Store(_)) }
}
