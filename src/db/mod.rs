pub mod blog;
pub mod cart;
pub mod comment;
pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod post;
pub mod reaction;
pub mod seller;
pub mod user;

#[derive(Debug, thiserror::Error)]
pub enum InsertError {
    /// A unique constraint rejected the row.
    #[error("Already exists")]
    Duplicate,
    #[error("{0}")]
    Database(String),
}

impl From<sqlx::Error> for InsertError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => InsertError::Duplicate,
            _ => {
                tracing::error!("Failed to execute query: {:?}", err);
                InsertError::Database("Failed to insert".to_string())
            }
        }
    }
}
