//! Persistence for questions and categories.
//!
//! Everything above this module talks to a [`QuestionStore`]; the Postgres
//! implementation backs the server and the in-memory one backs tests and
//! database-less local runs.

use crate::domain::model::{Category, NewQuestion, Question};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;
pub mod seed;

pub use memory::InMemoryQuestionStore;
pub use postgres::PgQuestionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Full contract of the question bank. Listings are ordered by ascending id.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Cheap connectivity check used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>>;

    async fn list_questions(&self) -> StoreResult<Vec<Question>>;

    async fn get_question(&self, id: i32) -> StoreResult<Option<Question>>;

    /// Questions whose category equals `category` exactly.
    async fn questions_by_category(&self, category: i32) -> StoreResult<Vec<Question>>;

    /// Case-insensitive substring match on the question text.
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>>;

    /// Inserts the question and returns it with its freshly assigned id.
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question>;

    /// Returns false when no row with `id` existed.
    async fn delete_question(&self, id: i32) -> StoreResult<bool>;

    /// Loads fixed rows (ids included). Existing rows with the same id are kept.
    async fn load_seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()>;
}
