pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::trivia_service::TriviaService;
pub use domain::model::{Category, NewQuestion, Question};
pub use storage::{InMemoryQuestionStore, PgQuestionStore, QuestionStore};
