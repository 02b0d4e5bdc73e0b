pub mod error;
pub mod router;
pub mod types;
pub mod handlers {
    pub mod categories;
    pub mod common;
    pub mod health;
    pub mod questions;
    pub mod quizzes;
}

pub use error::ApiError;
pub use router::{create_router, ApiDoc};
pub use types::AppState;
