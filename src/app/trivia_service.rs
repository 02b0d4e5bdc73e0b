//! Use cases of the trivia API.
//!
//! The service owns no state besides the store handle it was built with: every
//! quiz session detail (which questions were already shown) comes in with the
//! call.

use crate::domain::model::{Category, NewQuestion, Question};
use crate::domain::pager::{paginate, PageNumber};
use crate::domain::quiz::{select_next, CategoryFilter, QuizOutcome};
use crate::storage::{QuestionStore, StoreError};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriviaError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid quiz category: {0}")]
    InvalidCategory(String),
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub type TriviaResult<T> = Result<T, TriviaError>;

/// One page of questions plus the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionListing {
    pub page: QuestionPage,
    pub categories: Vec<Category>,
}

#[derive(Clone)]
pub struct TriviaService {
    store: Arc<dyn QuestionStore>,
}

impl TriviaService {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn QuestionStore {
        self.store.as_ref()
    }

    pub async fn list_categories(&self) -> TriviaResult<Vec<Category>> {
        let categories = self.store.list_categories().await?;
        if categories.is_empty() {
            return Err(TriviaError::NotFound("no categories".to_string()));
        }
        Ok(categories)
    }

    pub async fn list_questions(&self, page: PageNumber) -> TriviaResult<QuestionListing> {
        let questions = self.store.list_questions().await?;
        let page = page_of(page, questions)?;
        let categories = self.store.list_categories().await?;
        Ok(QuestionListing { page, categories })
    }

    pub async fn category_questions(
        &self,
        category: i32,
        page: PageNumber,
    ) -> TriviaResult<QuestionPage> {
        let questions = self.store.questions_by_category(category).await?;
        page_of(page, questions)
    }

    /// Deletes the question and returns its id.
    pub async fn delete_question(&self, id: i32) -> TriviaResult<i32> {
        if self.store.get_question(id).await?.is_none() {
            return Err(TriviaError::NotFound(format!("question {}", id)));
        }

        match self.store.delete_question(id).await {
            Ok(true) => {
                tracing::info!(question.id = id, "question deleted");
                Ok(id)
            }
            // Someone else removed it between the lookup and the delete.
            Ok(false) => Err(TriviaError::NotFound(format!("question {}", id))),
            Err(e) => {
                tracing::error!(question.id = id, error = %e, "failed to delete question");
                Err(TriviaError::Unprocessable(format!(
                    "failed to delete question {}: {}",
                    id, e
                )))
            }
        }
    }

    pub async fn add_question(&self, question: NewQuestion) -> TriviaResult<Question> {
        match self.store.insert_question(question).await {
            Ok(created) => {
                tracing::info!(
                    question.id = created.id,
                    question.category = created.category,
                    "question created"
                );
                Ok(created)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to insert question");
                Err(TriviaError::Unprocessable(format!(
                    "failed to insert question: {}",
                    e
                )))
            }
        }
    }

    pub async fn search_questions(&self, term: &str) -> TriviaResult<Vec<Question>> {
        let results = self.store.search_questions(term).await?;
        tracing::debug!(search.term = term, results.count = results.len(), "searched questions");
        Ok(results)
    }

    /// Picks the next quiz question for a session that has already seen
    /// `previously_answered`.
    pub async fn play_quiz(
        &self,
        filter: CategoryFilter,
        previously_answered: &HashSet<i32>,
    ) -> TriviaResult<QuizOutcome> {
        let candidates = match filter {
            CategoryFilter::All => self.store.list_questions().await?,
            CategoryFilter::Only(id) => {
                if self.store.get_category(id).await?.is_none() {
                    return Err(TriviaError::InvalidCategory(format!(
                        "category {} does not exist",
                        id
                    )));
                }
                self.store.questions_by_category(id).await?
            }
        };

        let outcome = select_next(candidates, previously_answered, &mut rand::thread_rng());
        if outcome == QuizOutcome::Exhausted {
            tracing::debug!(quiz.filter = ?filter, "quiz exhausted");
        }
        Ok(outcome)
    }
}

fn page_of(page: PageNumber, questions: Vec<Question>) -> TriviaResult<QuestionPage> {
    let current = paginate(page, &questions).to_vec();
    if current.is_empty() {
        return Err(TriviaError::NotFound(format!("page {}", page)));
    }
    Ok(QuestionPage {
        questions: current,
        total_questions: questions.len(),
    })
}
