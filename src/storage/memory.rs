//! In-process store used by tests and by `TRIVIA_STORE=memory`.

use crate::domain::model::{Category, NewQuestion, Question};
use crate::domain::search::search;
use crate::storage::{seed, QuestionStore, StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    questions: Vec<Question>,
    last_id: i32,
}

/// Questions and categories kept in memory behind a single lock, so every read
/// sees a write either fully applied or not at all.
#[derive(Default)]
pub struct InMemoryQuestionStore {
    tables: RwLock<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the stock trivia data.
    pub fn seeded() -> Self {
        let questions = seed::questions();
        let last_id = questions.iter().map(|q| q.id).max().unwrap_or(0);
        Self {
            tables: RwLock::new(Tables {
                categories: seed::categories(),
                questions,
                last_id,
            }),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// When set, inserts and deletes fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes are disabled".to_string()));
        }
        Ok(())
    }
}

fn sorted_by_id(mut questions: Vec<Question>) -> Vec<Question> {
    questions.sort_by_key(|q| q.id);
    questions
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_id(tables.questions.clone()))
    }

    async fn get_question(&self, id: i32) -> StoreResult<Option<Question>> {
        let tables = self.tables.read().await;
        Ok(tables.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn questions_by_category(&self, category: i32) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_id(
            tables
                .questions
                .iter()
                .filter(|q| q.category == category)
                .cloned()
                .collect(),
        ))
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let tables = self.tables.read().await;
        Ok(search(term, &tables.questions))
    }

    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        tables.last_id += 1;
        let stored = question.into_question(tables.last_id);
        tables.questions.push(stored.clone());
        Ok(stored)
    }

    async fn delete_question(&self, id: i32) -> StoreResult<bool> {
        self.check_writable()?;
        let mut tables = self.tables.write().await;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() != before)
    }

    async fn load_seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        for category in categories {
            if !tables.categories.iter().any(|c| c.id == category.id) {
                tables.categories.push(category.clone());
            }
        }
        for question in questions {
            if !tables.questions.iter().any(|q| q.id == question.id) {
                tables.questions.push(question.clone());
            }
        }
        let max_id = tables.questions.iter().map(|q| q.id).max().unwrap_or(0);
        tables.last_id = tables.last_id.max(max_id);
        Ok(())
    }
}
