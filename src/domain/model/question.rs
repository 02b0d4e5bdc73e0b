use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

/// A stored trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// A question that passed validation and is ready to be inserted.
///
/// The category is not checked against the categories table. An orphaned
/// reference is stored as-is and only drops out of category listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: i32,
    difficulty: i32,
}

impl NewQuestion {
    /// Validates the payload before creating a question.
    /// Returns Err(String) with the reason if it is rejected.
    pub fn new(
        question: String,
        answer: String,
        category: i32,
        difficulty: i32,
    ) -> Result<Self, String> {
        if question.trim().is_empty() {
            return Err("question must not be empty".to_string());
        }
        if answer.trim().is_empty() {
            return Err("answer must not be empty".to_string());
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(format!(
                "difficulty must be between {} and {}, got {}",
                MIN_DIFFICULTY, MAX_DIFFICULTY, difficulty
            ));
        }
        Ok(Self {
            question,
            answer,
            category,
            difficulty,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> i32 {
        self.category
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// Attaches the id assigned by the store.
    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}
