use crate::app::trivia_service::TriviaService;
use crate::domain::model::{CategoryMap, NewQuestion, Question};
use crate::domain::pager::PageNumber;
use crate::domain::quiz::{CategoryFilter, ALL_CATEGORIES_ID, ALL_CATEGORIES_TYPE};
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{coerce_bigint, coerce_int};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: TriviaService,
}

// --- Requests ---

#[derive(Deserialize, Debug, Default)]
pub struct PageParams {
    /// 1-based page number; absent or empty means the first page.
    pub page: Option<String>,
}

impl PageParams {
    pub fn page_number(&self) -> Result<PageNumber, ApiError> {
        let raw = match self.page.as_deref().map(str::trim) {
            None | Some("") => return Ok(PageNumber::FIRST),
            Some(raw) => raw,
        };
        let n: i64 = raw
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("page must be an integer, got {:?}", raw)))?;
        PageNumber::new(n)
            .ok_or_else(|| ApiError::BadRequest(format!("page must be >= 1, got {}", n)))
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AddQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    /// 1 to 5. Numeric strings are accepted.
    #[serde(default)]
    #[schema(value_type = i32)]
    pub difficulty: Option<JsonValue>,
    /// Category id. Numeric strings are accepted.
    #[serde(default)]
    #[schema(value_type = i32)]
    pub category: Option<JsonValue>,
}

impl AddQuestionRequest {
    pub fn into_new_question(self) -> Result<NewQuestion, ApiError> {
        let question = self
            .question
            .ok_or_else(|| ApiError::Unprocessable("question is missing".to_string()))?;
        let answer = self
            .answer
            .ok_or_else(|| ApiError::Unprocessable("answer is missing".to_string()))?;
        let difficulty = required_int(self.difficulty.as_ref(), "difficulty")?;
        let category = required_int(self.category.as_ref(), "category")?;

        NewQuestion::new(question, answer, category, difficulty).map_err(ApiError::Unprocessable)
    }
}

fn required_int(value: Option<&JsonValue>, field: &str) -> Result<i32, ApiError> {
    let value = value
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::Unprocessable(format!("{} is missing", field)))?;
    coerce_int(value).map_err(|e| ApiError::Unprocessable(format!("{}: {}", field, e)))
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    pub search_term: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct QuizRequest {
    /// `{"id": 2, "type": "Art"}`. Id 0 or type "click" selects every category.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub quiz_category: Option<JsonValue>,
    /// Ids of the questions already shown in this quiz.
    #[serde(default)]
    #[schema(value_type = Vec<i32>)]
    pub previous_questions: Option<JsonValue>,
}

/// A quiz request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPlay {
    pub filter: CategoryFilter,
    pub previous_questions: HashSet<i32>,
}

impl QuizRequest {
    /// The category is checked first, so a request broken in both places is a 422.
    pub fn validate(self) -> Result<QuizPlay, ApiError> {
        let filter = parse_quiz_category(self.quiz_category.as_ref())?;
        let previous_questions = parse_previous_questions(self.previous_questions.as_ref())?;
        Ok(QuizPlay {
            filter,
            previous_questions,
        })
    }
}

fn parse_quiz_category(value: Option<&JsonValue>) -> Result<CategoryFilter, ApiError> {
    let obj = match value {
        Some(JsonValue::Object(obj)) => obj,
        Some(JsonValue::Null) | None => {
            return Err(ApiError::Unprocessable("quiz_category is missing".to_string()))
        }
        Some(other) => {
            return Err(ApiError::Unprocessable(format!(
                "quiz_category must be an object, got {}",
                other
            )))
        }
    };

    if obj.get("type").and_then(JsonValue::as_str) == Some(ALL_CATEGORIES_TYPE) {
        return Ok(CategoryFilter::All);
    }

    let id = obj
        .get("id")
        .filter(|v| !v.is_null())
        .ok_or_else(|| ApiError::Unprocessable("quiz_category.id is missing".to_string()))?;
    let id = coerce_int(id)
        .map_err(|e| ApiError::Unprocessable(format!("quiz_category.id: {}", e)))?;

    match id {
        ALL_CATEGORIES_ID => Ok(CategoryFilter::All),
        id if id < 0 => Err(ApiError::Unprocessable(format!(
            "quiz_category.id must not be negative, got {}",
            id
        ))),
        id => Ok(CategoryFilter::Only(id)),
    }
}

fn parse_previous_questions(value: Option<&JsonValue>) -> Result<HashSet<i32>, ApiError> {
    let items = match value {
        Some(JsonValue::Array(items)) => items,
        Some(JsonValue::Null) | None => {
            return Err(ApiError::BadRequest("previous_questions is missing".to_string()))
        }
        Some(other) => {
            return Err(ApiError::BadRequest(format!(
                "previous_questions must be a list of ids, got {}",
                other
            )))
        }
    };

    let mut ids = HashSet::with_capacity(items.len());
    for item in items {
        let id = coerce_bigint(item)
            .map_err(|e| ApiError::BadRequest(format!("previous_questions: {}", e)))?;
        // No stored question has an id outside the INTEGER range.
        if let Ok(id) = i32::try_from(id) {
            ids.insert(id);
        }
    }
    Ok(ids)
}

// --- Responses ---

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    /// HTTP status code.
    pub error: u16,
    pub message: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CategoriesResponse {
    pub success: bool,
    /// `{id: type}`
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct QuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[schema(value_type = Object)]
    pub categories: CategoryMap,
    /// Always null on the unfiltered listing.
    pub current_category: Option<i32>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: i32,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: i32,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CreateResponse {
    pub success: bool,
    pub created: i32,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct QuizResponse {
    pub success: bool,
    /// Absent once every eligible question has been answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}
