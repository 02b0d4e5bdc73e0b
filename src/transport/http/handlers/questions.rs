use crate::domain::model::category_map;
use crate::transport::http::error::{ApiError, Result as ApiResult};
use crate::transport::http::types::{
    AddQuestionRequest, AppState, CreateResponse, DeleteResponse, ErrorResponse, PageParams,
    QuestionsResponse, SearchRequest, SearchResponse,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/questions",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number (default 1)")
    ),
    responses(
        (status = 200, description = "One page of questions", body = QuestionsResponse),
        (status = 400, description = "Page is not a positive integer", body = ErrorResponse),
        (status = 404, description = "Page is empty", body = ErrorResponse)
    )
)]
pub async fn list_questions_handler(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<QuestionsResponse>> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let page = params.page_number()?;

    let listing = state.service.list_questions(page).await?;
    Ok(Json(QuestionsResponse {
        success: true,
        questions: listing.page.questions,
        total_questions: listing.page.total_questions,
        categories: category_map(&listing.categories),
        current_category: None,
    }))
}

#[utoipa::path(
    delete,
    path = "/questions/{id}",
    params(
        ("id" = i32, Path, description = "Question id")
    ),
    responses(
        (status = 200, description = "Question deleted", body = DeleteResponse),
        (status = 404, description = "Unknown question id", body = ErrorResponse),
        (status = 422, description = "Deletion failed", body = ErrorResponse)
    )
)]
pub async fn delete_question_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Path(id) = id.map_err(|e| ApiError::NotFound(e.to_string()))?;
    let deleted = state.service.delete_question(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        deleted,
    }))
}

#[utoipa::path(
    post,
    path = "/questions",
    request_body = AddQuestionRequest,
    responses(
        (status = 200, description = "Question created", body = CreateResponse),
        (status = 422, description = "Invalid question or insertion failed", body = ErrorResponse)
    )
)]
pub async fn add_question_handler(
    State(state): State<AppState>,
    request: Result<Json<AddQuestionRequest>, JsonRejection>,
) -> ApiResult<Json<CreateResponse>> {
    let Json(request) = request.map_err(|e| {
        ApiError::unprocessable_json(e, "{\"question\", \"answer\", \"difficulty\", \"category\"}")
    })?;
    let new_question = request.into_new_question()?;

    let created = state.service.add_question(new_question).await?;
    Ok(Json(CreateResponse {
        success: true,
        created: created.id,
    }))
}

#[utoipa::path(
    post,
    path = "/questions/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Questions whose text contains the term (case-insensitive)", body = SearchResponse),
        (status = 400, description = "Body is not valid JSON", body = ErrorResponse),
        (status = 404, description = "searchTerm missing or empty", body = ErrorResponse)
    )
)]
pub async fn search_questions_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> ApiResult<Json<SearchResponse>> {
    let Json(request) = request.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let term = request
        .search_term
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::NotFound("searchTerm is missing or empty".to_string()))?;

    let questions = state.service.search_questions(&term).await?;
    Ok(Json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}
