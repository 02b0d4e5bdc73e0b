use crate::domain::model::category_map;
use crate::transport::http::error::{ApiError, Result as ApiResult};
use crate::transport::http::types::{
    AppState, CategoriesResponse, CategoryQuestionsResponse, ErrorResponse, PageParams,
};
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories as {id: type}", body = CategoriesResponse),
        (status = 404, description = "No categories stored", body = ErrorResponse)
    )
)]
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.service.list_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

#[utoipa::path(
    get,
    path = "/categories/{id}/questions",
    params(
        ("id" = i32, Path, description = "Category id"),
        ("page" = Option<i64>, Query, description = "1-based page number (default 1)")
    ),
    responses(
        (status = 200, description = "One page of the category's questions", body = CategoryQuestionsResponse),
        (status = 400, description = "Page is not a positive integer", body = ErrorResponse),
        (status = 404, description = "Page is empty or category id is not an integer", body = ErrorResponse)
    )
)]
pub async fn category_questions_handler(
    State(state): State<AppState>,
    category: Result<Path<i32>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let Path(category) = category.map_err(|e| ApiError::NotFound(e.to_string()))?;
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let page = params.page_number()?;

    let result = state.service.category_questions(category, page).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: result.questions,
        total_questions: result.total_questions,
        current_category: category,
    }))
}
