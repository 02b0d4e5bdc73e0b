use crate::domain::quiz::QuizOutcome;
use crate::transport::http::error::{ApiError, Result as ApiResult};
use crate::transport::http::types::{AppState, ErrorResponse, QuizRequest, QuizResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

#[utoipa::path(
    post,
    path = "/quizzes",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next unseen question, or no question field once the quiz is exhausted", body = QuizResponse),
        (status = 400, description = "previous_questions missing or malformed", body = ErrorResponse),
        (status = 422, description = "quiz_category missing, malformed or unknown", body = ErrorResponse)
    )
)]
pub async fn play_quiz_handler(
    State(state): State<AppState>,
    request: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResult<Json<QuizResponse>> {
    let Json(request) = request.map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let play = request.validate()?;

    let question = match state
        .service
        .play_quiz(play.filter, &play.previous_questions)
        .await?
    {
        QuizOutcome::Question(question) => Some(question),
        QuizOutcome::Exhausted => None,
    };

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}
