use crate::domain::model::{Category, Question};
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::{categories, health, questions, quizzes};
use crate::transport::http::types::{
    AddQuestionRequest, AppState, CategoriesResponse, CategoryQuestionsResponse, CreateResponse,
    DeleteResponse, ErrorResponse, HealthResponse, QuestionsResponse, QuizRequest, QuizResponse,
    SearchRequest, SearchResponse,
};
use axum::http::{header, Method, Uri};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        categories::list_categories_handler,
        categories::category_questions_handler,
        questions::list_questions_handler,
        questions::delete_question_handler,
        questions::add_question_handler,
        questions::search_questions_handler,
        quizzes::play_quiz_handler
    ),
    components(schemas(
        Question,
        Category,
        AddQuestionRequest,
        SearchRequest,
        QuizRequest,
        ErrorResponse,
        HealthResponse,
        CategoriesResponse,
        CategoryQuestionsResponse,
        QuestionsResponse,
        SearchResponse,
        DeleteResponse,
        CreateResponse,
        QuizResponse
    ))
)]
pub struct ApiDoc;

/// Cross-origin access for the browser front end: any origin, the methods it uses.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri))
}

/// Known path, unsupported method. Keeps the error envelope on the 405.
async fn method_not_allowed_handler(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{} {}", method, uri))
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health::healthcheck_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/categories",
            get(categories::list_categories_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/categories/:id/questions",
            get(categories::category_questions_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/questions",
            get(questions::list_questions_handler)
                .post(questions::add_question_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/questions/:id",
            delete(questions::delete_question_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/questions/search",
            post(questions::search_questions_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/quizzes",
            post(quizzes::play_quiz_handler).fallback(method_not_allowed_handler),
        )
        .fallback(fallback_handler)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
