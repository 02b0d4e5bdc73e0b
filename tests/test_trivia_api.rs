//! End-to-end API test: serve the router over the stock data set (in-memory
//! store) on an ephemeral port and drive every endpoint with reqwest.

use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinHandle;
use trivia_api::storage::{StoreError, StoreResult};
use trivia_api::{
    transport, Category, InMemoryQuestionStore, NewQuestion, Question, QuestionStore,
    TriviaService,
};

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    store: Arc<InMemoryQuestionStore>,
    server: JoinHandle<()>,
}

impl TestApp {
    async fn spawn_with(store: InMemoryQuestionStore) -> Self {
        let store = Arc::new(store);
        Self::spawn_over(store.clone(), store).await
    }

    /// Serves `backend`; `store` is the data behind it, for direct inspection.
    async fn spawn_over(
        backend: Arc<dyn QuestionStore>,
        store: Arc<InMemoryQuestionStore>,
    ) -> Self {
        let app_state = transport::http::AppState {
            service: TriviaService::new(backend),
        };
        let router = transport::http::create_router(app_state);

        // Bind to an ephemeral port so tests can run in parallel.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            store,
            server,
        }
    }

    async fn spawn() -> Self {
        Self::spawn_with(InMemoryQuestionStore::seeded()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.delete(self.url(path)).send().await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

/// Stock data for reads, but the database is unreachable for health checks
/// and every delete loses the race to another client.
struct DegradedStore(Arc<InMemoryQuestionStore>);

#[async_trait::async_trait]
impl QuestionStore for DegradedStore {
    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        self.0.list_categories().await
    }
    async fn get_category(&self, id: i32) -> StoreResult<Option<Category>> {
        self.0.get_category(id).await
    }
    async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        self.0.list_questions().await
    }
    async fn get_question(&self, id: i32) -> StoreResult<Option<Question>> {
        self.0.get_question(id).await
    }
    async fn questions_by_category(&self, category: i32) -> StoreResult<Vec<Question>> {
        self.0.questions_by_category(category).await
    }
    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        self.0.search_questions(term).await
    }
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<Question> {
        self.0.insert_question(question).await
    }
    async fn delete_question(&self, _id: i32) -> StoreResult<bool> {
        Ok(false)
    }
    async fn load_seed(&self, categories: &[Category], questions: &[Question]) -> StoreResult<()> {
        self.0.load_seed(categories, questions).await
    }
}

impl TestApp {
    async fn spawn_degraded() -> Self {
        let store = Arc::new(InMemoryQuestionStore::seeded());
        Self::spawn_over(Arc::new(DegradedStore(store.clone())), store).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn assert_error(status: StatusCode, body: &Value, expected: StatusCode, message: &str) {
    assert_eq!(status, expected, "body: {}", body);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(expected.as_u16()));
    assert_eq!(body["message"], json!(message));
}

#[tokio::test]
async fn test_get_categories() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
    assert_eq!(body["categories"]["2"], json!("Art"));
}

#[tokio::test]
async fn test_get_categories_empty_store_404() {
    let app = TestApp::spawn_with(InMemoryQuestionStore::new()).await;
    let (status, body) = app.get("/categories").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_get_pagination() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["total_questions"], json!(19));
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
    assert_eq!(body["current_category"], Value::Null);
    assert_eq!(body["questions"][0]["id"], json!(2));

    let (status, body) = app.get("/questions?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_question_shape() {
    let app = TestApp::spawn().await;
    let (_, body) = app.get("/categories/4/questions").await;
    let question = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|q| q["id"] == json!(9))
        .unwrap()
        .clone();
    assert_eq!(
        question,
        json!({
            "id": 9,
            "question": "What boxer's original name is Cassius Clay?",
            "answer": "Muhammad Ali",
            "category": 4,
            "difficulty": 1
        })
    );
}

#[tokio::test]
async fn test_get_page_not_found_404() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/questions?page=1000").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_non_positive_page_400() {
    let app = TestApp::spawn().await;
    for path in ["/questions?page=0", "/questions?page=-2", "/questions?page=abc"] {
        let (status, body) = app.get(path).await;
        assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad request");
    }
}

#[tokio::test]
async fn test_empty_page_param_is_first_page() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/questions?page=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"][0]["id"], json!(2));
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_delete_question() {
    let app = TestApp::spawn().await;
    let created = app
        .store
        .insert_question(
            trivia_api::NewQuestion::new(
                "delete question".to_string(),
                "delete answer".to_string(),
                1,
                1,
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let (status, body) = app.delete(&format!("/questions/{}", created.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["deleted"], json!(created.id));
    assert_eq!(app.store.get_question(created.id).await.unwrap(), None);

    // Gone for good.
    let (status, body) = app.delete(&format!("/questions/{}", created.id)).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_delete_invalid_question_404() {
    let app = TestApp::spawn().await;
    let (status, body) = app.delete("/questions/asdasdasd").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");

    let (status, body) = app.delete("/questions/100000").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_delete_store_failure_422() {
    let app = TestApp::spawn().await;
    app.store.set_fail_writes(true);
    let (status, body) = app.delete("/questions/9").await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable");
    assert!(app.store.get_question(9).await.unwrap().is_some());
}

#[tokio::test]
async fn test_new_question() {
    let app = TestApp::spawn().await;
    let before = app.store.list_questions().await.unwrap().len();

    let (status, body) = app
        .post(
            "/questions",
            json!({
                "question": "new question test",
                "answer": "new answer test",
                "difficulty": 1,
                "category": 1
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["success"], json!(true));
    let new_id = body["created"].as_i64().unwrap();

    let after = app.store.list_questions().await.unwrap();
    assert_eq!(after.len(), before + 1);

    // The fresh row lands on the last page of the full listing.
    let (status, body) = app.get("/questions?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(20));
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|q| q["id"].as_i64() == Some(new_id) && q["question"] == json!("new question test")));
}

#[tokio::test]
async fn test_new_question_empty_answer_422() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post(
            "/questions",
            json!({
                "question": "question without answer",
                "answer": "       ",
                "category": 1,
                "difficulty": 1
            }),
        )
        .await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable");
    assert_eq!(app.store.list_questions().await.unwrap().len(), 19);
}

#[tokio::test]
async fn test_new_question_invalid_payloads_422() {
    let app = TestApp::spawn().await;
    let payloads = [
        json!({ "answer": "A", "category": 1, "difficulty": 1 }),
        json!({ "question": "Q", "answer": "A", "category": 1, "difficulty": 9 }),
        json!({ "question": "Q", "answer": "A", "category": "art", "difficulty": 1 }),
        json!({ "question": 5, "answer": "A", "category": 1, "difficulty": 1 }),
    ];
    for payload in payloads {
        let (status, body) = app.post("/questions", payload).await;
        assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable");
    }
}

#[tokio::test]
async fn test_new_question_store_failure_422() {
    let app = TestApp::spawn().await;
    app.store.set_fail_writes(true);
    let (status, body) = app
        .post(
            "/questions",
            json!({ "question": "Q", "answer": "A", "category": 1, "difficulty": 1 }),
        )
        .await;
    assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable");
}

#[tokio::test]
async fn test_new_question_with_orphaned_category() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post(
            "/questions",
            json!({ "question": "Q", "answer": "A", "category": 77, "difficulty": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);

    let (status, body) = app.get("/categories/77/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(1));
}

#[tokio::test]
async fn test_get_questions_from_category() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/categories/2/questions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["total_questions"], json!(4));
    assert_eq!(body["current_category"], json!(2));
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|q| q["category"] == json!(2)));
}

#[tokio::test]
async fn test_get_questions_from_category_404() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/categories/1000/questions").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");

    let (status, body) = app.get("/categories/2/questions?page=2").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");

    let (status, body) = app.get("/categories/art/questions").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post("/questions/search", json!({ "searchTerm": "boxer" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["questions"][0]["id"], json!(9));
    assert_eq!(body["total_questions"], json!(1));

    let (_, upper) = app
        .post("/questions/search", json!({ "searchTerm": "BOXER" }))
        .await;
    assert_eq!(upper, body);
}

#[tokio::test]
async fn test_search_is_ordered_and_literal() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post("/questions/search", json!({ "searchTerm": "title" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    // "entitled" (5) and "title" (6).
    assert_eq!(ids, vec![5, 6]);

    let (status, body) = app
        .post("/questions/search", json!({ "searchTerm": "%" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], json!(0));
}

#[tokio::test]
async fn test_search_missing_term_404() {
    let app = TestApp::spawn().await;
    for payload in [json!({}), json!({ "searchTerm": "" })] {
        let (status, body) = app.post("/questions/search", payload).await;
        assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
    }
}

#[tokio::test]
async fn test_play_quiz() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post(
            "/quizzes",
            json!({
                "previous_questions": [],
                "quiz_category": {"type": "Art", "id": 2}
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["question"]["category"], json!(2));
}

#[tokio::test]
async fn test_play_quiz_until_exhausted() {
    let app = TestApp::spawn().await;
    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..4 {
        let (status, body) = app
            .post(
                "/quizzes",
                json!({
                    "previous_questions": previous,
                    "quiz_category": {"type": "Art", "id": 2}
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(!previous.contains(&id));
        previous.push(id);
    }

    let (status, body) = app
        .post(
            "/quizzes",
            json!({
                "previous_questions": previous,
                "quiz_category": {"type": "Art", "id": 2}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let seen: HashSet<i64> = previous.into_iter().collect();
    let art: HashSet<i64> = [16, 17, 18, 19].into_iter().collect();
    assert_eq!(seen, art);
}

#[tokio::test]
async fn test_play_quiz_all_categories() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post(
            "/quizzes",
            json!({
                "previous_questions": [16, 17, 18, 19],
                "quiz_category": {"type": "click", "id": 0}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["question"]["category"], json!(2));
}

#[tokio::test]
async fn test_play_quiz_422() {
    let app = TestApp::spawn().await;
    let payloads = [
        json!({ "previous_questions": [0], "quiz_category": {"type": "Geography"} }),
        json!({ "previous_questions": [] }),
        json!({ "previous_questions": [], "quiz_category": {"type": "Nope", "id": 99} }),
    ];
    for payload in payloads {
        let (status, body) = app.post("/quizzes", payload).await;
        assert_error(status, &body, StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable");
    }
}

#[tokio::test]
async fn test_play_quiz_400() {
    let app = TestApp::spawn().await;
    let payloads = [
        json!({ "quiz_category": {"type": "Art", "id": 2} }),
        json!({ "quiz_category": {"type": "Art", "id": 2}, "previous_questions": "16" }),
    ];
    for payload in payloads {
        let (status, body) = app.post("/quizzes", payload).await;
        assert_error(status, &body, StatusCode::BAD_REQUEST, "Bad request");
    }
}

#[tokio::test]
async fn test_play_quiz_with_out_of_range_history_id() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .post(
            "/quizzes",
            json!({
                "previous_questions": [3_000_000_000i64, 16, 17, 18],
                "quiz_category": {"type": "Art", "id": 2}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["question"]["id"], json!(19));
}

#[tokio::test]
async fn test_unknown_route_404() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/nope").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_wrong_method_405() {
    let app = TestApp::spawn().await;
    let cases = [
        (reqwest::Method::PUT, "/questions"),
        (reqwest::Method::GET, "/quizzes"),
        (reqwest::Method::POST, "/categories"),
        (reqwest::Method::GET, "/questions/9"),
    ];
    for (method, path) in cases {
        let res = app.client.request(method, app.url(path)).send().await.unwrap();
        let status = res.status();
        let body: Value = res.json().await.unwrap();
        assert_error(status, &body, StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }
}

#[tokio::test]
async fn test_delete_lost_race_404() {
    let app = TestApp::spawn_degraded().await;
    let (status, body) = app.delete("/questions/5").await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Not found");
}

#[tokio::test]
async fn test_health_store_unreachable_503() {
    let app = TestApp::spawn_degraded().await;
    let (status, body) = app.get("/health").await;
    assert_error(status, &body, StatusCode::SERVICE_UNAVAILABLE, "Service unavailable");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "status": "ok" }));
}

#[tokio::test]
async fn test_cors_headers() {
    let app = TestApp::spawn().await;
    let res = app
        .client
        .get(app.url("/categories"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let preflight = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/questions/9"))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "DELETE")
        .send()
        .await
        .unwrap();
    assert!(preflight.status().is_success());
    let methods = preflight
        .headers()
        .get("access-control-allow-methods")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    for method in ["GET", "POST", "PATCH", "DELETE"] {
        assert!(methods.contains(method), "missing {} in {}", method, methods);
    }
}
