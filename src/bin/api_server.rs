// src/bin/api_server.rs

use std::sync::Arc;
use trivia_api::infra::config::{Settings, StoreBackend};
use trivia_api::infra::telemetry::init_tracing;
use trivia_api::storage::seed;
use trivia_api::transport;
use trivia_api::{InMemoryQuestionStore, PgQuestionStore, QuestionStore, TriviaService};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::from_env()?;
    tracing::info!(
        store.backend = ?settings.store_backend,
        server.address = %settings.bind_addr,
        seed_if_empty = settings.seed_if_empty,
        "Configuration loaded"
    );

    // --- Store Initialization ---
    let store: Arc<dyn QuestionStore> = match settings.store_backend {
        StoreBackend::Postgres => {
            let store =
                PgQuestionStore::connect(settings.database_url()?, settings.max_connections)
                    .await?;
            tracing::info!(
                db.max_connections = settings.max_connections,
                "Connected to Postgres"
            );
            Arc::new(store)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on shutdown");
            Arc::new(InMemoryQuestionStore::new())
        }
    };

    if settings.seed_if_empty {
        seed::seed_if_empty(store.as_ref()).await?;
    }

    let app_state = transport::http::AppState {
        service: TriviaService::new(store),
    };

    // --- API Server Initialization ---
    let app = transport::http::create_router(app_state).merge(
        SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
    );
    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(server.address = %settings.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                return;
            }
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}
