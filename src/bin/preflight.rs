use trivia_api::infra::config::{Settings, StoreBackend};
use trivia_api::infra::telemetry::init_tracing;
use trivia_api::storage::seed;
use trivia_api::{PgQuestionStore, QuestionStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--seed-if-empty]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DATABASE_MAX_CONNECTIONS, TRIVIA_STORE, BIND_ADDR, SEED_IF_EMPTY\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let seed_if_empty = args.iter().any(|a| a == "--seed-if-empty");

    // Force-read config (nice error messages if missing)
    let settings = Settings::from_env()?;
    if settings.store_backend == StoreBackend::Memory {
        tracing::info!("TRIVIA_STORE=memory: nothing to check");
        return Ok(());
    }

    tracing::info!(
        server.address = %settings.bind_addr,
        db.max_connections = settings.max_connections,
        "Preflight"
    );

    // Connecting also creates any missing tables.
    let store = PgQuestionStore::connect(settings.database_url()?, settings.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot reach the database: {}", e))?;
    store.ping().await?;
    tracing::info!("Database reachable, schema ready");

    if seed_if_empty && seed::seed_if_empty(&store).await? {
        tracing::info!("Seeded the empty database with the stock trivia data");
    }

    let categories = store.list_categories().await?;
    let questions = store.list_questions().await?;
    tracing::info!(
        categories.count = categories.len(),
        questions.count = questions.len(),
        "Store contents"
    );

    if categories.is_empty() {
        return Err(anyhow::anyhow!(
            "No categories stored; GET /categories would answer 404. Re-run with --seed-if-empty"
        ));
    }

    tracing::info!("Preflight OK");
    Ok(())
}
