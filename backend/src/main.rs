// src/main.rs

use std::{net::SocketAddr, str::FromStr, sync::Arc};

use dotenvy::dotenv;
use gyandeep::{
    ai::{GeminiClient, GenerativeModel},
    bank::QuestionBank,
    config::Config,
    routes,
    state::AppState,
    store::LocalStore,
    utils::hash::admin_account,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Local key/value store
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    let store = LocalStore::new(pool);

    tracing::info!("Running migrations...");
    store.migrate().await?;
    tracing::info!("Migrations applied successfully.");

    let admin = admin_account(
        config.admin_username.as_deref(),
        config.admin_password.as_deref(),
    )?;
    if admin.is_none() {
        tracing::warn!("ADMIN_USERNAME / ADMIN_PASSWORD not set, admin login is disabled");
    }

    let ai: Option<Arc<dyn GenerativeModel>> = match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(
                key,
                Some(config.gemini_model.clone()),
                Some(config.gemini_base_url.clone()),
            )?;
            tracing::info!("AI generator enabled with model {}", client.model());
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, AI features are disabled");
            None
        }
    };

    let bank = QuestionBank::seeded();
    tracing::info!(
        "Question bank seeded with {} questions in {} categories",
        bank.questions().len(),
        bank.categories().len()
    );

    let state = AppState {
        store,
        config: config.clone(),
        bank: bank.into_shared(),
        ai,
        admin,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
