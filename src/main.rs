use tracing_subscriber::EnvFilter;

use studio_api::config::AppConfig;
use studio_api::database;
use studio_api::router::build_router;
use studio_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("studio_api=debug,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let pool = database::connect(&config.database_url).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("Database ready at {}", config.database_url);

    // Provision a default admin when the credential store is empty.
    let admin_user = std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".into());
    let admin_pass = std::env::var("ADMIN_PASS").unwrap_or_else(|_| "admin".into());
    database::bootstrap_admin(&pool, &admin_user, &admin_pass).await?;

    let bind_addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("studio-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
