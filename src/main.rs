use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use locallibrary::infrastructure::AppState;
use locallibrary::{config, db, seed, server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locallibrary=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    let db = db::init_db(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to initialize database: {}", e);
        e
    })?;

    if config.seed_demo {
        tracing::info!("Seeding demo data...");
        if let Err(e) = seed::seed_demo_data(&AppState::new(db.clone())).await {
            tracing::error!("Failed to seed data: {}", e);
        }
    }

    server::serve(db, &config).await?;
    Ok(())
}
