//! Operational entry point: load configuration, run migrations and
//! report per-entity row counts. Reads configuration from TOML file
//! (~/.config/dispatch-store/config.toml).

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use dispatch_store::domain::provider::RepositoryProvider;
use dispatch_store::infrastructure::database::migrator::Migrator;
use dispatch_store::{default_config_path, init_database, AppConfig, DatabaseConfig, SeaOrmStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("DISPATCH_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    let db = init_database(&db_config).await?;

    info!("Running migrations...");
    Migrator::up(&db, None).await?;
    info!("Migrations applied");

    // ── Store status ───────────────────────────────────────────
    let store = SeaOrmStore::new(db);
    info!("admins:            {}", store.admins().count(None).await?);
    info!("users:             {}", store.users().count(None).await?);
    info!("riders:            {}", store.riders().count(None).await?);
    info!("deliveries:        {}", store.deliveries().count(None).await?);
    info!(
        "operating areas:   {}",
        store.operating_areas().count(None).await?
    );
    info!(
        "bank details:      {}",
        store.bank_details().count(None).await?
    );
    info!(
        "rider ratings:     {}",
        store.rider_ratings().count(None).await?
    );
    info!(
        "rider credentials: {}",
        store.rider_credentials().count(None).await?
    );

    Ok(())
}
