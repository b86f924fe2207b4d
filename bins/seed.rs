use std::sync::Arc;

use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info, warn};
use uuid::Uuid;

use configs::AppConfig;
use service::category::{repo::seaorm::SeaOrmCategoryRepository, CategoryService};

/// Connect, migrate and seed the default categories once.
async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(service = "catalog-seed", event = "migrated", "schema up to date");

    let categories = CategoryService::new(Arc::new(SeaOrmCategoryRepository::new(db)));
    if !cfg.catalog.seed_categories {
        info!(service = "catalog-seed", event = "seed_disabled", "catalog.seed_categories = false, skipping");
        return Ok(());
    }

    let created = categories.initialize_categories().await?;
    let listed = categories.get_categories(1, 10).await?;
    info!(service = "catalog-seed", event = "seeded", created, listed = listed.len(), "category seeding finished");
    Ok(())
}

fn main() -> std::process::ExitCode {
    dotenv().ok();

    // the config decides the log format, so read it before logging exists
    let loaded = AppConfig::load_and_validate();
    let format = loaded.as_ref().map(|c| c.catalog.log_format.as_str()).unwrap_or("compact");
    common::utils::logging::init_logging(format);

    let run_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "catalog-seed", event = "panic", %run_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match loaded {
        Ok(cfg) => cfg,
        // no usable config.toml; run on defaults + DATABASE_URL
        Err(file_err) => match AppConfig::from_env() {
            Ok(cfg) => {
                warn!(service = "catalog-seed", event = "config_fallback", error = %file_err, "config file not loaded, using environment");
                cfg
            }
            Err(e) => {
                error!(service = "catalog-seed", event = "config_invalid", file_error = %file_err, error = %e, "no usable configuration");
                return std::process::ExitCode::FAILURE;
            }
        },
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog-seed", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "catalog-seed", event = "start", %run_id, pid, version, "catalog seed starting");

    match rt.block_on(run(cfg)) {
        Ok(()) => {
            info!(service = "catalog-seed", event = "stop", %run_id, pid, "catalog seed finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "catalog-seed", event = "run_failed", error = %e, "catalog seed failed");
            std::process::ExitCode::FAILURE
        }
    }
}
