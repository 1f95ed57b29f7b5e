//! Application bootstrap
//!
//! config -> logger -> database -> engine -> first reload

use crate::config::AppConfig;
use crate::engine::ListEngine;
use crate::repository::{open_database, SqliteItemStore};

/// Build a ready engine over the configured SQLite database
///
/// A failed first load leaves an empty mirror and a notice on the engine;
/// only configuration, log-directory and database-open failures abort.
pub async fn bootstrap(config: &AppConfig) -> Result<ListEngine<SqliteItemStore>, String> {
    let level = config.log_level_filter()?;
    std::fs::create_dir_all(&config.log_dir)
        .map_err(|e| format!("Failed to create log dir {}: {}", config.log_dir.display(), e))?;
    // A subscriber installed by the host (or an earlier bootstrap) keeps logging
    if let Err(e) =
        rolling_logger::init_logger_with_level(config.log_dir.clone(), &config.app_name, level)
    {
        log::debug!("Rolling logger not installed: {}", e);
    }

    log::info!("Opening database at {}", config.database_path.display());
    let conn = open_database(&config.database_path)?;
    let mut engine = ListEngine::new(SqliteItemStore::new(conn));

    match engine.reload().await {
        Ok(()) => {
            let _ = rolling_logger::info(&format!("Loaded {} items", engine.items().len()));
        }
        Err(e) => {
            let _ = rolling_logger::error(&format!("Initial load failed: {}", e));
        }
    }
    Ok(engine)
}
