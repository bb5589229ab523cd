use checkpoint::migrations::add_stage_column;
use checkpoint_postgres::db::connect_to_metadata_database;
use checkpoint_telemetry::init_tracing;
use tracing::info;

use crate::config::{load_admin_config, log_config};

mod config;

/// Number of database connections used for administrative statements.
const NUM_POOL_CONNECTIONS: u32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_name = env!("CARGO_BIN_NAME");

    // Load admin config
    let config = load_admin_config()?;

    // Initialize tracing
    let _log_flusher = init_tracing(app_name)?;

    log_config(&config);

    info!("connecting to the metadata database");

    let pool = connect_to_metadata_database(
        &config.pg_connection,
        NUM_POOL_CONNECTIONS,
        NUM_POOL_CONNECTIONS,
    )
    .await?;

    // The stage column ships with new deployments, this backfills older
    // position tables in place.
    add_stage_column(&pool, &config.position_store).await?;

    pool.close().await;

    info!("administration completed");

    Ok(())
}
