use checkpoint_config::load_config;
use checkpoint_config::shared::{PgConnectionConfig, PositionStoreConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the checkpoint administration binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminConfig {
    /// Connection settings for the metadata database.
    pub pg_connection: PgConnectionConfig,
    /// Naming of the schema and tables that hold pipeline positions.
    #[serde(default)]
    pub position_store: PositionStoreConfig,
}

/// Loads the [`AdminConfig`] and validates it.
pub fn load_admin_config() -> anyhow::Result<AdminConfig> {
    let config = load_config::<AdminConfig>()?;
    config.pg_connection.tls.validate()?;
    config.position_store.validate()?;

    Ok(config)
}

pub fn log_config(config: &AdminConfig) {
    debug!(
        host = config.pg_connection.host,
        port = config.pg_connection.port,
        dbname = config.pg_connection.name,
        username = config.pg_connection.username,
        tls_enabled = config.pg_connection.tls.enabled,
        "pg connection config"
    );
    debug!(
        schema = config.position_store.schema,
        table = config.position_store.table,
        legacy_table = config.position_store.legacy_table,
        "position store config"
    );
}
