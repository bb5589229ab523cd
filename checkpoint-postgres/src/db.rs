use checkpoint_config::shared::{IntoConnectOptions, PgConnectionConfig};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connects to the metadata database holding the position tables.
///
/// The pool is sized by the caller. Position stores issue a single statement
/// per operation, so small pools go a long way.
pub async fn connect_to_metadata_database(
    config: &PgConnectionConfig,
    min_connections: u32,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options = config.with_db();

    let pool = PgPoolOptions::new()
        .min_connections(min_connections)
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
