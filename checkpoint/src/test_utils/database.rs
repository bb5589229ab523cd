use checkpoint_config::shared::{PgConnectionConfig, TlsConfig};
use checkpoint_postgres::tokio::test_utils::PgDatabase;
use uuid::Uuid;

/// Returns the [`PgConnectionConfig`] parameters to connect to the local instance of Postgres.
///
/// If you fail to connect locally to the Postgres instance you can modify this connection struct
/// with your parameters.
fn local_pg_connection_config() -> PgConnectionConfig {
    PgConnectionConfig {
        host: "localhost".to_owned(),
        port: 5430,
        // We create a random database name to avoid conflicts with existing databases.
        name: Uuid::new_v4().to_string(),
        username: "postgres".to_owned(),
        password: Some("postgres".to_owned().into()),
        tls: TlsConfig {
            trusted_root_certs: String::new(),
            enabled: false,
        },
    }
}

/// Creates a new metadata database with a unique name for a single test.
///
/// The database is dropped again when the returned handle goes out of scope,
/// so every test starts from an empty database.
pub async fn spawn_metadata_database() -> PgDatabase {
    let config = local_pg_connection_config();

    PgDatabase::new(config).await
}
