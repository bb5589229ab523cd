use checkpoint_config::shared::{IntoConnectOptions, PgConnectionConfig};
use tokio::runtime::Handle;
use tokio_postgres::{Client, NoTls};
use tracing::info;

/// PostgreSQL database wrapper for tests.
///
/// Owns a database created on construction together with a client connected
/// to it. The database is dropped again when this instance goes out of
/// scope.
pub struct PgDatabase {
    pub config: PgConnectionConfig,
    pub client: Client,
}

impl PgDatabase {
    /// Creates a new test database with automatic cleanup.
    ///
    /// # Panics
    /// Panics if the database cannot be created.
    pub async fn new(config: PgConnectionConfig) -> Self {
        let client = create_pg_database(&config).await;

        Self { config, client }
    }

    /// Executes arbitrary SQL on the database.
    pub async fn run_sql(&self, sql: &str) -> Result<u64, tokio_postgres::Error> {
        self.client.execute(sql, &[]).await
    }
}

impl Drop for PgDatabase {
    fn drop(&mut self) {
        // To use `block_in_place,` we need a multithreaded runtime since when a blocking
        // task is issued, the runtime will offload existing tasks to another worker.
        tokio::task::block_in_place(move || {
            Handle::current().block_on(async move { drop_pg_database(&self.config).await });
        });
    }
}

/// Creates a new PostgreSQL database and returns a connected client.
///
/// Establishes a connection to the PostgreSQL server, creates a new database,
/// and returns a [`Client`] connected to the newly created database.
///
/// # Panics
/// Panics if connection or database creation fails.
pub async fn create_pg_database(config: &PgConnectionConfig) -> Client {
    // Create the database via a single connection
    let (client, connection) = {
        let config: tokio_postgres::Config = config.without_db();
        config
            .connect(NoTls)
            .await
            .expect("Failed to connect to Postgres")
    };

    // Spawn the connection on a new task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            info!("connection error: {e}");
        }
    });

    // Create the database
    client
        .execute(&*format!(r#"create database "{}";"#, config.name), &[])
        .await
        .expect("Failed to create database");

    // Connects to the actual Postgres database
    connect_to_pg_database(config).await
}

/// Connects to an existing PostgreSQL database.
///
/// Establishes a client connection to the database specified in the configuration.
/// Assumes the database already exists.
pub async fn connect_to_pg_database(config: &PgConnectionConfig) -> Client {
    // Create a new client connected to the created database
    let (client, connection) = {
        let config: tokio_postgres::Config = config.with_db();
        config
            .connect(NoTls)
            .await
            .expect("Failed to connect to Postgres")
    };

    // Spawn the connection on a new task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            info!("connection error: {e}");
        }
    });

    client
}

/// Drops a PostgreSQL database and cleans up all resources.
///
/// Terminates all active connections to the database before removing it, so
/// that pools still holding connections do not block the drop.
///
/// # Panics
/// Panics if any database operation fails.
pub async fn drop_pg_database(config: &PgConnectionConfig) {
    // Connect to the default database
    let (client, connection) = {
        let config: tokio_postgres::Config = config.without_db();
        config
            .connect(NoTls)
            .await
            .expect("Failed to connect to Postgres")
    };

    // Spawn the connection on a new task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            info!("connection error: {e}");
        }
    });

    // Forcefully terminate any remaining connections to the database
    client
        .execute(
            &format!(
                r#"
                select pg_terminate_backend(pg_stat_activity.pid)
                from pg_stat_activity
                where pg_stat_activity.datname = '{}'
                and pid <> pg_backend_pid();"#,
                config.name
            ),
            &[],
        )
        .await
        .expect("Failed to terminate database connections");

    // Drop the database
    client
        .execute(
            &format!(r#"drop database if exists "{}";"#, config.name),
            &[],
        )
        .await
        .expect("Failed to destroy database");
}
