//! Explicit schema migrations for the position store.
//!
//! Bootstrap handles everything a fresh deployment needs; the operations
//! here cover databases carrying tables from earlier releases.

use checkpoint_config::shared::PositionStoreConfig;
use sqlx::PgPool;
use tracing::info;

use crate::position::Stage;
use crate::store::base::PositionStoreError;

/// Drops the historical position table left behind by earlier releases.
///
/// Invoked by store bootstrap and safe to run on databases that never had
/// the table.
pub async fn drop_legacy_table(
    pool: &PgPool,
    config: &PositionStoreConfig,
) -> Result<(), PositionStoreError> {
    config.validate()?;

    info!(
        table = config.legacy_position_table(),
        "dropping legacy position table if present"
    );

    sqlx::query(&format!(
        "drop table if exists {}",
        config.legacy_position_table()
    ))
    .execute(pool)
    .await
    .map_err(|source| PositionStoreError::Migration {
        step: "dropping the legacy table",
        source,
    })?;

    Ok(())
}

/// Adds the stage column to position tables created before stages existed.
///
/// Existing rows default to the stream stage, since deployments predating
/// the column were already streaming. The statement is idempotent. Nothing
/// runs this automatically: altering a live table is left to an operator,
/// through the admin binary.
pub async fn add_stage_column(
    pool: &PgPool,
    config: &PositionStoreConfig,
) -> Result<(), PositionStoreError> {
    config.validate()?;

    info!(
        table = config.position_table(),
        "adding the stage column to the position table"
    );

    sqlx::query(&format!(
        "alter table {} add column if not exists stage varchar(20) not null default '{}'",
        config.position_table(),
        Stage::Stream
    ))
    .execute(pool)
    .await
    .map_err(|source| PositionStoreError::Migration {
        step: "adding the stage column",
        source,
    })?;

    info!("stage column is in place");

    Ok(())
}
