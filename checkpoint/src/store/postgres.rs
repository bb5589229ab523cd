use checkpoint_config::shared::PositionStoreConfig;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, prelude::FromRow};
use tracing::{debug, info};

use crate::migrations::drop_legacy_table;
use crate::position::{Position, Stage};
use crate::store::base::{PositionStore, PositionStoreError};

#[derive(Debug, FromRow)]
struct PositionRow {
    stage: String,
    position: Option<String>,
    updated_at: DateTime<Utc>,
}

/// A position store backed by a table in a Postgres database.
///
/// Construction runs the schema bootstrap and is the only moment DDL is
/// issued. Afterwards every operation is a single statement against the
/// pool, so concurrent callers never need in-process coordination.
#[derive(Debug, Clone)]
pub struct PostgresPositionStore {
    pool: PgPool,
    config: PositionStoreConfig,
}

impl PostgresPositionStore {
    /// Creates a store on top of `pool`, bootstrapping the backing table.
    ///
    /// The store owns the pool and closes it in [`PositionStore::close`];
    /// callers that use the pool elsewhere should pass a clone. Bootstrap
    /// ensures the metadata schema exists, drops the legacy position table
    /// left behind by earlier releases, and creates the position table. Each
    /// step is idempotent and fatal on failure.
    pub async fn new(
        pool: PgPool,
        config: PositionStoreConfig,
    ) -> Result<PostgresPositionStore, PositionStoreError> {
        config.validate()?;

        let store = PostgresPositionStore { pool, config };
        store.bootstrap().await?;

        Ok(store)
    }

    async fn bootstrap(&self) -> Result<(), PositionStoreError> {
        debug!(
            schema = self.config.schema,
            table = self.config.table,
            "bootstrapping position store"
        );

        sqlx::query(&format!(
            "create schema if not exists {}",
            self.config.schema
        ))
        .execute(&self.pool)
        .await
        .map_err(|source| PositionStoreError::Bootstrap {
            step: "creating the metadata schema",
            source,
        })?;

        drop_legacy_table(&self.pool, &self.config).await?;

        sqlx::query(&format!(
            r#"
            create table if not exists {} (
                name varchar(255) primary key,
                stage varchar(20) not null default '{}',
                position text,
                created_at timestamptz not null default now(),
                updated_at timestamptz not null default now()
            )
            "#,
            self.config.position_table(),
            Stage::Unknown
        ))
        .execute(&self.pool)
        .await
        .map_err(|source| PositionStoreError::Bootstrap {
            step: "creating the position table",
            source,
        })?;

        info!(
            table = self.config.position_table(),
            "position store bootstrap complete"
        );

        Ok(())
    }

    fn position_from_row(
        &self,
        pipeline_name: &str,
        row: PositionRow,
    ) -> Result<Position, PositionStoreError> {
        let stage = row
            .stage
            .parse()
            .map_err(|source| PositionStoreError::CorruptStage {
                pipeline_name: pipeline_name.to_owned(),
                source,
            })?;

        let position = Position {
            name: pipeline_name.to_owned(),
            stage,
            // A null payload counts as empty and is caught by validation.
            value: row.position.unwrap_or_default(),
            update_time: Some(row.updated_at),
        };
        position.validate()?;

        Ok(position)
    }
}

impl PositionStore for PostgresPositionStore {
    async fn get_position(
        &self,
        pipeline_name: &str,
    ) -> Result<Option<Position>, PositionStoreError> {
        let row = sqlx::query_as::<_, PositionRow>(&format!(
            r#"
            select stage, position, updated_at
            from {}
            where name = $1
            "#,
            self.config.position_table()
        ))
        .bind(pipeline_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|source| PositionStoreError::Storage {
            operation: "get",
            pipeline_name: pipeline_name.to_owned(),
            source,
        })?;

        match row {
            Some(row) => Ok(Some(self.position_from_row(pipeline_name, row)?)),
            None => Ok(None),
        }
    }

    async fn put_position(
        &self,
        pipeline_name: &str,
        mut position: Position,
    ) -> Result<(), PositionStoreError> {
        position.name = pipeline_name.to_owned();
        position.validate()?;

        sqlx::query(&format!(
            r#"
            insert into {} (name, stage, position)
            values ($1, $2, $3)
            on conflict (name)
            do update set stage = excluded.stage, position = excluded.position, updated_at = now()
            "#,
            self.config.position_table()
        ))
        .bind(&position.name)
        .bind(position.stage.as_str())
        .bind(&position.value)
        .execute(&self.pool)
        .await
        .map_err(|source| PositionStoreError::Storage {
            operation: "put",
            pipeline_name: pipeline_name.to_owned(),
            source,
        })?;

        debug!(
            pipeline_name,
            stage = position.stage.as_str(),
            "stored position"
        );

        Ok(())
    }

    async fn delete_position(&self, pipeline_name: &str) -> Result<(), PositionStoreError> {
        let result = sqlx::query(&format!(
            "delete from {} where name = $1",
            self.config.position_table()
        ))
        .bind(pipeline_name)
        .execute(&self.pool)
        .await
        .map_err(|source| PositionStoreError::Storage {
            operation: "delete",
            pipeline_name: pipeline_name.to_owned(),
            source,
        })?;

        debug!(
            pipeline_name,
            rows_deleted = result.rows_affected(),
            "deleted position"
        );

        Ok(())
    }

    async fn close(&self) -> Result<(), PositionStoreError> {
        self.pool.close().await;

        Ok(())
    }
}
