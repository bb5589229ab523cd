use std::future::Future;

use checkpoint_config::shared::ValidationError;
use thiserror::Error;

use crate::position::{ParseStageError, Position, PositionValidationError};

/// Errors returned by position store operations.
#[derive(Debug, Error)]
pub enum PositionStoreError {
    /// A statement against the backing store failed.
    #[error("position store {operation} failed for pipeline '{pipeline_name}': {source}")]
    Storage {
        operation: &'static str,
        pipeline_name: String,
        #[source]
        source: sqlx::Error,
    },

    /// A schema bootstrap step failed while constructing the store.
    #[error("position store bootstrap failed while {step}: {source}")]
    Bootstrap {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A schema migration statement failed.
    #[error("position store migration failed while {step}: {source}")]
    Migration {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// The position was rejected before reaching the backing store.
    #[error(transparent)]
    InvalidPosition(#[from] PositionValidationError),

    /// A stored row carries a stage string the store does not know.
    #[error("stored position for pipeline '{pipeline_name}' is corrupt: {source}")]
    CorruptStage {
        pipeline_name: String,
        #[source]
        source: ParseStageError,
    },

    /// The table naming configuration is not usable.
    #[error("invalid position store configuration: {0}")]
    Config(#[from] ValidationError),
}

/// A store for the durable resume positions of replication pipelines.
///
/// A store keeps at most one position per pipeline name and overwrites it
/// atomically on every write. Absence is not an error: reading a name that
/// was never written yields `Ok(None)` and deleting it yields `Ok(())`.
pub trait PositionStore {
    /// Returns the stored position for `pipeline_name`, or `None` when the
    /// pipeline has never stored one.
    ///
    /// A returned position is fully populated, including the write timestamp
    /// assigned by the store, and has already passed validation.
    fn get_position(
        &self,
        pipeline_name: &str,
    ) -> impl Future<Output = Result<Option<Position>, PositionStoreError>> + Send;

    /// Inserts or overwrites the position for `pipeline_name` in a single
    /// atomic statement.
    ///
    /// The name carried inside `position` is replaced with `pipeline_name`
    /// before validation, so the storage key always matches the lookup key.
    /// An invalid position is rejected before anything reaches the backing
    /// store.
    fn put_position(
        &self,
        pipeline_name: &str,
        position: Position,
    ) -> impl Future<Output = Result<(), PositionStoreError>> + Send;

    /// Removes the stored position for `pipeline_name`.
    ///
    /// Removing a position that does not exist is not an error.
    fn delete_position(
        &self,
        pipeline_name: &str,
    ) -> impl Future<Output = Result<(), PositionStoreError>> + Send;

    /// Releases the resources held by the store.
    ///
    /// Call once at shutdown. The behavior of the other methods after
    /// closing is undefined.
    fn close(&self) -> impl Future<Output = Result<(), PositionStoreError>> + Send;
}
