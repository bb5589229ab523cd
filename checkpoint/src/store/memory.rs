use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::position::Position;
use crate::store::base::{PositionStore, PositionStoreError};

#[derive(Debug)]
struct Inner {
    positions: HashMap<String, Position>,
}

/// A position store which keeps positions in process memory.
///
/// Useful in tests and for pipelines that can afford to restart from
/// scratch. Clones share their contents.
#[derive(Debug, Clone)]
pub struct MemoryPositionStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        let inner = Inner {
            positions: HashMap::new(),
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }
}

impl Default for MemoryPositionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionStore for MemoryPositionStore {
    async fn get_position(
        &self,
        pipeline_name: &str,
    ) -> Result<Option<Position>, PositionStoreError> {
        let inner = self.inner.lock().await;

        Ok(inner.positions.get(pipeline_name).cloned())
    }

    async fn put_position(
        &self,
        pipeline_name: &str,
        mut position: Position,
    ) -> Result<(), PositionStoreError> {
        position.name = pipeline_name.to_owned();
        position.validate()?;
        position.update_time = Some(Utc::now());

        let mut inner = self.inner.lock().await;
        inner.positions.insert(pipeline_name.to_owned(), position);

        Ok(())
    }

    async fn delete_position(&self, pipeline_name: &str) -> Result<(), PositionStoreError> {
        let mut inner = self.inner.lock().await;
        inner.positions.remove(pipeline_name);

        Ok(())
    }

    async fn close(&self) -> Result<(), PositionStoreError> {
        Ok(())
    }
}
