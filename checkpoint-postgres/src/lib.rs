//! Postgres connection utilities for the checkpoint crates.
//!
//! Provides pool construction on top of [`sqlx`] and, behind the `tokio`
//! feature, a [`tokio_postgres`] layer with database management utilities
//! for tests.

pub mod db;
#[cfg(feature = "tokio")]
pub mod tokio;
