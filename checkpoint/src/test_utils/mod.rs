//! Shared helpers for tests running against a local Postgres instance.

pub mod database;
