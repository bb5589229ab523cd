//! Durable and in-memory stores for pipeline resume positions.

pub mod base;
pub mod memory;
pub mod postgres;
