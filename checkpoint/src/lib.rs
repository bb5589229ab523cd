pub mod migrations;
pub mod position;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
