mod base;
mod connection;
mod store;

pub use base::*;
pub use connection::*;
pub use store::*;
