//! State structures for the yield curve hook

pub mod config;
pub mod pool;

pub use config::*;
pub use pool::*;
