//! Instruction handlers for the yield curve hook
//!
//! - `initialize` - Create the global configuration and set the owner (once)
//! - `initialize_pool` - Open an SY/PT pool for a fee tier (permissionless)
//! - `swap` - Trade SY for PT against the logit curve
//! - `liquidity` - Deposit and withdraw liquidity for LP shares
//! - `admin` - Owner-only curve tuning, ownership transfer and fee collection
//! - `view` - Quotes and reserve snapshots

pub mod admin;
pub mod initialize;
pub mod initialize_pool;
pub mod liquidity;
pub mod swap;
pub mod view;

pub use admin::*;
pub use initialize::*;
pub use initialize_pool::*;
pub use liquidity::*;
pub use swap::*;
pub use view::*;
