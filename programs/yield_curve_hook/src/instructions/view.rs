//! Read-Only Pool Queries
//!
//! Results are delivered through return data; no account is written.

use anchor_lang::prelude::*;

use crate::amm::{quote, to_token_amount};
use crate::state::{Pool, Reserves};

/// Accounts for read-only queries
#[derive(Accounts)]
pub struct PoolView<'info> {
    pub pool: Account<'info, Pool>,
}

impl<'info> PoolView<'info> {
    /// PT a swap of `amount_in` SY would pay out right now
    pub fn quote(&self, amount_in: u64) -> Result<u64> {
        to_token_amount(quote(&self.pool, amount_in as u128)?)
    }

    pub fn get_reserves(&self) -> Result<Reserves> {
        self.pool.ensure_initialized()?;
        Ok(self.pool.reserves())
    }
}
