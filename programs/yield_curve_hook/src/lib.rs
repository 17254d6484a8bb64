//! # Yield Curve Hook: SY/PT Logit-Curve AMM
//!
//! A pool that trades a yield-bearing token (SY) for its principal token
//! (PT) along a logit-shaped curve.
//!
//! ## Overview
//!
//! - Prices come from `ln(p / (1 - p)) / scalar + anchor`, where `p` is the
//!   PT share of the reserves.
//! - Swaps are SY → PT only, in exact-input or exact-output mode.
//! - Liquidity providers hold LP shares minted by the pool. The first
//!   deposit locks a minimum amount of shares in an unspendable sink.
//! - One owner tunes the curve parameters and collects swap fees.
//!

use anchor_lang::prelude::*;

pub mod amm;
pub mod constants;
pub mod instructions;
pub mod state;

pub use constants::*;
pub use instructions::*;
pub use state::*;

pub use amm::{
    AddLiquidityOutcome, AddLiquidityParams, RemoveLiquidityOutcome, RemoveLiquidityParams,
    SwapDirection, SwapMode,
};

declare_id!("7YcHkLgTq3uVzWmN5pRx2eDfA9sB4oJvK6tC8yHiQnZa");

/// Yield curve hook program
#[program]
pub mod yield_curve_hook {
    use super::*;

    /// Create the global configuration and name the curve owner
    pub fn initialize(ctx: Context<Initialize>, owner: Pubkey) -> Result<()> {
        ctx.accounts.initialize(owner, &ctx.bumps)
    }

    /// Open an SY/PT pool with default curve parameters
    pub fn initialize_pool(ctx: Context<InitializePool>, fee_bps: u16) -> Result<()> {
        ctx.accounts.initialize_pool(fee_bps, &ctx.bumps)
    }

    /// Swap SY for PT; returns the unspecified amount
    pub fn swap(
        ctx: Context<Swap>,
        direction: SwapDirection,
        mode: SwapMode,
        amount_specified: u64,
        amount_limit: u64,
    ) -> Result<u64> {
        ctx.accounts
            .swap(direction, mode, amount_specified, amount_limit)
    }

    /// PT out for `amount_in` SY at current reserves
    pub fn quote(ctx: Context<PoolView>, amount_in: u64) -> Result<u64> {
        ctx.accounts.quote(amount_in)
    }

    /// Deposit SY and PT for LP shares
    pub fn add_liquidity(
        ctx: Context<AddLiquidity>,
        params: AddLiquidityParams,
    ) -> Result<AddLiquidityOutcome> {
        ctx.accounts.add_liquidity(params)
    }

    /// Burn LP shares for SY and PT
    pub fn remove_liquidity(
        ctx: Context<RemoveLiquidity>,
        params: RemoveLiquidityParams,
    ) -> Result<RemoveLiquidityOutcome> {
        ctx.accounts.remove_liquidity(params)
    }

    /// Current pool reserves
    pub fn get_reserves(ctx: Context<PoolView>) -> Result<Reserves> {
        ctx.accounts.get_reserves()
    }

    /// Retune the curve (owner only)
    pub fn set_pool_parameters(
        ctx: Context<SetPoolParameters>,
        rate_scalar: u64,
        rate_anchor: i128,
    ) -> Result<()> {
        ctx.accounts.set_pool_parameters(rate_scalar, rate_anchor)
    }

    /// Hand the hook to a new owner (owner only)
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_ownership(new_owner)
    }

    /// Move accrued swap fees to an SY account (owner only)
    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<u64> {
        ctx.accounts.collect_fees()
    }
}
