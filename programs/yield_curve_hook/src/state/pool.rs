//! SY/PT Pool State
//!
//! One pool per (SY mint, PT mint, fee) triple. The pool tracks both reserves,
//! the curve parameters and a mirror of the LP share supply.

use anchor_lang::prelude::*;

use crate::amm::{AmmError, LogitCurve, SwapQuote};
use crate::constants::{DEFAULT_RATE_ANCHOR, DEFAULT_RATE_SCALAR};

/// Pool account
///
/// Seeds: ["pool", sy_mint, pt_mint, fee_bps.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Pool {
    /// Sequential pool identifier
    pub id: u64,

    /// SY mint (token 0, the only accepted swap input)
    pub currency0: Pubkey,

    /// PT mint (token 1)
    pub currency1: Pubkey,

    /// Swap fee in basis points, charged on the SY input
    pub fee_bps: u16,

    /// SY held on behalf of liquidity providers
    pub reserve0: u128,

    /// PT held on behalf of liquidity providers
    pub reserve1: u128,

    /// Curve steepness, never zero
    pub rate_scalar: u64,

    /// Curve offset in signed WAD
    pub rate_anchor: i128,

    /// LP shares outstanding, including the locked minimum
    pub total_shares: u128,

    /// SY fees accrued outside the reserves
    pub protocol_fees0: u128,

    /// LP share mint
    pub lp_mint: Pubkey,

    /// SY vault (ATA of the pool)
    pub sy_vault: Pubkey,

    /// PT vault (ATA of the pool)
    pub pt_vault: Pubkey,

    /// LP token account owned by the zero identity
    pub lp_sink: Pubkey,

    /// Set while shares are being minted
    pub locked: bool,

    /// PDA bump seed
    pub bump: u8,
}

/// Snapshot of both reserves
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reserves {
    pub reserve0: u128,
    pub reserve1: u128,
}

impl Pool {
    pub const SEED: &'static [u8] = b"pool";
    pub const LP_MINT_SEED: &'static [u8] = b"lp_mint";

    /// Fresh pool record with empty reserves and default curve parameters.
    pub fn new(id: u64, currency0: Pubkey, currency1: Pubkey, fee_bps: u16, bump: u8) -> Self {
        Self {
            id,
            currency0,
            currency1,
            fee_bps,
            rate_scalar: DEFAULT_RATE_SCALAR,
            rate_anchor: DEFAULT_RATE_ANCHOR,
            bump,
            ..Default::default()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.currency0 != Pubkey::default() && self.currency1 != Pubkey::default()
    }

    pub fn ensure_initialized(&self) -> Result<()> {
        require!(self.is_initialized(), AmmError::PoolNotInitialized);
        Ok(())
    }

    pub fn reserves(&self) -> Reserves {
        Reserves {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
        }
    }

    pub fn curve(&self) -> Result<LogitCurve> {
        LogitCurve::new(self.rate_scalar, self.rate_anchor)
    }

    /// Replaces the curve parameters. Ownership is checked by the caller.
    pub fn set_parameters(&mut self, rate_scalar: u64, rate_anchor: i128) -> Result<()> {
        self.ensure_initialized()?;
        let curve = LogitCurve::new(rate_scalar, rate_anchor)?;

        self.rate_scalar = curve.rate_scalar;
        self.rate_anchor = curve.rate_anchor;
        Ok(())
    }

    /// Commits a computed swap: net input into reserve0, output out of
    /// reserve1, fee into the protocol bucket.
    pub fn apply_swap(&mut self, quote: &SwapQuote) -> Result<()> {
        let net_in = quote
            .amount_in
            .checked_sub(quote.fee)
            .ok_or(AmmError::Overflow)?;
        let reserve0 = self
            .reserve0
            .checked_add(net_in)
            .ok_or(AmmError::Overflow)?;
        let reserve1 = self
            .reserve1
            .checked_sub(quote.amount_out)
            .ok_or(AmmError::InsufficientReserves)?;
        let protocol_fees0 = self
            .protocol_fees0
            .checked_add(quote.fee)
            .ok_or(AmmError::Overflow)?;

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.protocol_fees0 = protocol_fees0;
        Ok(())
    }

    /// Drains the accrued protocol fees.
    pub fn take_protocol_fees(&mut self) -> u128 {
        std::mem::take(&mut self.protocol_fees0)
    }
}
