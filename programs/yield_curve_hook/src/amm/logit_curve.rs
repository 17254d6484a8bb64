//! # Logit Yield Curve
//!
//! Prices PT against SY from the share of the pool held as PT.
//!
//! ## The Curve
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │   portion = PT / (SY + PT)                                   │
//! │                                                              │
//! │   price   = ln(portion / (1 - portion)) / scalar + anchor    │
//! │                                                              │
//! │   Where:                                                     │
//! │   • price  = PT received per SY at the margin               │
//! │   • scalar = steepness (larger = flatter curve)             │
//! │   • anchor = price at a 50/50 pool                          │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Selling SY into the pool lowers the PT portion, which lowers the price:
//! every additional SY buys slightly less PT.
//!
//! ## Swap Integration
//!
//! Swaps are priced with a two-point trapezoid instead of a closed-form
//! integral of the curve:
//!
//! ```text
//! 1. p0  = price(now)
//! 2. est = reserves after trading at p0          (first-order estimate)
//! 3. p1  = price(est)
//! 4. out = in × (p0 + p1) / 2
//! ```
//!
//! Only SY → PT is priced. The reverse direction is rejected upstream.

use anchor_lang::prelude::*;

use super::errors::AmmError;
use super::fixed_point::{ln_wad, mul_div, to_positive};
use crate::constants::WAD;

/// Curve parameters for one pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogitCurve {
    pub rate_scalar: u64,
    pub rate_anchor: i128,
}

impl LogitCurve {
    pub fn new(rate_scalar: u64, rate_anchor: i128) -> Result<Self> {
        require!(rate_scalar != 0, AmmError::InvalidPoolConfiguration);
        Ok(Self {
            rate_scalar,
            rate_anchor,
        })
    }

    /// Fraction of the pool held as PT, in WAD.
    pub fn portion_pt(reserve_sy: u128, reserve_pt: u128) -> Result<u128> {
        let total = reserve_sy
            .checked_add(reserve_pt)
            .ok_or(AmmError::Overflow)?;
        require!(total > 0, AmmError::InvalidPoolConfiguration);

        mul_div(reserve_pt, WAD, total)
    }

    /// Marginal price (PT per SY) at the given reserves, in signed WAD.
    ///
    /// # Errors
    /// * `InvalidPoolConfiguration` - both reserves are zero
    /// * `MathError` - the pool is entirely PT
    ///
    /// # Example
    /// ```ignore
    /// // Balanced pool: ln(1) = 0, price is the anchor
    /// let curve = LogitCurve::new(100, 1_100_000_000_000_000_000)?;
    /// assert_eq!(curve.price(100 * WAD, 100 * WAD)?, 1_100_000_000_000_000_000);
    /// ```
    pub fn price(&self, reserve_sy: u128, reserve_pt: u128) -> Result<i128> {
        let portion = Self::portion_pt(reserve_sy, reserve_pt)?;

        if portion == 0 {
            return Ok(self.rate_anchor);
        }
        require!(portion < WAD, AmmError::MathError);

        let odds = mul_div(portion, WAD, WAD - portion)?;
        let log_odds = ln_wad(odds)?;

        (log_odds / self.rate_scalar as i128)
            .checked_add(self.rate_anchor)
            .ok_or_else(|| error!(AmmError::Overflow))
    }

    /// PT paid out for exactly `amount_in` SY.
    pub fn exact_input(&self, reserve_sy: u128, reserve_pt: u128, amount_in: u128) -> Result<u128> {
        let price_before = self.price(reserve_sy, reserve_pt)?;

        // Post-trade reserves if the whole trade cleared at the opening price
        let estimated_out = mul_div(amount_in, to_positive(price_before)?, WAD)?;
        let estimated_sy = reserve_sy
            .checked_add(amount_in)
            .ok_or(AmmError::Overflow)?;
        let estimated_pt = reserve_pt.saturating_sub(estimated_out);

        let price_after = self.price(estimated_sy, estimated_pt)?;
        let average = average_price(price_before, price_after)?;

        let amount_out = mul_div(amount_in, average, WAD)?;
        require!(amount_out <= reserve_pt, AmmError::InsufficientReserves);

        Ok(amount_out)
    }

    /// SY required to receive exactly `amount_out` PT.
    pub fn exact_output(&self, reserve_sy: u128, reserve_pt: u128, amount_out: u128) -> Result<u128> {
        require!(amount_out <= reserve_pt, AmmError::InsufficientReserves);

        let price_before = self.price(reserve_sy, reserve_pt)?;

        let estimated_in = mul_div(amount_out, WAD, to_positive(price_before)?)?;
        let estimated_sy = reserve_sy
            .checked_add(estimated_in)
            .ok_or(AmmError::Overflow)?;
        let estimated_pt = reserve_pt - amount_out;

        let price_after = self.price(estimated_sy, estimated_pt)?;
        let average = average_price(price_before, price_after)?;

        mul_div(amount_out, WAD, average)
    }
}

fn average_price(price_before: i128, price_after: i128) -> Result<u128> {
    let sum = price_before
        .checked_add(price_after)
        .ok_or(AmmError::Overflow)?;
    to_positive(sum / 2)
}
