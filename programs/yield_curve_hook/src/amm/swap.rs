//! # Swap Dispatcher
//!
//! Routes a swap request to the exact-input or exact-output path of the curve
//! and layers the pool fee on top.
//!
//! ```text
//!   direction   mode          specified     computed
//!   ─────────   ───────────   ───────────   ─────────────
//!   SY → PT     ExactInput    SY in         PT out
//!   SY → PT     ExactOutput   PT out        SY in
//!   PT → SY     any           rejected (UnsupportedDirection)
//! ```
//!
//! The fee is a fixed percentage of the SY input. It never enters the curve:
//! reserves only see the net input, the fee accrues to the protocol.

use anchor_lang::prelude::*;

use super::errors::AmmError;
use super::fixed_point::mul_div;
use crate::constants::BPS_DENOMINATOR;
use crate::state::Pool;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapDirection {
    /// Sell SY, receive PT
    SyToPt,
    /// Sell PT, receive SY (not priced by this curve)
    PtToSy,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SwapMode {
    /// The specified amount is what the trader pays
    ExactInput,
    /// The specified amount is what the trader receives
    ExactOutput,
}

/// Fully resolved swap, ready to be committed with `Pool::apply_swap`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SwapQuote {
    pub direction: SwapDirection,
    pub mode: SwapMode,
    /// Gross SY paid by the trader, fee included
    pub amount_in: u128,
    /// Portion of `amount_in` kept as protocol fee
    pub fee: u128,
    /// PT paid out of the pool
    pub amount_out: u128,
}

impl SwapQuote {
    /// The side of the trade the caller did not specify.
    pub fn amount_unspecified(&self) -> u128 {
        match self.mode {
            SwapMode::ExactInput => self.amount_out,
            SwapMode::ExactOutput => self.amount_in,
        }
    }
}

/// Prices a swap against the current pool state without mutating it.
pub fn compute_swap(
    pool: &Pool,
    direction: SwapDirection,
    mode: SwapMode,
    amount_specified: u128,
) -> Result<SwapQuote> {
    pool.ensure_initialized()?;
    require!(amount_specified > 0, AmmError::ZeroAmount);
    require!(
        direction == SwapDirection::SyToPt,
        AmmError::UnsupportedDirection
    );

    let curve = pool.curve()?;
    let fee_bps = pool.fee_bps as u128;

    let (amount_in, fee, amount_out) = match mode {
        SwapMode::ExactInput => {
            let fee = mul_div(amount_specified, fee_bps, BPS_DENOMINATOR)?;
            let net_in = amount_specified - fee;
            let amount_out = curve.exact_input(pool.reserve0, pool.reserve1, net_in)?;
            (amount_specified, fee, amount_out)
        }
        SwapMode::ExactOutput => {
            let net_in = curve.exact_output(pool.reserve0, pool.reserve1, amount_specified)?;
            let gross_in = gross_up(net_in, fee_bps)?;
            (gross_in, gross_in - net_in, amount_specified)
        }
    };

    Ok(SwapQuote {
        direction,
        mode,
        amount_in,
        fee,
        amount_out,
    })
}

/// PT received for `amount_in` SY, identical to an exact-input swap.
pub fn quote(pool: &Pool, amount_in: u128) -> Result<u128> {
    compute_swap(pool, SwapDirection::SyToPt, SwapMode::ExactInput, amount_in)
        .map(|quote| quote.amount_out)
}

// Smallest gross amount whose fee-deducted remainder covers `net`
fn gross_up(net: u128, fee_bps: u128) -> Result<u128> {
    if fee_bps == 0 {
        return Ok(net);
    }
    let kept = BPS_DENOMINATOR - fee_bps;
    let scaled = net.checked_mul(BPS_DENOMINATOR).ok_or(AmmError::Overflow)?;
    Ok(scaled.div_ceil(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WAD;

    fn pool(fee_bps: u16) -> Pool {
        let mut pool = Pool::new(0, Pubkey::new_unique(), Pubkey::new_unique(), fee_bps, 255);
        pool.reserve0 = 100 * WAD;
        pool.reserve1 = 90 * WAD;
        pool
    }

    #[test]
    fn test_exact_input_matches_curve() {
        let pool = pool(0);
        let result = compute_swap(&pool, SwapDirection::SyToPt, SwapMode::ExactInput, 10 * WAD)
            .unwrap();
        assert_eq!(result.amount_in, 10 * WAD);
        assert_eq!(result.fee, 0);
        assert_eq!(result.amount_out, 10_978_679_671_259_814_050);
        assert_eq!(result.amount_unspecified(), result.amount_out);
    }

    #[test]
    fn test_exact_output_matches_curve() {
        let pool = pool(0);
        let result = compute_swap(&pool, SwapDirection::SyToPt, SwapMode::ExactOutput, 10 * WAD)
            .unwrap();
        assert_eq!(result.amount_out, 10 * WAD);
        assert_eq!(result.amount_in, 9_107_770_728_197_125_819);
        assert_eq!(result.amount_unspecified(), result.amount_in);
    }

    #[test]
    fn test_reverse_direction_rejected() {
        let pool = pool(0);
        for mode in [SwapMode::ExactInput, SwapMode::ExactOutput] {
            assert_eq!(
                compute_swap(&pool, SwapDirection::PtToSy, mode, WAD).unwrap_err(),
                error!(AmmError::UnsupportedDirection)
            );
        }
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert_eq!(
            quote(&pool(0), 0).unwrap_err(),
            error!(AmmError::ZeroAmount)
        );
    }

    #[test]
    fn test_uninitialized_pool_rejected() {
        assert_eq!(
            quote(&Pool::default(), WAD).unwrap_err(),
            error!(AmmError::PoolNotInitialized)
        );
    }

    #[test]
    fn test_empty_pool_rejected() {
        let empty = Pool::new(0, Pubkey::new_unique(), Pubkey::new_unique(), 0, 255);
        assert_eq!(
            quote(&empty, WAD).unwrap_err(),
            error!(AmmError::InvalidPoolConfiguration)
        );
    }

    #[test]
    fn test_quote_is_idempotent() {
        let pool = pool(30);
        assert_eq!(quote(&pool, 7 * WAD).unwrap(), quote(&pool, 7 * WAD).unwrap());
    }

    #[test]
    fn test_exact_input_fee() {
        let with_fee = compute_swap(&pool(100), SwapDirection::SyToPt, SwapMode::ExactInput, 10 * WAD)
            .unwrap();
        assert_eq!(with_fee.fee, WAD / 10);

        // The curve sees only the net input
        let net = quote(&pool(0), 10 * WAD - WAD / 10).unwrap();
        assert_eq!(with_fee.amount_out, net);
    }

    #[test]
    fn test_exact_output_fee_grosses_up() {
        let no_fee = compute_swap(&pool(0), SwapDirection::SyToPt, SwapMode::ExactOutput, 10 * WAD)
            .unwrap();
        let with_fee = compute_swap(&pool(100), SwapDirection::SyToPt, SwapMode::ExactOutput, 10 * WAD)
            .unwrap();

        assert_eq!(with_fee.amount_in - with_fee.fee, no_fee.amount_in);
        // After the 1% fee is taken, the net still covers the curve input
        let fee_on_gross = with_fee.amount_in * 100 / 10_000;
        assert!(with_fee.amount_in - fee_on_gross >= no_fee.amount_in);
    }

    #[test]
    fn test_gross_up() {
        assert_eq!(gross_up(9_900, 100).unwrap(), 10_000);
        assert_eq!(gross_up(9_901, 100).unwrap(), 10_002);
        assert_eq!(gross_up(500, 0).unwrap(), 500);
    }
}
