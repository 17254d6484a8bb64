//! # 18-Decimal Fixed Point
//!
//! All curve quantities are integers scaled by `WAD = 10^18`, so `1.0` is
//! stored as `1_000_000_000_000_000_000`.
//!
//! ## Natural Logarithm
//!
//! `ln_wad` is an approximation, not an exact transcendental:
//!
//! ```text
//!   x <  1 :  ln(1 - z) ≈ -(z + z²/2)               z = 1 - x
//!   x >= 1 :  ln(x) = k·ln2 + ln(y),  y = x / 2^k ∈ [1, 2)
//!             ln(1 + z) ≈ z - z²/2 + z³/3          z = y - 1
//! ```
//!
//! Error profile:
//! - exact at 1.0 and at every power of two
//! - < 0.5% for inputs near 1.0
//! - 1–3% across 2..10^6, worst just below each power of two
//!
//! Every step truncates; callers must tolerate asymmetric rounding.

use anchor_lang::prelude::*;
use primitive_types::U256;

use super::errors::AmmError;
use crate::constants::{LN_2, WAD};

/// Computes `a * b / denominator` with a 256-bit intermediate product.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, AmmError::MathError);

    let result = U256::from(a) * U256::from(b) / U256::from(denominator);
    u128::try_from(result).map_err(|_| error!(AmmError::Overflow))
}

/// Natural logarithm of an unsigned WAD value, returned as a signed WAD.
///
/// # Errors
/// * `MathError` when `x == 0`
///
/// # Example
/// ```ignore
/// assert_eq!(ln_wad(WAD)?, 0);
/// assert_eq!(ln_wad(2 * WAD)?, LN_2 as i128);
/// assert!(ln_wad(WAD / 2)? < 0);
/// ```
pub fn ln_wad(x: u128) -> Result<i128> {
    require!(x > 0, AmmError::MathError);

    if x == WAD {
        return Ok(0);
    }

    if x < WAD {
        let z = WAD - x;
        let z_squared = z * z / WAD;
        let magnitude = z + z_squared / 2;
        return Ok(-to_signed(magnitude)?);
    }

    // Range reduction: pull out powers of two until y ∈ [1, 2)
    let mut y = x;
    let mut acc: u128 = 0;
    while y >= 2 * WAD {
        y /= 2;
        acc += LN_2;
    }

    // z < WAD, so every product stays below 1e36
    let z = y - WAD;
    let z_squared = z * z / WAD;
    let z_cubed = z_squared * z / WAD;
    let series = z - z_squared / 2 + z_cubed / 3;

    to_signed(acc + series)
}

/// Reinterprets a non-negative WAD as signed, failing on values above `i128::MAX`.
pub fn to_signed(value: u128) -> Result<i128> {
    i128::try_from(value).map_err(|_| error!(AmmError::Overflow))
}

/// Narrows a pool amount to an SPL token amount.
pub fn to_token_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::Overflow))
}

/// Converts a signed WAD that is used as a multiplier or divisor.
/// Zero and negative values are degenerate and rejected.
pub fn to_positive(value: i128) -> Result<u128> {
    require!(value > 0, AmmError::MathError);
    Ok(value as u128)
}
