//! Protocol Constants
//!
//! Fixed-point scales, curve defaults and limits shared by the math core and
//! the instruction handlers.

// ============================================================================
// FIXED POINT
// ============================================================================

/// 1.0 in 18-decimal fixed point
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// ln(2) in 18-decimal fixed point
pub const LN_2: u128 = 693_147_180_559_945_309;

/// Basis points denominator (100% = 10000 bps)
pub const BPS_DENOMINATOR: u128 = 10_000;

// ============================================================================
// CURVE DEFAULTS
// ============================================================================

/// Rate scalar assigned to freshly initialized pools
pub const DEFAULT_RATE_SCALAR: u64 = 100;

/// Rate anchor assigned to freshly initialized pools (1.1 in WAD)
pub const DEFAULT_RATE_ANCHOR: i128 = 1_100_000_000_000_000_000;

// ============================================================================
// LIMITS
// ============================================================================

/// Shares locked in the burn sink on the first deposit
pub const MINIMUM_LIQUIDITY: u128 = 1_000;

/// Maximum swap fee (10%)
pub const MAX_FEE_BPS: u16 = 1_000;
