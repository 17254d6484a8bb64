use anchor_lang::prelude::*;

/// Errors raised by the curve math and reserve accounting
#[error_code]
pub enum AmmError {
    #[msg("Degenerate logarithm input or non-positive price")]
    MathError,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Pool has not been initialized")]
    PoolNotInitialized,
    #[msg("Invalid pool configuration")]
    InvalidPoolConfiguration,
    #[msg("Swap direction is not supported by this curve")]
    UnsupportedDirection,
    #[msg("Requested amount exceeds available reserves")]
    InsufficientReserves,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
}
