//! Hook Configuration
//!
//! This account holds the single privileged identity allowed to tune curve
//! parameters and collect protocol fees.

use anchor_lang::prelude::*;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["hook_config"]
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct HookConfig {
    /// Curve owner
    pub owner: Pubkey,

    /// Pools created so far (used as incrementing ID)
    pub pool_count: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl HookConfig {
    pub const SEED: &'static [u8] = b"hook_config";

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(*caller == self.owner, AccessError::Unauthorized);
        Ok(())
    }

    /// Hands ownership to `new_owner`, returning the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.ensure_owner(caller)?;
        require!(new_owner != Pubkey::default(), AccessError::ZeroAddress);

        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

#[error_code(offset = 6200)]
pub enum AccessError {
    #[msg("Caller is not the owner")]
    Unauthorized,
    #[msg("Owner cannot be the zero address")]
    ZeroAddress,
    #[msg("Swap fee exceeds the maximum")]
    FeeTooHigh,
    #[msg("SY and PT mints must differ")]
    IdenticalMints,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(owner: Pubkey) -> HookConfig {
        HookConfig {
            owner,
            pool_count: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_owner_transfers() {
        let (owner, next) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut config = config(owner);

        assert_eq!(config.transfer_ownership(&owner, next).unwrap(), owner);
        assert_eq!(config.owner, next);
        // The previous owner lost its rights
        assert_eq!(
            config.ensure_owner(&owner).unwrap_err(),
            error!(AccessError::Unauthorized)
        );
    }

    #[test]
    fn test_non_owner_cannot_transfer() {
        let owner = Pubkey::new_unique();
        let mut config = config(owner);

        assert_eq!(
            config
                .transfer_ownership(&Pubkey::new_unique(), Pubkey::new_unique())
                .unwrap_err(),
            error!(AccessError::Unauthorized)
        );
        assert_eq!(config.owner, owner);
    }

    #[test]
    fn test_zero_owner_rejected() {
        let owner = Pubkey::new_unique();
        let mut config = config(owner);

        assert_eq!(
            config
                .transfer_ownership(&owner, Pubkey::default())
                .unwrap_err(),
            error!(AccessError::ZeroAddress)
        );
        assert_eq!(config.owner, owner);
    }
}
