//! Owner Controls
//!
//! Curve tuning, ownership hand-over and fee collection. Every handler
//! checks the signer against `HookConfig::owner` before touching state.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::amm::to_token_amount;
use crate::instructions::initialize::OwnershipTransferred;
use crate::state::{HookConfig, Pool};

/// Event emitted when curve parameters change
#[event]
pub struct PoolParametersUpdated {
    pub pool_id: u64,
    pub rate_scalar: u64,
    pub rate_anchor: i128,
}

/// Event emitted when protocol fees leave the pool
#[event]
pub struct FeesCollected {
    pub pool_id: u64,
    pub destination: Pubkey,
    pub amount: u64,
}

/// Accounts for updating curve parameters
#[derive(Accounts)]
pub struct SetPoolParameters<'info> {
    /// Curve owner
    pub owner: Signer<'info>,

    /// Global configuration
    #[account(seeds = [HookConfig::SEED], bump = config.bump)]
    pub config: Account<'info, HookConfig>,

    /// Pool to retune
    #[account(mut)]
    pub pool: Account<'info, Pool>,
}

impl<'info> SetPoolParameters<'info> {
    pub fn set_pool_parameters(&mut self, rate_scalar: u64, rate_anchor: i128) -> Result<()> {
        self.config.ensure_owner(&self.owner.key())?;
        self.pool.set_parameters(rate_scalar, rate_anchor)?;

        emit!(PoolParametersUpdated {
            pool_id: self.pool.id,
            rate_scalar,
            rate_anchor,
        });

        msg!(
            "Pool {} parameters: scalar {}, anchor {}",
            self.pool.id,
            rate_scalar,
            rate_anchor
        );

        Ok(())
    }
}

/// Accounts for handing over ownership
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    /// Current owner
    pub owner: Signer<'info>,

    /// Global configuration
    #[account(mut, seeds = [HookConfig::SEED], bump = config.bump)]
    pub config: Account<'info, HookConfig>,
}

impl<'info> TransferOwnership<'info> {
    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<()> {
        let previous_owner = self
            .config
            .transfer_ownership(&self.owner.key(), new_owner)?;

        emit!(OwnershipTransferred {
            previous_owner,
            new_owner,
        });

        msg!("Ownership transferred to {}", new_owner);

        Ok(())
    }
}

/// Accounts for collecting accrued swap fees
#[derive(Accounts)]
pub struct CollectFees<'info> {
    /// Curve owner
    pub owner: Signer<'info>,

    /// Global configuration
    #[account(seeds = [HookConfig::SEED], bump = config.bump)]
    pub config: Account<'info, HookConfig>,

    /// Pool holding the fees
    #[account(mut)]
    pub pool: Account<'info, Pool>,

    /// SY mint
    #[account(address = pool.currency0)]
    pub sy_mint: InterfaceAccount<'info, Mint>,

    /// Pool's SY vault
    #[account(mut, address = pool.sy_vault)]
    pub sy_vault: InterfaceAccount<'info, TokenAccount>,

    /// Any SY account chosen by the owner
    #[account(mut, token::mint = sy_mint)]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> CollectFees<'info> {
    pub fn collect_fees(&mut self) -> Result<u64> {
        self.config.ensure_owner(&self.owner.key())?;

        let amount = to_token_amount(self.pool.take_protocol_fees())?;
        if amount == 0 {
            return Ok(0);
        }

        let currency0 = self.pool.currency0;
        let currency1 = self.pool.currency1;
        let fee_bytes = self.pool.fee_bps.to_le_bytes();
        let bump = [self.pool.bump];
        let pool_seeds: &[&[u8]] = &[
            Pool::SEED,
            currency0.as_ref(),
            currency1.as_ref(),
            &fee_bytes,
            &bump,
        ];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.sy_vault.to_account_info(),
                    mint: self.sy_mint.to_account_info(),
                    to: self.destination.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                &[pool_seeds],
            ),
            amount,
            self.sy_mint.decimals,
        )?;

        emit!(FeesCollected {
            pool_id: self.pool.id,
            destination: self.destination.key(),
            amount,
        });

        Ok(amount)
    }
}
