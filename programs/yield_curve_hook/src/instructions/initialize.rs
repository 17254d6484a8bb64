//! Hook Initialization
//!
//! Creates the configuration account and names the curve owner.
//! This is called once during deployment.

use anchor_lang::prelude::*;

use crate::state::{AccessError, HookConfig};

/// Event emitted whenever the owner changes, including the first assignment
#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

/// Accounts required for hook initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer paying for the config account
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = payer,
        space = 8 + HookConfig::INIT_SPACE,
        seeds = [HookConfig::SEED],
        bump,
    )]
    pub config: Account<'info, HookConfig>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, owner: Pubkey, bumps: &InitializeBumps) -> Result<()> {
        require!(owner != Pubkey::default(), AccessError::ZeroAddress);

        self.config.set_inner(HookConfig {
            owner,
            pool_count: 0,
            bump: bumps.config,
        });

        emit!(OwnershipTransferred {
            previous_owner: Pubkey::default(),
            new_owner: owner,
        });

        msg!("Hook initialized, owner: {}", owner);

        Ok(())
    }
}
