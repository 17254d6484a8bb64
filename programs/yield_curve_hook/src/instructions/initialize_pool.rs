//! Pool Initialization
//!
//! Anyone can open an SY/PT pool for a given fee. Initialization creates:
//! 1. The pool account with empty reserves and default curve parameters
//! 2. The LP share mint (authority: pool)
//! 3. SY and PT vaults owned by the pool
//! 4. The LP burn sink, an LP account owned by the zero identity

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::constants::MAX_FEE_BPS;
use crate::state::{AccessError, HookConfig, Pool};

/// Event emitted when a new pool is created
#[event]
pub struct PoolInitialized {
    pub pool_id: u64,
    pub pool: Pubkey,
    pub sy_mint: Pubkey,
    pub pt_mint: Pubkey,
    pub fee_bps: u16,
    pub rate_scalar: u64,
    pub rate_anchor: i128,
}

/// Accounts for creating a new pool
#[derive(Accounts)]
#[instruction(fee_bps: u16)]
pub struct InitializePool<'info> {
    /// Pool creator (pays for accounts)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global configuration
    #[account(
        mut,
        seeds = [HookConfig::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, HookConfig>>,

    /// The new pool account
    #[account(
        init,
        payer = creator,
        space = 8 + Pool::INIT_SPACE,
        seeds = [
            Pool::SEED,
            sy_mint.key().as_ref(),
            pt_mint.key().as_ref(),
            fee_bps.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// SY mint (token 0)
    pub sy_mint: Box<InterfaceAccount<'info, Mint>>,

    /// PT mint (token 1)
    pub pt_mint: Box<InterfaceAccount<'info, Mint>>,

    /// LP share mint (created for this pool)
    #[account(
        init,
        payer = creator,
        mint::decimals = sy_mint.decimals,
        mint::authority = pool,
        seeds = [Pool::LP_MINT_SEED, pool.key().as_ref()],
        bump,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Pool's SY vault
    #[account(
        init,
        payer = creator,
        associated_token::mint = sy_mint,
        associated_token::authority = pool,
    )]
    pub sy_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool's PT vault
    #[account(
        init,
        payer = creator,
        associated_token::mint = pt_mint,
        associated_token::authority = pool,
    )]
    pub pt_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// LP burn sink. Its authority is the all-zero key, which cannot sign.
    #[account(
        init,
        payer = creator,
        associated_token::mint = lp_mint,
        associated_token::authority = system_program,
    )]
    pub lp_sink: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> InitializePool<'info> {
    pub fn initialize_pool(&mut self, fee_bps: u16, bumps: &InitializePoolBumps) -> Result<()> {
        require!(fee_bps <= MAX_FEE_BPS, AccessError::FeeTooHigh);
        require_keys_neq!(
            self.sy_mint.key(),
            self.pt_mint.key(),
            AccessError::IdenticalMints
        );

        let pool_id = self.config.pool_count;

        self.pool.set_inner(Pool {
            lp_mint: self.lp_mint.key(),
            sy_vault: self.sy_vault.key(),
            pt_vault: self.pt_vault.key(),
            lp_sink: self.lp_sink.key(),
            ..Pool::new(
                pool_id,
                self.sy_mint.key(),
                self.pt_mint.key(),
                fee_bps,
                bumps.pool,
            )
        });

        self.config.pool_count += 1;

        emit!(PoolInitialized {
            pool_id,
            pool: self.pool.key(),
            sy_mint: self.sy_mint.key(),
            pt_mint: self.pt_mint.key(),
            fee_bps,
            rate_scalar: self.pool.rate_scalar,
            rate_anchor: self.pool.rate_anchor,
        });

        msg!("Pool {} initialized with fee {} bps", pool_id, fee_bps);

        Ok(())
    }
}
