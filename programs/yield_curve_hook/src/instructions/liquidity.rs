//! Liquidity Provision
//!
//! Deposits and withdrawals run through `LiquidityManager`. The pool's LP
//! mint is the share ledger; token movements are settled here.
//!
//! ## Deposit Flow
//!
//! ```text
//! 1. Manager validates deadline, slippage and minimum liquidity
//! 2. LP shares are minted (sink first on the very first deposit)
//! 3. SY and PT move from the provider into the vaults
//! ```

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        burn, mint_to, transfer_checked, Burn, Mint, MintTo, TokenAccount, TokenInterface,
        TransferChecked,
    },
};

use crate::amm::{
    to_token_amount, AddLiquidityOutcome, AddLiquidityParams, LiquidityError, LiquidityManager,
    RemoveLiquidityOutcome, RemoveLiquidityParams, ShareLedger,
};
use crate::state::Pool;

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub pool_id: u64,
    pub provider: Pubkey,
    pub recipient: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
    pub shares_minted: u64,
    pub shares_locked: u64,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub salt: [u8; 32],
}

/// Event emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub pool_id: u64,
    pub provider: Pubkey,
    pub amount0: u64,
    pub amount1: u64,
    pub shares_burned: u64,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub salt: [u8; 32],
}

/// LP mint driven through token program CPIs
pub struct LpTokenLedger<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub lp_mint: AccountInfo<'info>,
    /// Mint authority
    pub pool: AccountInfo<'info>,
    /// Burn authority over the holder's LP account
    pub owner: AccountInfo<'info>,
    pub pool_seeds: &'a [&'a [u8]],
}

impl<'a, 'info> ShareLedger for LpTokenLedger<'a, 'info> {
    type Holder = AccountInfo<'info>;

    fn mint(&mut self, to: &AccountInfo<'info>, amount: u128) -> Result<()> {
        mint_to(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                MintTo {
                    mint: self.lp_mint.clone(),
                    to: to.clone(),
                    authority: self.pool.clone(),
                },
                &[self.pool_seeds],
            ),
            to_token_amount(amount)?,
        )
    }

    fn burn(&mut self, from: &AccountInfo<'info>, amount: u128) -> Result<()> {
        burn(
            CpiContext::new(
                self.token_program.clone(),
                Burn {
                    mint: self.lp_mint.clone(),
                    from: from.clone(),
                    authority: self.owner.clone(),
                },
            ),
            to_token_amount(amount)?,
        )
    }
}

/// Accounts for depositing liquidity
#[derive(Accounts)]
#[instruction(params: AddLiquidityParams)]
pub struct AddLiquidity<'info> {
    /// Liquidity provider
    #[account(mut)]
    pub provider: Signer<'info>,

    /// Pool receiving liquidity
    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,

    /// SY mint
    #[account(address = pool.currency0)]
    pub sy_mint: Box<InterfaceAccount<'info, Mint>>,

    /// PT mint
    #[account(address = pool.currency1)]
    pub pt_mint: Box<InterfaceAccount<'info, Mint>>,

    /// LP share mint
    #[account(mut, address = pool.lp_mint)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Provider's SY account
    #[account(
        mut,
        associated_token::mint = sy_mint,
        associated_token::authority = provider,
    )]
    pub provider_sy: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's PT account
    #[account(
        mut,
        associated_token::mint = pt_mint,
        associated_token::authority = provider,
    )]
    pub provider_pt: Box<InterfaceAccount<'info, TokenAccount>>,

    /// LP account of `params.to`
    #[account(
        mut,
        token::mint = lp_mint,
        constraint = recipient_lp.owner == params.to @ LiquidityError::InvalidRecipient,
    )]
    pub recipient_lp: Box<InterfaceAccount<'info, TokenAccount>>,

    /// LP burn sink
    #[account(mut, address = pool.lp_sink)]
    pub lp_sink: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool's SY vault
    #[account(mut, address = pool.sy_vault)]
    pub sy_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool's PT vault
    #[account(mut, address = pool.pt_vault)]
    pub pt_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> AddLiquidity<'info> {
    pub fn add_liquidity(&mut self, params: AddLiquidityParams) -> Result<AddLiquidityOutcome> {
        let clock = Clock::get()?;

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

        let mut ledger = LpTokenLedger {
            token_program: self.token_program.to_account_info(),
            lp_mint: self.lp_mint.to_account_info(),
            pool: self.pool.to_account_info(),
            owner: self.provider.to_account_info(),
            pool_seeds,
        };
        let recipient = self.recipient_lp.to_account_info();
        let sink = self.lp_sink.to_account_info();

        let curve = self.pool.curve()?;
        let outcome = LiquidityManager::new(&mut self.pool, curve, &mut ledger).add_liquidity(
            &params,
            clock.unix_timestamp,
            &recipient,
            &sink,
        )?;

        let amount0 = to_token_amount(outcome.amount0)?;
        let amount1 = to_token_amount(outcome.amount1)?;

        self.deposit(&self.provider_sy, &self.sy_vault, &self.sy_mint, amount0)?;
        self.deposit(&self.provider_pt, &self.pt_vault, &self.pt_mint, amount1)?;

        emit!(LiquidityAdded {
            pool_id: self.pool.id,
            provider: self.provider.key(),
            recipient: params.to,
            amount0,
            amount1,
            shares_minted: to_token_amount(outcome.shares_minted)?,
            shares_locked: to_token_amount(outcome.shares_locked)?,
            tick_lower: params.tick_lower,
            tick_upper: params.tick_upper,
            salt: params.salt,
        });

        Ok(outcome)
    }

    fn deposit(
        &self,
        from: &InterfaceAccount<'info, TokenAccount>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        mint: &InterfaceAccount<'info, Mint>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: from.to_account_info(),
                    mint: mint.to_account_info(),
                    to: vault.to_account_info(),
                    authority: self.provider.to_account_info(),
                },
            ),
            amount,
            mint.decimals,
        )
    }
}

/// Accounts for withdrawing liquidity
#[derive(Accounts)]
pub struct RemoveLiquidity<'info> {
    /// Liquidity provider burning shares
    #[account(mut)]
    pub provider: Signer<'info>,

    /// Pool releasing liquidity
    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,

    /// SY mint
    #[account(address = pool.currency0)]
    pub sy_mint: Box<InterfaceAccount<'info, Mint>>,

    /// PT mint
    #[account(address = pool.currency1)]
    pub pt_mint: Box<InterfaceAccount<'info, Mint>>,

    /// LP share mint
    #[account(mut, address = pool.lp_mint)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Provider's LP account
    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = provider,
    )]
    pub provider_lp: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's SY account
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = sy_mint,
        associated_token::authority = provider,
    )]
    pub provider_sy: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Provider's PT account
    #[account(
        init_if_needed,
        payer = provider,
        associated_token::mint = pt_mint,
        associated_token::authority = provider,
    )]
    pub provider_pt: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool's SY vault
    #[account(mut, address = pool.sy_vault)]
    pub sy_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Pool's PT vault
    #[account(mut, address = pool.pt_vault)]
    pub pt_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> RemoveLiquidity<'info> {
    pub fn remove_liquidity(&mut self, params: RemoveLiquidityParams) -> Result<RemoveLiquidityOutcome> {
        let clock = Clock::get()?;

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

        let mut ledger = LpTokenLedger {
            token_program: self.token_program.to_account_info(),
            lp_mint: self.lp_mint.to_account_info(),
            pool: self.pool.to_account_info(),
            owner: self.provider.to_account_info(),
            pool_seeds,
        };
        let holder = self.provider_lp.to_account_info();

        let curve = self.pool.curve()?;
        let outcome = LiquidityManager::new(&mut self.pool, curve, &mut ledger)
            .remove_liquidity(&params, clock.unix_timestamp, &holder)?;

        let amount0 = to_token_amount(outcome.amount0)?;
        let amount1 = to_token_amount(outcome.amount1)?;
        let pool_info = self.pool.to_account_info();

        for (vault, destination, mint, amount) in [
            (&self.sy_vault, &self.provider_sy, &self.sy_mint, amount0),
            (&self.pt_vault, &self.provider_pt, &self.pt_mint, amount1),
        ] {
            if amount == 0 {
                continue;
            }
            transfer_checked(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: vault.to_account_info(),
                        mint: mint.to_account_info(),
                        to: destination.to_account_info(),
                        authority: pool_info.clone(),
                    },
                    &[pool_seeds],
                ),
                amount,
                mint.decimals,
            )?;
        }

        emit!(LiquidityRemoved {
            pool_id: self.pool.id,
            provider: self.provider.key(),
            amount0,
            amount1,
            shares_burned: to_token_amount(outcome.shares_burned)?,
            tick_lower: params.tick_lower,
            tick_upper: params.tick_upper,
            salt: params.salt,
        });

        Ok(outcome)
    }
}
