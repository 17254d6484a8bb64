//! SY → PT Swaps
//!
//! Prices the trade with the logit curve, settles both legs against the
//! pool vaults and commits the new reserves.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::amm::{compute_swap, to_token_amount, SwapDirection, SwapMode};
use crate::state::Pool;

/// Event emitted for every executed swap
#[event]
pub struct Swapped {
    pub pool_id: u64,
    pub trader: Pubkey,
    pub mode: SwapMode,
    pub amount_in: u64,
    pub fee: u64,
    pub amount_out: u64,
    pub reserve0: u128,
    pub reserve1: u128,
}

/// Accounts for swapping
#[derive(Accounts)]
pub struct Swap<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Pool being traded against
    #[account(mut)]
    pub pool: Box<Account<'info, Pool>>,

    /// SY mint
    #[account(address = pool.currency0)]
    pub sy_mint: Box<InterfaceAccount<'info, Mint>>,

    /// PT mint
    #[account(address = pool.currency1)]
    pub pt_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Trader's SY account
    #[account(
        mut,
        associated_token::mint = sy_mint,
        associated_token::authority = trader,
    )]
    pub trader_sy: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's PT account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = pt_mint,
        associated_token::authority = trader,
    )]
    pub trader_pt: Box<InterfaceAccount<'info, TokenAccount>>,

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

impl<'info> Swap<'info> {
    /// Execute a swap and return the unspecified amount
    ///
    /// # Arguments
    /// * `direction` - Only `SyToPt` is accepted
    /// * `mode` - Whether `amount_specified` is the input or the output
    /// * `amount_specified` - SY in (exact input) or PT out (exact output)
    /// * `amount_limit` - Minimum PT out (exact input) or maximum SY in (exact output)
    pub fn swap(
        &mut self,
        direction: SwapDirection,
        mode: SwapMode,
        amount_specified: u64,
        amount_limit: u64,
    ) -> Result<u64> {
        let quote = compute_swap(&self.pool, direction, mode, amount_specified as u128)?;

        match mode {
            SwapMode::ExactInput => require!(
                quote.amount_out >= amount_limit as u128,
                SwapError::SlippageExceeded
            ),
            SwapMode::ExactOutput => require!(
                quote.amount_in <= amount_limit as u128,
                SwapError::SlippageExceeded
            ),
        }

        let amount_in = to_token_amount(quote.amount_in)?;
        let amount_out = to_token_amount(quote.amount_out)?;

        // SY from trader to vault
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_sy.to_account_info(),
                    mint: self.sy_mint.to_account_info(),
                    to: self.sy_vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            amount_in,
            self.sy_mint.decimals,
        )?;

        // PT from vault to trader, signed by the pool
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
                    from: self.pt_vault.to_account_info(),
                    mint: self.pt_mint.to_account_info(),
                    to: self.trader_pt.to_account_info(),
                    authority: self.pool.to_account_info(),
                },
                &[pool_seeds],
            ),
            amount_out,
            self.pt_mint.decimals,
        )?;

        self.pool.apply_swap(&quote)?;

        emit!(Swapped {
            pool_id: self.pool.id,
            trader: self.trader.key(),
            mode,
            amount_in,
            fee: to_token_amount(quote.fee)?,
            amount_out,
            reserve0: self.pool.reserve0,
            reserve1: self.pool.reserve1,
        });

        to_token_amount(quote.amount_unspecified())
    }
}

#[error_code(offset = 6300)]
pub enum SwapError {
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
}
