//! # Liquidity Accounting
//!
//! Deposits and withdrawals are split into three collaborators:
//!
//! ```text
//!   LiquidityManager ──► LiquidityCurve   how many shares / tokens
//!          │
//!          ├────────► Pool               reserve bookkeeping
//!          │
//!          └────────► ShareLedger        who holds the shares
//! ```
//!
//! The manager owns the generic checks (deadline, slippage, minimum liquidity,
//! re-entry) and only mutates state once every check has passed. The curve is a
//! strategy, so the share formula can be swapped without touching the checks.
//!
//! ## Share Formula
//!
//! The logit curve uses flat accounting rather than reserve-proportional
//! accounting:
//!
//! ```text
//!   deposit  (a0, a1)  →  shares = (a0 + a1) / 2
//!   withdraw shares    →  (shares / 2, shares / 2)
//! ```
//!
//! On the first deposit `MINIMUM_LIQUIDITY` shares go to the burn sink and the
//! depositor receives the remainder.

use anchor_lang::prelude::*;

use super::errors::AmmError;
use super::logit_curve::LogitCurve;
use crate::constants::MINIMUM_LIQUIDITY;
use crate::state::Pool;

/// Errors raised by the liquidity scaffold
#[error_code(offset = 6100)]
pub enum LiquidityError {
    #[msg("Deadline has passed")]
    DeadlineExpired,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Deposit too small to mint liquidity")]
    InsufficientLiquidityMinted,
    #[msg("Not enough shares")]
    InsufficientShares,
    #[msg("Share minting already in progress")]
    Reentrancy,
    #[msg("Recipient does not own the LP token account")]
    InvalidRecipient,
}

/// Share math plugged into the liquidity scaffold
pub trait LiquidityCurve {
    /// Shares created by depositing `amount0` / `amount1`, before the
    /// minimum-liquidity floor is withheld.
    fn compute_shares(&self, pool: &Pool, amount0: u128, amount1: u128) -> Result<u128>;

    /// Tokens released by burning `shares`.
    fn compute_withdraw_amounts(&self, pool: &Pool, shares: u128) -> Result<(u128, u128)>;
}

/// Fungible balance ledger for LP shares
pub trait ShareLedger {
    type Holder;

    fn mint(&mut self, to: &Self::Holder, amount: u128) -> Result<()>;

    fn burn(&mut self, from: &Self::Holder, amount: u128) -> Result<()>;
}

impl LiquidityCurve for LogitCurve {
    fn compute_shares(&self, _pool: &Pool, amount0: u128, amount1: u128) -> Result<u128> {
        let sum = amount0.checked_add(amount1).ok_or(AmmError::Overflow)?;
        Ok(sum / 2)
    }

    fn compute_withdraw_amounts(&self, pool: &Pool, shares: u128) -> Result<(u128, u128)> {
        let half = shares / 2;
        require!(
            half <= pool.reserve0 && half <= pool.reserve1,
            AmmError::InsufficientReserves
        );
        Ok((half, half))
    }
}

/// Deposit request, as received from the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AddLiquidityParams {
    pub amount0_desired: u64,
    pub amount1_desired: u64,
    pub amount0_min: u64,
    pub amount1_min: u64,
    /// Owner of the LP token account receiving the shares
    pub to: Pubkey,
    /// Unix timestamp after which the request is stale
    pub deadline: i64,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub salt: [u8; 32],
}

/// Withdrawal request, as received from the caller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RemoveLiquidityParams {
    pub liquidity: u64,
    pub amount0_min: u64,
    pub amount1_min: u64,
    pub deadline: i64,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub salt: [u8; 32],
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddLiquidityOutcome {
    pub amount0: u128,
    pub amount1: u128,
    /// Shares credited to the recipient
    pub shares_minted: u128,
    /// Shares sent to the burn sink (first deposit only)
    pub shares_locked: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemoveLiquidityOutcome {
    pub amount0: u128,
    pub amount1: u128,
    pub shares_burned: u128,
}

/// Generic deposit/withdraw scaffold over a curve and a share ledger
pub struct LiquidityManager<'a, C: LiquidityCurve, L: ShareLedger> {
    pool: &'a mut Pool,
    curve: C,
    ledger: &'a mut L,
}

impl<'a, C: LiquidityCurve, L: ShareLedger> LiquidityManager<'a, C, L> {
    pub fn new(pool: &'a mut Pool, curve: C, ledger: &'a mut L) -> Self {
        Self {
            pool,
            curve,
            ledger,
        }
    }

    /// Deposit both tokens and mint shares to `recipient`.
    ///
    /// # Arguments
    /// * `params` - Desired amounts, minimums and deadline
    /// * `now` - Current unix timestamp
    /// * `recipient` - Ledger holder credited with the shares
    /// * `sink` - Ledger holder receiving the locked minimum
    pub fn add_liquidity(
        &mut self,
        params: &AddLiquidityParams,
        now: i64,
        recipient: &L::Holder,
        sink: &L::Holder,
    ) -> Result<AddLiquidityOutcome> {
        ensure_not_expired(params.deadline, now)?;
        self.pool.ensure_initialized()?;
        require!(!self.pool.locked, LiquidityError::Reentrancy);

        // Desired amounts are taken as-is; the curve does no rebalancing
        let amount0 = params.amount0_desired as u128;
        let amount1 = params.amount1_desired as u128;
        require!(amount0 > 0 || amount1 > 0, AmmError::ZeroAmount);
        require!(
            amount0 >= params.amount0_min as u128 && amount1 >= params.amount1_min as u128,
            LiquidityError::SlippageExceeded
        );

        let minted = self.curve.compute_shares(self.pool, amount0, amount1)?;
        let (shares_minted, shares_locked) = if self.pool.total_shares == 0 {
            require!(
                minted > MINIMUM_LIQUIDITY,
                LiquidityError::InsufficientLiquidityMinted
            );
            (minted - MINIMUM_LIQUIDITY, MINIMUM_LIQUIDITY)
        } else {
            require!(minted > 0, LiquidityError::InsufficientLiquidityMinted);
            (minted, 0)
        };

        let reserve0 = self.pool.reserve0.checked_add(amount0).ok_or(AmmError::Overflow)?;
        let reserve1 = self.pool.reserve1.checked_add(amount1).ok_or(AmmError::Overflow)?;
        let total_shares = self
            .pool
            .total_shares
            .checked_add(minted)
            .ok_or(AmmError::Overflow)?;

        self.pool.locked = true;
        let minting = self.mint_shares(recipient, sink, shares_minted, shares_locked);
        self.pool.locked = false;
        minting?;

        self.pool.reserve0 = reserve0;
        self.pool.reserve1 = reserve1;
        self.pool.total_shares = total_shares;

        Ok(AddLiquidityOutcome {
            amount0,
            amount1,
            shares_minted,
            shares_locked,
        })
    }

    /// Burn `params.liquidity` shares held by `holder` and release tokens.
    pub fn remove_liquidity(
        &mut self,
        params: &RemoveLiquidityParams,
        now: i64,
        holder: &L::Holder,
    ) -> Result<RemoveLiquidityOutcome> {
        ensure_not_expired(params.deadline, now)?;
        self.pool.ensure_initialized()?;

        let shares = params.liquidity as u128;
        require!(shares > 0, AmmError::ZeroAmount);
        require!(
            shares <= self.pool.total_shares,
            LiquidityError::InsufficientShares
        );

        let (amount0, amount1) = self.curve.compute_withdraw_amounts(self.pool, shares)?;
        require!(
            amount0 >= params.amount0_min as u128 && amount1 >= params.amount1_min as u128,
            LiquidityError::SlippageExceeded
        );

        let reserve0 = self
            .pool
            .reserve0
            .checked_sub(amount0)
            .ok_or(AmmError::InsufficientReserves)?;
        let reserve1 = self
            .pool
            .reserve1
            .checked_sub(amount1)
            .ok_or(AmmError::InsufficientReserves)?;

        self.ledger.burn(holder, shares)?;

        self.pool.reserve0 = reserve0;
        self.pool.reserve1 = reserve1;
        self.pool.total_shares -= shares;

        Ok(RemoveLiquidityOutcome {
            amount0,
            amount1,
            shares_burned: shares,
        })
    }

    fn mint_shares(
        &mut self,
        recipient: &L::Holder,
        sink: &L::Holder,
        shares_minted: u128,
        shares_locked: u128,
    ) -> Result<()> {
        if shares_locked > 0 {
            self.ledger.mint(sink, shares_locked)?;
        }
        self.ledger.mint(recipient, shares_minted)
    }
}

fn ensure_not_expired(deadline: i64, now: i64) -> Result<()> {
    require!(now <= deadline, LiquidityError::DeadlineExpired);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::constants::WAD;

    #[derive(Default)]
    struct MemoryLedger {
        balances: BTreeMap<Pubkey, u128>,
        total_supply: u128,
    }

    impl ShareLedger for MemoryLedger {
        type Holder = Pubkey;

        fn mint(&mut self, to: &Pubkey, amount: u128) -> Result<()> {
            *self.balances.entry(*to).or_default() += amount;
            self.total_supply += amount;
            Ok(())
        }

        fn burn(&mut self, from: &Pubkey, amount: u128) -> Result<()> {
            let balance = self.balances.entry(*from).or_default();
            require!(*balance >= amount, LiquidityError::InsufficientShares);
            *balance -= amount;
            self.total_supply -= amount;
            Ok(())
        }
    }

    impl MemoryLedger {
        fn balance(&self, holder: &Pubkey) -> u128 {
            self.balances.get(holder).copied().unwrap_or_default()
        }
    }

    const NOW: i64 = 1_700_000_000;

    fn pool() -> Pool {
        Pool::new(0, Pubkey::new_unique(), Pubkey::new_unique(), 0, 255)
    }

    fn deposit(amount0: u64, amount1: u64, to: Pubkey) -> AddLiquidityParams {
        AddLiquidityParams {
            amount0_desired: amount0,
            amount1_desired: amount1,
            amount0_min: 0,
            amount1_min: 0,
            to,
            deadline: NOW + 60,
            tick_lower: i32::MIN,
            tick_upper: i32::MAX,
            salt: [0; 32],
        }
    }

    fn withdrawal(liquidity: u64) -> RemoveLiquidityParams {
        RemoveLiquidityParams {
            liquidity,
            amount0_min: 0,
            amount1_min: 0,
            deadline: NOW + 60,
            tick_lower: i32::MIN,
            tick_upper: i32::MAX,
            salt: [0; 32],
        }
    }

    #[test]
    fn test_first_deposit_locks_minimum_liquidity() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let (alice, sink) = (Pubkey::new_unique(), Pubkey::default());

        let params = deposit(10_000_000, 8_000_000, alice);
        let outcome = LiquidityManager::new(&mut pool, curve, &mut ledger)
            .add_liquidity(&params, NOW, &alice, &sink)
            .unwrap();

        assert_eq!(outcome.shares_locked, MINIMUM_LIQUIDITY);
        assert_eq!(outcome.shares_minted, 9_000_000 - MINIMUM_LIQUIDITY);
        assert_eq!(ledger.balance(&sink), MINIMUM_LIQUIDITY);
        assert_eq!(ledger.balance(&alice), 9_000_000 - MINIMUM_LIQUIDITY);
        assert_eq!(ledger.total_supply, 9_000_000);
        assert_eq!(pool.total_shares, 9_000_000);
        assert_eq!(pool.reserve0, 10_000_000);
        assert_eq!(pool.reserve1, 8_000_000);
        assert!(!pool.locked);
    }

    #[test]
    fn test_later_deposits_mint_in_full() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let (alice, bob, sink) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::default());

        let mut manager = LiquidityManager::new(&mut pool, curve, &mut ledger);
        manager
            .add_liquidity(&deposit(5_000, 5_000, alice), NOW, &alice, &sink)
            .unwrap();
        let second = manager
            .add_liquidity(&deposit(3_000, 1_000, bob), NOW, &bob, &sink)
            .unwrap();

        assert_eq!(second.shares_minted, 2_000);
        assert_eq!(second.shares_locked, 0);
        assert_eq!(ledger.balance(&sink), MINIMUM_LIQUIDITY);
        assert_eq!(ledger.balance(&bob), 2_000);
        assert_eq!(pool.total_shares, 7_000);
    }

    #[test]
    fn test_first_deposit_below_minimum() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let alice = Pubkey::new_unique();

        let result = LiquidityManager::new(&mut pool, curve, &mut ledger).add_liquidity(
            &deposit(1_000, 1_000, alice),
            NOW,
            &alice,
            &Pubkey::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            error!(LiquidityError::InsufficientLiquidityMinted)
        );
        assert_eq!(ledger.total_supply, 0);
        assert_eq!(pool.reserve0, 0);
    }

    #[test]
    fn test_expired_deadline() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let alice = Pubkey::new_unique();
        let before = pool.clone();

        let mut params = deposit(WAD as u64, WAD as u64, alice);
        params.deadline = NOW - 1;
        let result = LiquidityManager::new(&mut pool, curve, &mut ledger).add_liquidity(
            &params,
            NOW,
            &alice,
            &Pubkey::default(),
        );

        assert_eq!(result.unwrap_err(), error!(LiquidityError::DeadlineExpired));
        assert_eq!(pool, before);
    }

    #[test]
    fn test_deposit_slippage() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let alice = Pubkey::new_unique();

        let mut params = deposit(5_000, 5_000, alice);
        params.amount1_min = 5_001;
        let result = LiquidityManager::new(&mut pool, curve, &mut ledger).add_liquidity(
            &params,
            NOW,
            &alice,
            &Pubkey::default(),
        );
        assert_eq!(result.unwrap_err(), error!(LiquidityError::SlippageExceeded));
    }

    #[test]
    fn test_reentrant_mint_rejected() {
        let mut pool = pool();
        pool.locked = true;
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let alice = Pubkey::new_unique();

        let result = LiquidityManager::new(&mut pool, curve, &mut ledger).add_liquidity(
            &deposit(5_000, 5_000, alice),
            NOW,
            &alice,
            &Pubkey::default(),
        );
        assert_eq!(result.unwrap_err(), error!(LiquidityError::Reentrancy));
    }

    #[test]
    fn test_uninitialized_pool() {
        let mut pool = Pool::default();
        let mut ledger = MemoryLedger::default();
        let curve = LogitCurve::new(100, 0).unwrap();
        let alice = Pubkey::new_unique();

        let result = LiquidityManager::new(&mut pool, curve, &mut ledger).add_liquidity(
            &deposit(5_000, 5_000, alice),
            NOW,
            &alice,
            &Pubkey::default(),
        );
        assert_eq!(result.unwrap_err(), error!(AmmError::PoolNotInitialized));
    }

    #[test]
    fn test_withdraw_splits_evenly() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let (alice, sink) = (Pubkey::new_unique(), Pubkey::default());

        let mut manager = LiquidityManager::new(&mut pool, curve, &mut ledger);
        manager
            .add_liquidity(&deposit(10_000, 6_000, alice), NOW, &alice, &sink)
            .unwrap();
        let outcome = manager
            .remove_liquidity(&withdrawal(4_000), NOW, &alice)
            .unwrap();

        assert_eq!(outcome.amount0, 2_000);
        assert_eq!(outcome.amount1, 2_000);
        assert_eq!(pool.reserve0, 8_000);
        assert_eq!(pool.reserve1, 4_000);
        assert_eq!(pool.total_shares, 4_000);
        assert_eq!(ledger.balance(&alice), 3_000);
        assert_eq!(ledger.total_supply, pool.total_shares);
    }

    #[test]
    fn test_withdraw_beyond_one_reserve() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let (alice, sink) = (Pubkey::new_unique(), Pubkey::default());

        let mut manager = LiquidityManager::new(&mut pool, curve, &mut ledger);
        manager
            .add_liquidity(&deposit(20_000, 2_000, alice), NOW, &alice, &sink)
            .unwrap();
        // 5_000 / 2 = 2_500 PT, but only 2_000 PT are held
        let result = manager.remove_liquidity(&withdrawal(5_000), NOW, &alice);

        assert_eq!(result.unwrap_err(), error!(AmmError::InsufficientReserves));
        assert_eq!(pool.reserve1, 2_000);
        assert_eq!(ledger.balance(&alice), 10_000);
    }

    #[test]
    fn test_withdraw_more_than_held() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let (alice, bob, sink) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::default());

        let mut manager = LiquidityManager::new(&mut pool, curve, &mut ledger);
        manager
            .add_liquidity(&deposit(10_000, 10_000, alice), NOW, &alice, &sink)
            .unwrap();
        let result = manager.remove_liquidity(&withdrawal(100), NOW, &bob);

        assert_eq!(result.unwrap_err(), error!(LiquidityError::InsufficientShares));
        assert_eq!(pool.total_shares, 10_000);
        assert_eq!(pool.reserve0, 10_000);
    }

    #[test]
    fn test_withdraw_slippage() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let curve = pool.curve().unwrap();
        let (alice, sink) = (Pubkey::new_unique(), Pubkey::default());

        let mut manager = LiquidityManager::new(&mut pool, curve, &mut ledger);
        manager
            .add_liquidity(&deposit(10_000, 10_000, alice), NOW, &alice, &sink)
            .unwrap();
        let mut params = withdrawal(2_000);
        params.amount0_min = 1_001;
        let result = manager.remove_liquidity(&params, NOW, &alice);

        assert_eq!(result.unwrap_err(), error!(LiquidityError::SlippageExceeded));
    }

    /// Reserve-proportional strategy, used to show the scaffold is curve-agnostic
    struct ProportionalCurve;

    impl LiquidityCurve for ProportionalCurve {
        fn compute_shares(&self, pool: &Pool, amount0: u128, amount1: u128) -> Result<u128> {
            if pool.total_shares == 0 {
                return Ok(amount0.min(amount1));
            }
            Ok((amount0 * pool.total_shares / pool.reserve0)
                .min(amount1 * pool.total_shares / pool.reserve1))
        }

        fn compute_withdraw_amounts(&self, pool: &Pool, shares: u128) -> Result<(u128, u128)> {
            Ok((
                shares * pool.reserve0 / pool.total_shares,
                shares * pool.reserve1 / pool.total_shares,
            ))
        }
    }

    #[test]
    fn test_scaffold_accepts_other_curves() {
        let mut pool = pool();
        let mut ledger = MemoryLedger::default();
        let (alice, sink) = (Pubkey::new_unique(), Pubkey::default());

        let mut manager = LiquidityManager::new(&mut pool, ProportionalCurve, &mut ledger);
        manager
            .add_liquidity(&deposit(20_000, 10_000, alice), NOW, &alice, &sink)
            .unwrap();
        let outcome = manager
            .remove_liquidity(&withdrawal(4_500), NOW, &alice)
            .unwrap();

        assert_eq!((outcome.amount0, outcome.amount1), (9_000, 4_500));
    }
}
