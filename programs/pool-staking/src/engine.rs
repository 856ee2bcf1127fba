// =============================================================================
// Staking Engine
// =============================================================================
// Pure bookkeeping for deposit / withdraw / harvest / emergency withdraw.
//
// Every operation validates first and only then mutates, so a rejected call
// leaves the pool and the position untouched. Instruction handlers run these
// functions to completion before issuing any token transfer; the returned
// amounts tell the handler what to move.
// =============================================================================

use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::state::{Pool, Position};

/// Rewards settled during an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Rewards owed to the position at settlement time
    pub pending: u64,
    /// Rewards the reward vault could actually cover
    pub paid: u64,
}

impl Settlement {
    pub fn shortfall(&self) -> u64 {
        self.pending.saturating_sub(self.paid)
    }
}

/// Pay out everything the position has earned against `acc_reward_per_share`.
/// The caller re-checkpoints the position afterwards.
fn settle(
    pool: &mut Pool,
    position: &mut Position,
    acc_reward_per_share: u128,
    reward_vault_balance: u64,
) -> Result<Settlement> {
    let pending = position.pending_reward(acc_reward_per_share)?;
    let paid = pool.record_payout(pending, reward_vault_balance)?;
    position.record_claim(paid)?;

    Ok(Settlement { pending, paid })
}

/// Rewards a position could harvest at `now`, without touching the pool
pub fn pending_reward(pool: &Pool, position: &Position, now: i64) -> Result<u64> {
    let acc = pool.projected_acc_reward_per_share(now)?;
    position.pending_reward(acc)
}

/// Add `amount` to a position, settling its pending rewards first
pub fn deposit(
    pool: &mut Pool,
    position: &mut Position,
    amount: u64,
    now: i64,
    reward_vault_balance: u64,
) -> Result<Settlement> {
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        amount >= pool.min_stake_amount,
        StakingError::BelowMinimumStake
    );

    pool.accrue(now)?;
    let acc = pool.acc_reward_per_share;
    let opens_position = !position.active;

    let settlement = settle(pool, position, acc, reward_vault_balance)?;
    position.record_deposit(amount, now, acc)?;
    pool.record_stake(amount, opens_position)?;

    Ok(settlement)
}

/// Remove `amount` from an unlocked position, settling its pending rewards
pub fn withdraw(
    pool: &mut Pool,
    position: &mut Position,
    amount: u64,
    now: i64,
    reward_vault_balance: u64,
) -> Result<Settlement> {
    require!(
        position.active && position.amount >= amount,
        StakingError::InsufficientStake
    );
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        position.is_unlocked(pool.lock_period, now)?,
        StakingError::StillLocked
    );

    pool.accrue(now)?;
    let acc = pool.acc_reward_per_share;

    let settlement = settle(pool, position, acc, reward_vault_balance)?;
    position.record_withdraw(amount, acc)?;
    pool.record_unstake(amount, !position.active)?;

    Ok(settlement)
}

/// Pay out pending rewards, leaving the stake untouched
pub fn harvest(
    pool: &mut Pool,
    position: &mut Position,
    now: i64,
    reward_vault_balance: u64,
) -> Result<Settlement> {
    require!(position.active, StakingError::NoActivePosition);
    require!(
        pending_reward(pool, position, now)? > 0,
        StakingError::NoPendingRewards
    );

    pool.accrue(now)?;
    let acc = pool.acc_reward_per_share;

    let settlement = settle(pool, position, acc, reward_vault_balance)?;
    position.checkpoint(acc)?;

    Ok(settlement)
}

/// Stake custody must hold enough to return `amount` of principal
pub fn ensure_custody(stake_vault_balance: u64, amount: u64) -> Result<()> {
    require!(stake_vault_balance >= amount, StakingError::TransferFailed);
    Ok(())
}

/// Close the position immediately, ignoring the lock and forfeiting rewards.
/// Returns the principal to send back.
pub fn emergency_withdraw(pool: &mut Pool, position: &mut Position, now: i64) -> Result<u64> {
    require!(position.active, StakingError::NoActivePosition);

    pool.accrue(now)?;

    let amount = position.record_emergency_withdraw();
    pool.record_unstake(amount, true)?;

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACC_PRECISION;
    use crate::math::tests::{code_of, error_code};

    /// A pool plus its positions and reward vault balance, driven the same
    /// way the instruction handlers drive them
    struct Ledger {
        pool: Pool,
        positions: Vec<Position>,
        reward_vault: u64,
        received: Vec<u64>,
    }

    impl Ledger {
        fn new(reward_per_second: u64, min_stake: u64, lock_period: i64, participants: usize) -> Self {
            Self {
                pool: Pool {
                    reward_per_second,
                    min_stake_amount: min_stake,
                    lock_period,
                    ..Default::default()
                },
                positions: vec![Position::default(); participants],
                reward_vault: u64::MAX / 2,
                received: vec![0; participants],
            }
        }

        fn pay(&mut self, who: usize, settlement: Settlement) {
            self.reward_vault -= settlement.paid;
            self.received[who] += settlement.paid;
        }

        fn deposit(&mut self, who: usize, amount: u64, now: i64) -> Result<Settlement> {
            let s = deposit(&mut self.pool, &mut self.positions[who], amount, now, self.reward_vault)?;
            self.pay(who, s);
            Ok(s)
        }

        fn withdraw(&mut self, who: usize, amount: u64, now: i64) -> Result<Settlement> {
            let s = withdraw(&mut self.pool, &mut self.positions[who], amount, now, self.reward_vault)?;
            self.pay(who, s);
            Ok(s)
        }

        fn harvest(&mut self, who: usize, now: i64) -> Result<Settlement> {
            let s = harvest(&mut self.pool, &mut self.positions[who], now, self.reward_vault)?;
            self.pay(who, s);
            Ok(s)
        }

        fn emergency(&mut self, who: usize, now: i64) -> Result<u64> {
            emergency_withdraw(&mut self.pool, &mut self.positions[who], now)
        }

        fn pending(&self, who: usize, now: i64) -> u64 {
            pending_reward(&self.pool, &self.positions[who], now).unwrap()
        }

        fn assert_conserved(&self) {
            let sum: u64 = self.positions.iter().map(|p| p.amount).sum();
            let active = self.positions.iter().filter(|p| p.active).count() as u64;
            assert_eq!(self.pool.total_staked, sum);
            assert_eq!(self.pool.staker_count, active);
            for p in &self.positions {
                assert_eq!(p.active, p.amount > 0);
            }
        }
    }

    const A: usize = 0;
    const B: usize = 1;
    const C: usize = 2;

    #[test]
    fn test_two_stakers_split_rewards() {
        let mut ledger = Ledger::new(1, 10, 100, 2);

        ledger.deposit(A, 100, 0).unwrap();
        assert_eq!(ledger.pending(A, 100), 100);

        let s = ledger.deposit(B, 100, 100).unwrap();
        assert_eq!(s, Settlement::default());
        assert_eq!(ledger.pending(B, 100), 0);

        assert_eq!(ledger.pending(A, 200), 150);
        assert_eq!(ledger.pending(B, 200), 50);
        ledger.assert_conserved();
    }

    #[test]
    fn test_underfunded_harvest_pays_available_balance() {
        let mut ledger = Ledger::new(1, 10, 0, 1);
        ledger.reward_vault = 30;

        ledger.deposit(A, 100, 0).unwrap();
        let s = ledger.harvest(A, 100).unwrap();

        assert_eq!(s.pending, 100);
        assert_eq!(s.paid, 30);
        assert_eq!(s.shortfall(), 70);
        assert_eq!(ledger.received[A], 30);
        assert_eq!(ledger.reward_vault, 0);

        // The remaining 70 is not owed any more
        assert_eq!(ledger.pending(A, 100), 0);
        let err = ledger.harvest(A, 100).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::NoPendingRewards));
    }

    #[test]
    fn test_harvest_twice_without_time_passing() {
        let mut ledger = Ledger::new(5, 1, 0, 1);
        ledger.deposit(A, 10, 0).unwrap();

        let first = ledger.harvest(A, 20).unwrap();
        assert_eq!(first.paid, 100);
        let vault_after_first = ledger.reward_vault;
        let position_after_first = ledger.positions[A].clone();

        let err = ledger.harvest(A, 20).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::NoPendingRewards));
        assert_eq!(ledger.reward_vault, vault_after_first);
        assert_eq!(ledger.received[A], 100);
        assert_eq!(ledger.positions[A].reward_debt, position_after_first.reward_debt);
    }

    #[test]
    fn test_lock_enforced_until_unlock_time() {
        let mut ledger = Ledger::new(1, 1, 100, 1);
        ledger.deposit(A, 50, 10).unwrap();

        let err = ledger.withdraw(A, 50, 109).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::StillLocked));
        assert_eq!(ledger.positions[A].amount, 50);
        assert_eq!(ledger.pool.last_accrual_time, 10);

        ledger.withdraw(A, 50, 110).unwrap();
        assert!(!ledger.positions[A].active);
        ledger.assert_conserved();
    }

    #[test]
    fn test_top_up_restarts_lock_for_whole_position() {
        let mut ledger = Ledger::new(0, 1, 100, 1);
        ledger.deposit(A, 50, 0).unwrap();
        ledger.deposit(A, 50, 80).unwrap();

        let err = ledger.withdraw(A, 10, 100).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::StillLocked));

        ledger.withdraw(A, 100, 180).unwrap();
        ledger.assert_conserved();
    }

    #[test]
    fn test_deposit_settles_pending_first() {
        let mut ledger = Ledger::new(2, 1, 0, 1);
        ledger.deposit(A, 10, 0).unwrap();

        let s = ledger.deposit(A, 10, 50).unwrap();

        assert_eq!(s.paid, 100);
        assert_eq!(ledger.positions[A].amount, 20);
        assert_eq!(ledger.pending(A, 50), 0);
        assert_eq!(ledger.pending(A, 60), 20);
    }

    #[test]
    fn test_withdraw_settles_and_keeps_remaining_stake_earning() {
        let mut ledger = Ledger::new(4, 1, 0, 2);
        ledger.deposit(A, 30, 0).unwrap();
        ledger.deposit(B, 10, 0).unwrap();

        // 10s * 4/s = 40; A owns 3/4
        let s = ledger.withdraw(A, 20, 10).unwrap();
        assert_eq!(s.paid, 30);

        // A 10, B 10 now split evenly
        assert_eq!(ledger.pending(A, 20), 20);
        assert_eq!(ledger.pending(B, 20), 10 + 20);
        ledger.assert_conserved();
    }

    #[test]
    fn test_emergency_withdraw_returns_principal_only() {
        let mut ledger = Ledger::new(1, 1, 1_000, 1);
        ledger.deposit(A, 100, 0).unwrap();
        assert_eq!(ledger.pending(A, 500), 500);

        let returned = ledger.emergency(A, 500).unwrap();

        assert_eq!(returned, 100);
        assert_eq!(ledger.received[A], 0);
        assert_eq!(ledger.pending(A, 500), 0);
        assert_eq!(ledger.pending(A, 10_000), 0);
        ledger.assert_conserved();

        let err = ledger.emergency(A, 600).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::NoActivePosition));
    }

    #[test]
    fn test_empty_pool_interval_earns_nothing() {
        let mut ledger = Ledger::new(7, 1, 0, 1);
        ledger.deposit(A, 10, 0).unwrap();
        ledger.withdraw(A, 10, 10).unwrap();
        let paid_before = ledger.received[A];
        let acc_before = ledger.pool.acc_reward_per_share;

        // Idle from t=10 to t=1_000
        ledger.deposit(A, 10, 1_000).unwrap();

        assert_eq!(ledger.pool.acc_reward_per_share, acc_before);
        assert_eq!(ledger.received[A], paid_before);
        assert_eq!(ledger.pending(A, 1_000), 0);
        assert_eq!(ledger.pending(A, 1_001), 7);
    }

    #[test]
    fn test_redeposit_after_full_exit() {
        let mut ledger = Ledger::new(1, 1, 0, 2);
        ledger.deposit(A, 10, 0).unwrap();
        ledger.deposit(B, 10, 0).unwrap();
        ledger.withdraw(A, 10, 10).unwrap();
        ledger.deposit(A, 10, 20).unwrap();

        // B alone from 10 to 20, then split
        assert_eq!(ledger.pending(A, 30), 5);
        assert_eq!(ledger.pending(B, 30), 5 + 10 + 5);
        ledger.assert_conserved();
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut ledger = Ledger::new(1, 10, 100, 2);
        ledger.deposit(A, 100, 0).unwrap();
        let pool_before = ledger.pool.clone();
        let position_before = ledger.positions[A].clone();

        let err = ledger.deposit(A, 9, 50).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::BelowMinimumStake));

        let err = ledger.deposit(A, 0, 50).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InvalidAmount));

        let err = ledger.withdraw(A, 101, 500).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InsufficientStake));

        let err = ledger.withdraw(B, 1, 500).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InsufficientStake));

        let err = ledger.withdraw(B, 0, 500).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InsufficientStake));

        let err = ledger.withdraw(A, 0, 500).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InvalidAmount));

        let err = ledger.harvest(B, 500).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::NoActivePosition));

        assert_eq!(ledger.pool.acc_reward_per_share, pool_before.acc_reward_per_share);
        assert_eq!(ledger.pool.last_accrual_time, pool_before.last_accrual_time);
        assert_eq!(ledger.pool.total_staked, pool_before.total_staked);
        assert_eq!(ledger.positions[A].amount, position_before.amount);
        assert_eq!(ledger.positions[A].reward_debt, position_before.reward_debt);
    }

    #[test]
    fn test_interleaved_operations_conserve_and_stay_monotonic() {
        let mut ledger = Ledger::new(13, 1, 5, 3);
        let mut last_acc = 0u128;
        let mut now = 0i64;

        let steps: &[(usize, u8, u64)] = &[
            (A, 0, 100),
            (B, 0, 37),
            (C, 0, 1),
            (A, 2, 0),
            (B, 0, 500),
            (C, 1, 1),
            (A, 1, 60),
            (C, 0, 999),
            (B, 3, 0),
            (A, 2, 0),
            (C, 1, 400),
            (B, 0, 3),
            (A, 1, 40),
        ];

        for &(who, op, amount) in steps {
            now += 7;
            match op {
                0 => {
                    ledger.deposit(who, amount, now).unwrap();
                }
                1 => {
                    ledger.withdraw(who, amount, now).unwrap();
                }
                2 => {
                    ledger.harvest(who, now).unwrap();
                }
                _ => {
                    ledger.emergency(who, now).unwrap();
                }
            }

            ledger.assert_conserved();
            assert!(ledger.pool.acc_reward_per_share >= last_acc);
            last_acc = ledger.pool.acc_reward_per_share;
        }

        // Never pays more than was emitted
        let emitted = 13 * now as u64;
        let paid: u64 = ledger.received.iter().sum();
        assert!(paid <= emitted);
        assert_eq!(ledger.pool.total_rewards_paid, paid);
    }

    #[test]
    fn test_withdraw_reports_balance_before_lock() {
        let mut ledger = Ledger::new(1, 1, 100, 1);
        ledger.deposit(A, 100, 0).unwrap();

        // Locked and over-asking: the balance error wins
        let err = ledger.withdraw(A, 101, 50).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InsufficientStake));

        let err = ledger.withdraw(A, 100, 50).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::StillLocked));

        // Sole staker with the vault holding exactly the stake
        let err = ledger.withdraw(A, 101, 100).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::InsufficientStake));
        ensure_custody(ledger.pool.total_staked, 100).unwrap();
    }

    #[test]
    fn test_custody_shortfall() {
        ensure_custody(100, 100).unwrap();
        ensure_custody(100, 0).unwrap();

        let err = ensure_custody(99, 100).unwrap_err();
        assert_eq!(error_code(err), code_of(StakingError::TransferFailed));
    }

    #[test]
    fn test_large_stake_after_dust_period() {
        // 9-decimal token emitting one whole token per second
        let mut ledger = Ledger::new(1_000_000_000, 1, 0, 2);
        let whale = 10_000_000_000_000;

        ledger.deposit(A, 1, 0).unwrap();
        assert_eq!(ledger.pending(A, 86_400), 86_400_000_000_000);

        ledger.deposit(B, whale, 86_400).unwrap();
        assert_eq!(ledger.pool.acc_reward_per_share, 86_400_000_000_000 * ACC_PRECISION);
        assert_eq!(ledger.pending(B, 86_400), 0);

        // 100s * 1e9 split over 1e13 + 1 staked
        assert_eq!(ledger.pending(A, 86_500), 86_400_000_000_000);
        assert_eq!(ledger.pending(B, 86_500), 99_999_999_990);

        let s = ledger.harvest(B, 86_500).unwrap();
        assert_eq!(s.paid, 99_999_999_990);

        let s = ledger.withdraw(B, whale, 86_600).unwrap();
        assert_eq!(s.paid, 99_999_999_990);
        let s = ledger.harvest(A, 86_600).unwrap();
        assert_eq!(s.paid, 86_400_000_000_000);

        let paid: u64 = ledger.received.iter().sum();
        assert!(paid <= 86_600 * 1_000_000_000);
        ledger.assert_conserved();
    }
}
