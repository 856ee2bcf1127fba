use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::constants::ACC_PRECISION;
use crate::math::{mul_div, to_token_amount};

/// One participant's stake in one pool
/// PDA: ["position", pool, owner]
///
/// A position is either Empty (amount 0, inactive) or Active. Withdrawing
/// everything or emergency-withdrawing returns it to Empty, and a new
/// deposit reactivates the same account.
#[account]
#[derive(InitSpace, Default)]
pub struct Position {
    /// The pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position
    pub owner: Pubkey,

    /// Amount of stake tokens currently held in custody for this owner
    pub amount: u64,

    /// Timestamp of the latest deposit; the lock runs from here
    pub deposit_time: i64,

    /// Reward debt - rewards already accounted for, in reward token units
    /// Always amount * acc_reward_per_share / PRECISION as of this
    /// position's last touch
    /// pending = amount * acc_reward_per_share / PRECISION - reward_debt
    pub reward_debt: u128,

    /// True while amount > 0
    pub active: bool,

    /// Reward tokens actually received (lifetime)
    pub rewards_claimed: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Position {
    /// Everything this position would have earned since the accumulator
    /// started, at its current amount
    fn accumulated(&self, acc_reward_per_share: u128) -> Result<u128> {
        mul_div(self.amount as u128, acc_reward_per_share, ACC_PRECISION)
    }

    /// Rewards earned since the last checkpoint, in reward token units
    pub fn pending_reward(&self, acc_reward_per_share: u128) -> Result<u64> {
        if !self.active || self.amount == 0 {
            return Ok(0);
        }

        let unclaimed = self
            .accumulated(acc_reward_per_share)?
            .checked_sub(self.reward_debt)
            .ok_or(StakingError::MathUnderflow)?;

        to_token_amount(unclaimed)
    }

    /// Re-anchor reward_debt to the current accumulator
    pub fn checkpoint(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = self.accumulated(acc_reward_per_share)?;
        Ok(())
    }

    /// Earliest time this position may withdraw
    pub fn unlock_time(&self, lock_period: i64) -> Result<i64> {
        Ok(self
            .deposit_time
            .checked_add(lock_period)
            .ok_or(StakingError::MathOverflow)?)
    }

    pub fn is_unlocked(&self, lock_period: i64, now: i64) -> Result<bool> {
        Ok(now >= self.unlock_time(lock_period)?)
    }

    /// Record a deposit. Pending rewards must have been settled by the caller
    /// using the same accumulator value. The lock restarts for the whole
    /// position.
    pub fn record_deposit(&mut self, amount: u64, now: i64, acc_reward_per_share: u128) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        self.deposit_time = now;
        self.active = true;
        self.checkpoint(acc_reward_per_share)
    }

    /// Record a withdrawal. Pending rewards must have been settled by the
    /// caller using the same accumulator value.
    pub fn record_withdraw(&mut self, amount: u64, acc_reward_per_share: u128) -> Result<()> {
        require!(
            self.active && self.amount >= amount,
            StakingError::InsufficientStake
        );

        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        if self.amount == 0 {
            self.active = false;
        }

        self.checkpoint(acc_reward_per_share)
    }

    /// Zero the position, forfeiting anything pending. Returns the principal.
    pub fn record_emergency_withdraw(&mut self) -> u64 {
        let amount = self.amount;

        self.amount = 0;
        self.reward_debt = 0;
        self.active = false;

        amount
    }

    pub fn record_claim(&mut self, paid: u64) -> Result<()> {
        self.rewards_claimed = self
            .rewards_claimed
            .checked_add(paid)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }
}
