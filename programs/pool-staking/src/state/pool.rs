use anchor_lang::prelude::*;

use crate::constants::{ACC_PRECISION, MAX_LOCK_PERIOD};
use crate::error::StakingError;
use crate::math::mul_div;

/// One independent staking market
/// PDA: ["pool", pool_id (little-endian u64)]
#[account]
#[derive(InitSpace, Default)]
pub struct Pool {
    /// Sequential id handed out by the registry
    pub id: u64,

    /// Token that participants stake
    pub stake_mint: Pubkey,

    /// Token paid out as rewards (may equal stake_mint)
    pub reward_mint: Pubkey,

    /// Vault holding staked tokens
    /// PDA: ["stake_vault", pool]
    pub stake_vault: Pubkey,

    /// Vault holding reward tokens waiting to be paid out
    /// PDA: ["reward_vault", pool]
    pub reward_vault: Pubkey,

    /// Reward tokens emitted per second across the whole pool
    /// Zero means the pool is logically retired
    pub reward_per_second: u64,

    /// Last time the accumulator was brought up to date
    pub last_accrual_time: i64,

    /// Accumulated rewards per staked token (scaled by ACC_PRECISION)
    pub acc_reward_per_share: u128,

    /// Sum of all active position amounts
    pub total_staked: u64,

    /// Smallest amount a single deposit may add
    pub min_stake_amount: u64,

    /// Seconds after the latest deposit before a position may withdraw
    pub lock_period: i64,

    /// Number of active positions
    pub staker_count: u64,

    /// Reward tokens actually paid out (lifetime)
    pub total_rewards_paid: u64,

    /// Reward tokens deposited through fund_rewards (lifetime)
    pub total_rewards_funded: u64,

    /// Creation timestamp
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl Pool {
    pub fn validate_lock_period(lock_period: i64) -> Result<()> {
        require!(
            (0..=MAX_LOCK_PERIOD).contains(&lock_period),
            StakingError::InvalidLockPeriod
        );
        Ok(())
    }

    /// Accumulator value as it would be after accruing up to `now`
    ///
    /// Formula: acc += (elapsed * reward_per_second) * PRECISION / total_staked
    /// An empty pool earns nothing for the idle interval.
    pub fn projected_acc_reward_per_share(&self, now: i64) -> Result<u128> {
        if now <= self.last_accrual_time || self.total_staked == 0 {
            return Ok(self.acc_reward_per_share);
        }

        let elapsed = now
            .checked_sub(self.last_accrual_time)
            .ok_or(StakingError::MathUnderflow)? as u128;

        let reward = elapsed
            .checked_mul(self.reward_per_second as u128)
            .ok_or(StakingError::MathOverflow)?;

        let increase = mul_div(reward, ACC_PRECISION, self.total_staked as u128)?;

        Ok(self
            .acc_reward_per_share
            .checked_add(increase)
            .ok_or(StakingError::MathOverflow)?)
    }

    /// Bring the accumulator up to `now`
    ///
    /// Timestamps at or before the last accrual are a no-op, so the
    /// accumulator and last_accrual_time never move backwards.
    pub fn accrue(&mut self, now: i64) -> Result<()> {
        if now <= self.last_accrual_time {
            return Ok(());
        }

        self.acc_reward_per_share = self.projected_acc_reward_per_share(now)?;
        self.last_accrual_time = now;

        Ok(())
    }

    /// Change the emission rate, settling everything earned at the old rate first
    pub fn set_reward_rate(&mut self, new_rate: u64, now: i64) -> Result<()> {
        self.accrue(now)?;
        self.reward_per_second = new_rate;
        Ok(())
    }

    /// Record stake entering custody
    pub fn record_stake(&mut self, amount: u64, opens_position: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        if opens_position {
            self.staker_count = self
                .staker_count
                .checked_add(1)
                .ok_or(StakingError::MathOverflow)?;
        }

        Ok(())
    }

    /// Record stake leaving custody
    pub fn record_unstake(&mut self, amount: u64, closes_position: bool) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;

        if closes_position {
            self.staker_count = self
                .staker_count
                .checked_sub(1)
                .ok_or(StakingError::MathUnderflow)?;
        }

        Ok(())
    }

    /// Decide how much of `pending` the reward vault can actually cover
    /// and record it as paid. Shortfalls are dropped, not carried forward.
    pub fn record_payout(&mut self, pending: u64, vault_balance: u64) -> Result<u64> {
        let paid = pending.min(vault_balance);

        self.total_rewards_paid = self
            .total_rewards_paid
            .checked_add(paid)
            .ok_or(StakingError::MathOverflow)?;

        Ok(paid)
    }

    pub fn record_funding(&mut self, amount: u64) -> Result<()> {
        self.total_rewards_funded = self
            .total_rewards_funded
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }
}
