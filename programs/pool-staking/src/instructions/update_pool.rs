use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, REGISTRY_SEED};
use crate::error::StakingError;
use crate::events::PoolAccrued;
use crate::state::{Pool, Registry};

/// Bring a pool's accumulator up to date
///
/// Permissionless. Every staking instruction already accrues first; this
/// exists so keepers and clients can checkpoint a pool without touching a
/// position.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdatePool<'info> {
    #[account(
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        constraint = registry.contains(pool_id) @ StakingError::PoolNotFound
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        mut,
        seeds = [POOL_SEED, &pool_id.to_le_bytes()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

pub fn handler_update_pool(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;

    pool.accrue(now)?;

    emit!(PoolAccrued {
        pool_id,
        acc_reward_per_share: pool.acc_reward_per_share,
        total_staked: pool.total_staked,
        timestamp: pool.last_accrual_time,
    });

    msg!(
        "Pool {} accrued: acc_reward_per_share={}, total_staked={}",
        pool_id,
        pool.acc_reward_per_share,
        pool.total_staked
    );

    Ok(())
}
