use anchor_lang::prelude::*;

use crate::constants::{POOL_SEED, REGISTRY_SEED};
use crate::error::StakingError;
use crate::events::{AdminTransferred, RewardRateUpdated};
use crate::state::{Pool, Registry};

// =============================================================================
// Update Reward Rate
// =============================================================================

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdateRewardRate<'info> {
    #[account(
        constraint = registry.is_admin(&admin.key()) @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

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

/// Settles everything earned at the old rate before switching, so the new
/// rate only applies from now on. A rate of zero retires the pool.
pub fn update_reward_rate(ctx: Context<UpdateRewardRate>, pool_id: u64, new_rate: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool = &mut ctx.accounts.pool;
    let old_rate = pool.reward_per_second;

    pool.set_reward_rate(new_rate, now)?;

    emit!(RewardRateUpdated {
        pool_id,
        old_rate,
        new_rate,
        acc_reward_per_share: pool.acc_reward_per_share,
        timestamp: now,
    });

    msg!(
        "Pool {} reward rate updated from {}/s to {}/s",
        pool_id,
        old_rate,
        new_rate
    );

    Ok(())
}

// =============================================================================
// Transfer Admin
// =============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        constraint = registry.is_admin(&admin.key()) @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,

    /// CHECK: New admin address, validated to not be default
    #[account(
        constraint = new_admin.key() != Pubkey::default() @ StakingError::InvalidAuthority,
        constraint = new_admin.key() != admin.key() @ StakingError::InvalidAuthority
    )]
    pub new_admin: UncheckedAccount<'info>,
}

pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let old_admin = ctx.accounts.registry.admin;
    ctx.accounts.registry.admin = ctx.accounts.new_admin.key();

    emit!(AdminTransferred {
        old_admin,
        new_admin: ctx.accounts.registry.admin,
    });

    msg!(
        "Admin transferred from {} to {}",
        old_admin,
        ctx.accounts.new_admin.key()
    );

    Ok(())
}
