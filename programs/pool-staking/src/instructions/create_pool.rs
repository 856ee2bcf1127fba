use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, REGISTRY_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use crate::error::StakingError;
use crate::events::PoolCreated;
use crate::state::{Pool, Registry};

/// Create a new staking pool (admin only)
///
/// The pool id is the registry's current pool_count, so ids are sequential
/// and never reused.
///
/// # Accounts
/// * `admin` - Registry admin (signer, payer)
/// * `registry` - Registry PDA
/// * `pool` - Pool PDA to create: ["pool", pool_id]
/// * `stake_mint` - Token participants stake
/// * `reward_mint` - Token paid out as rewards
/// * `stake_vault` - Vault for staked tokens, owned by the pool PDA
/// * `reward_vault` - Vault for reward tokens, owned by the pool PDA
///
#[derive(Accounts)]
pub struct CreatePool<'info> {
    #[account(
        mut,
        constraint = registry.is_admin(&admin.key()) @ StakingError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump
    )]
    pub registry: Account<'info, Registry>,

    #[account(
        init,
        payer = admin,
        space = 8 + Pool::INIT_SPACE,
        seeds = [POOL_SEED, &registry.pool_count.to_le_bytes()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    pub stake_mint: Account<'info, Mint>,

    pub reward_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        init,
        payer = admin,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_create_pool(
    ctx: Context<CreatePool>,
    reward_per_second: u64,
    min_stake_amount: u64,
    lock_period: i64,
) -> Result<u64> {
    Pool::validate_lock_period(lock_period)?;

    let now = Clock::get()?.unix_timestamp;
    let pool_id = ctx.accounts.registry.next_pool_id()?;

    let pool = &mut ctx.accounts.pool;

    pool.id = pool_id;
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.reward_mint = ctx.accounts.reward_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();

    pool.reward_per_second = reward_per_second;
    pool.min_stake_amount = min_stake_amount;
    pool.lock_period = lock_period;

    // Accumulator starts empty at creation time
    pool.last_accrual_time = now;
    pool.acc_reward_per_share = 0;
    pool.total_staked = 0;
    pool.staker_count = 0;
    pool.total_rewards_paid = 0;
    pool.total_rewards_funded = 0;
    pool.created_at = now;

    pool.bump = ctx.bumps.pool;
    pool.stake_vault_bump = ctx.bumps.stake_vault;
    pool.reward_vault_bump = ctx.bumps.reward_vault;

    emit!(PoolCreated {
        pool_id,
        stake_mint: pool.stake_mint,
        reward_mint: pool.reward_mint,
        reward_per_second,
        min_stake_amount,
        lock_period,
        timestamp: now,
    });

    msg!(
        "Pool {} created: stake_mint={}, reward_mint={}, rate={}/s, min_stake={}, lock={}s",
        pool_id,
        pool.stake_mint,
        pool.reward_mint,
        reward_per_second,
        min_stake_amount,
        lock_period
    );

    Ok(pool_id)
}
