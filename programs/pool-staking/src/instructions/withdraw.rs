use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, POSITION_SEED, REGISTRY_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use crate::engine;
use crate::error::StakingError;
use crate::events::{RewardHarvested, Withdrawn};
use crate::state::{Pool, Position, Registry};
use crate::transfers::transfer_from_pool;

/// Withdraw staked tokens once the position's lock has expired
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `pool_id` - Pool to withdraw from
/// * `amount` - Amount of stake tokens to withdraw
///
/// # Flow
/// 1. Validate balance, amount and lock
/// 2. Accrue the pool and settle pending rewards
/// 3. Update position and pool totals
/// 4. Check custody, then transfer stake tokens back to the user
/// 5. Pay settled rewards from the reward vault
///
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

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

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ StakingError::InvalidAuthority
    )]
    pub position: Account<'info, Position>,

    #[account(
        constraint = stake_mint.key() == pool.stake_mint @ StakingError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    #[account(
        constraint = reward_mint.key() == pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = user
    )]
    pub user_stake_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump = pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user_key = ctx.accounts.user.key();
    let reward_vault_balance = ctx.accounts.reward_vault.amount;

    let accounts = &mut *ctx.accounts;

    let settlement = engine::withdraw(
        &mut accounts.pool,
        &mut accounts.position,
        amount,
        now,
        reward_vault_balance,
    )?;

    engine::ensure_custody(accounts.stake_vault.amount, amount)?;

    // Ledger is final; move the tokens
    transfer_from_pool(
        &accounts.token_program,
        &accounts.pool,
        &accounts.stake_vault,
        &accounts.user_stake_account,
        amount,
    )?;

    transfer_from_pool(
        &accounts.token_program,
        &accounts.pool,
        &accounts.reward_vault,
        &accounts.user_reward_account,
        settlement.paid,
    )?;

    if settlement.pending > 0 {
        emit!(RewardHarvested {
            pool_id,
            user: user_key,
            pending: settlement.pending,
            paid: settlement.paid,
        });
    }

    emit!(Withdrawn {
        pool_id,
        user: user_key,
        amount,
        position_amount: accounts.position.amount,
        total_staked: accounts.pool.total_staked,
    });

    msg!(
        "Withdrew {} from pool {}. User remaining: {}, Pool total: {}, Rewards paid: {}/{}",
        amount,
        pool_id,
        accounts.position.amount,
        accounts.pool.total_staked,
        settlement.paid,
        settlement.pending
    );

    Ok(())
}
