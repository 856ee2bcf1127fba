use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, POSITION_SEED, REGISTRY_SEED, STAKE_VAULT_SEED};
use crate::engine;
use crate::error::StakingError;
use crate::events::EmergencyWithdrawn;
use crate::state::{Pool, Position, Registry};
use crate::transfers::transfer_from_pool;

/// Return the whole stake immediately, ignoring the lock
///
/// Pending rewards are forfeited, not paid.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct EmergencyWithdraw<'info> {
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
        mut,
        token::mint = stake_mint,
        token::authority = user
    )]
    pub user_stake_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, pool.key().as_ref()],
        bump = pool.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_emergency_withdraw(ctx: Context<EmergencyWithdraw>, pool_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user_key = ctx.accounts.user.key();

    let accounts = &mut *ctx.accounts;

    let amount = engine::emergency_withdraw(&mut accounts.pool, &mut accounts.position, now)?;

    engine::ensure_custody(accounts.stake_vault.amount, amount)?;

    transfer_from_pool(
        &accounts.token_program,
        &accounts.pool,
        &accounts.stake_vault,
        &accounts.user_stake_account,
        amount,
    )?;

    emit!(EmergencyWithdrawn {
        pool_id,
        user: user_key,
        amount,
        total_staked: accounts.pool.total_staked,
    });

    msg!(
        "EMERGENCY withdrew {} from pool {}. Pending rewards forfeited. Pool total: {}",
        amount,
        pool_id,
        accounts.pool.total_staked
    );

    Ok(())
}
