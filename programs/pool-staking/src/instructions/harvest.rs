use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, POSITION_SEED, REGISTRY_SEED, REWARD_VAULT_SEED};
use crate::engine;
use crate::error::StakingError;
use crate::events::RewardHarvested;
use crate::state::{Pool, Position, Registry};
use crate::transfers::transfer_from_pool;

/// Claim pending rewards without touching the stake
///
/// If the reward vault holds less than what is pending, the available
/// balance is paid and the remainder is forfeited.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Harvest<'info> {
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
        constraint = reward_mint.key() == pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

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

pub fn handler_harvest(ctx: Context<Harvest>, pool_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user_key = ctx.accounts.user.key();
    let reward_vault_balance = ctx.accounts.reward_vault.amount;

    let accounts = &mut *ctx.accounts;

    let settlement = engine::harvest(
        &mut accounts.pool,
        &mut accounts.position,
        now,
        reward_vault_balance,
    )?;

    transfer_from_pool(
        &accounts.token_program,
        &accounts.pool,
        &accounts.reward_vault,
        &accounts.user_reward_account,
        settlement.paid,
    )?;

    emit!(RewardHarvested {
        pool_id,
        user: user_key,
        pending: settlement.pending,
        paid: settlement.paid,
    });

    if settlement.shortfall() > 0 {
        msg!(
            "Reward vault short: paid {} of {} pending, {} forfeited",
            settlement.paid,
            settlement.pending,
            settlement.shortfall()
        );
    }

    msg!(
        "Harvested {} rewards from pool {}. Total claimed: {}",
        settlement.paid,
        pool_id,
        accounts.position.rewards_claimed
    );

    Ok(())
}
