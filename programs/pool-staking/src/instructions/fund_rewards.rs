use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, REGISTRY_SEED, REWARD_VAULT_SEED};
use crate::error::StakingError;
use crate::events::RewardsFunded;
use crate::state::{Pool, Registry};
use crate::transfers::transfer_to_pool;

/// Top up a pool's reward vault
///
/// Anyone may fund a pool. Funding does not change the emission rate; it only
/// determines how much of the accrued rewards can actually be paid out.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `pool_id` - Pool to fund
/// * `amount` - Amount of reward tokens to add
///
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct FundRewards<'info> {
    #[account(mut)]
    pub funder: Signer<'info>,

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
        constraint = reward_mint.key() == pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Funder's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = funder
    )]
    pub funder_reward_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, pool.key().as_ref()],
        bump = pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_fund_rewards(ctx: Context<FundRewards>, pool_id: u64, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    ctx.accounts.pool.record_funding(amount)?;

    transfer_to_pool(
        &ctx.accounts.token_program,
        &ctx.accounts.funder_reward_account,
        &ctx.accounts.reward_vault,
        &ctx.accounts.funder,
        amount,
    )?;

    emit!(RewardsFunded {
        pool_id,
        funder: ctx.accounts.funder.key(),
        amount,
        total_funded: ctx.accounts.pool.total_rewards_funded,
    });

    msg!(
        "Pool {} funded with {} reward tokens. Vault balance before: {}",
        pool_id,
        amount,
        ctx.accounts.reward_vault.amount
    );

    Ok(())
}
