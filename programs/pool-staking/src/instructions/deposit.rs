use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{POOL_SEED, POSITION_SEED, REGISTRY_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use crate::engine;
use crate::error::StakingError;
use crate::events::{Deposited, RewardHarvested};
use crate::state::{Pool, Position, Registry};
use crate::transfers::{transfer_from_pool, transfer_to_pool};

/// Stake tokens into a pool
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `pool_id` - Pool to stake into
/// * `amount` - Amount of stake tokens to add
///
/// # Flow
/// 1. Accrue the pool
/// 2. Settle pending rewards of an existing position
/// 3. Update position (amount, lock start, reward debt) and pool totals
/// 4. Transfer stake tokens from user to stake vault
/// 5. Pay settled rewards from the reward vault
///
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Deposit<'info> {
    /// User staking their tokens
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

    /// User's position (created on first deposit)
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Position::INIT_SPACE,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
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

    /// Receives rewards settled on top-up deposits
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

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();
    let position_bump = ctx.bumps.position;
    let reward_vault_balance = ctx.accounts.reward_vault.amount;

    let accounts = &mut *ctx.accounts;

    // Fresh account from init_if_needed
    if accounts.position.owner == Pubkey::default() {
        accounts.position.pool = pool_key;
        accounts.position.owner = user_key;
        accounts.position.bump = position_bump;
    }

    let settlement = engine::deposit(
        &mut accounts.pool,
        &mut accounts.position,
        amount,
        now,
        reward_vault_balance,
    )?;

    let unlock_time = accounts.position.unlock_time(accounts.pool.lock_period)?;

    // Ledger is final; move the tokens
    transfer_to_pool(
        &accounts.token_program,
        &accounts.user_stake_account,
        &accounts.stake_vault,
        &accounts.user,
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

    emit!(Deposited {
        pool_id,
        user: user_key,
        amount,
        position_amount: accounts.position.amount,
        total_staked: accounts.pool.total_staked,
        unlock_time,
    });

    msg!(
        "Deposited {} into pool {}. User total: {}, Pool total: {}, Rewards paid: {}/{}",
        amount,
        pool_id,
        accounts.position.amount,
        accounts.pool.total_staked,
        settlement.paid,
        settlement.pending
    );

    Ok(())
}
